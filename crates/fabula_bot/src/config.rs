//! Environment-derived configuration record.

use fabula_error::{ConfigError, FabulaResult};
use std::path::PathBuf;

const DEFAULT_MAX_CONTEXT_CHARS: usize = 15_000;
const DEFAULT_MAX_SENTENCES: usize = 500;
const DEFAULT_STATE_PATH: &str = "state/story_state.json";

const POLL_QUESTION: &str = "How should the story continue?";
const FALLBACK_CHOICE: &str = "Continue however you see fit.";
const END_STORY_OPTION: &str = "End the story";

/// Credentials for the optional image provider.
///
/// Either both values are present and the step renders illustrations, or the
/// capability is absent and publishing is text-only. Resolved once here, not
/// per call.
#[derive(Debug, Clone)]
pub struct ImageProviderConfig {
    /// Image provider credential
    pub api_key: String,
    /// Image model identifier
    pub model: String,
}

/// Immutable configuration for one deployment, built once at process start.
///
/// No component reads ambient environment state after this record exists, so
/// tests construct it directly.
#[derive(Debug, Clone)]
pub struct StoryBotConfig {
    /// Messaging bot credential
    pub bot_token: String,
    /// Channel the story is published to
    pub channel_id: String,
    /// Text provider credential
    pub openai_api_key: String,
    /// Text provider base URL (OpenAI-compatible)
    pub openai_base_url: String,
    /// Text model identifier
    pub openai_model: String,
    /// Optional image provider; absent means text-only publishing
    pub image: Option<ImageProviderConfig>,
    /// Style guide prefixed to every derived image prompt
    pub image_style: String,
    /// Premise that opens a fresh story
    pub initial_story_idea: String,
    /// Trailing character budget for generation context
    pub max_context_chars: usize,
    /// Sentence budget after which the story is steered to a close
    pub story_max_sentences: usize,
    /// Suppress every externally visible side effect
    pub dry_run: bool,
    /// Abort the step when illustration rendering fails
    pub require_image: bool,
    /// Path of the persisted state record
    pub state_path: PathBuf,
    /// Question shown on every audience poll
    pub poll_question: String,
    /// Steering prompt used when no poll winner exists
    pub fallback_choice: String,
    /// Poll option that concludes the story when it wins
    pub end_story_option: String,
}

impl StoryBotConfig {
    /// Build the configuration from the process environment.
    ///
    /// Call after any `.env` merge; all required values must be present or
    /// this fails with a single [`ConfigError`] naming every missing one.
    pub fn from_env() -> FabulaResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary lookup.
    ///
    /// Tests pass a map-backed closure instead of touching the real
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FabulaResult<Self> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let mut missing = Vec::new();
        let mut require = |name: &'static str| match get(name) {
            Some(value) => value,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let bot_token = require("BOT_TOKEN");
        let channel_id = require("CHANNEL_ID");
        let openai_api_key = require("OPENAI_API_KEY");
        let openai_base_url = require("OPENAI_BASE_URL");
        let openai_model = require("OPENAI_MODEL");
        let initial_story_idea = require("INITIAL_STORY_IDEA");

        if !missing.is_empty() {
            return Err(ConfigError::new(format!(
                "missing required settings: {}",
                missing.join(", ")
            ))
            .into());
        }

        let image = match (get("GEMINI_API_KEY"), get("GEMINI_IMAGE_MODEL")) {
            (Some(api_key), Some(model)) => Some(ImageProviderConfig { api_key, model }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::new(
                    "GEMINI_API_KEY and GEMINI_IMAGE_MODEL must be set together",
                )
                .into());
            }
        };

        Ok(Self {
            bot_token,
            channel_id,
            openai_api_key,
            openai_base_url,
            openai_model,
            image,
            image_style: get("IMAGE_PROMPT_START").unwrap_or_default(),
            initial_story_idea,
            max_context_chars: parse_or(get("MAX_CONTEXT_CHARS"), DEFAULT_MAX_CONTEXT_CHARS)?,
            story_max_sentences: parse_or(get("STORY_MAX_SENTENCES"), DEFAULT_MAX_SENTENCES)?,
            dry_run: parse_flag(get("DRY_RUN"))?,
            require_image: parse_flag(get("REQUIRE_IMAGE"))?,
            state_path: get("STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
            poll_question: POLL_QUESTION.to_string(),
            fallback_choice: FALLBACK_CHOICE.to_string(),
            end_story_option: END_STORY_OPTION.to_string(),
        })
    }
}

fn parse_or(value: Option<String>, default: usize) -> FabulaResult<usize> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::new(format!("not a number: '{}'", raw)).into()),
    }
}

fn parse_flag(value: Option<String>) -> FabulaResult<bool> {
    match value.as_deref() {
        None => Ok(false),
        Some("true") | Some("True") | Some("1") => Ok(true),
        Some("false") | Some("False") | Some("0") => Ok(false),
        Some(other) => Err(ConfigError::new(format!("not a boolean: '{}'", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("BOT_TOKEN", "123:abc"),
            ("CHANNEL_ID", "@night_serial"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            ("OPENAI_MODEL", "gpt-test"),
            ("INITIAL_STORY_IDEA", "A lone courier enters Neon Bay."),
        ])
    }

    fn lookup(env: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| env.get(name).map(|v| v.to_string())
    }

    #[test]
    fn minimal_environment_builds_with_defaults() {
        let config = StoryBotConfig::from_lookup(lookup(base_env())).unwrap();
        assert_eq!(config.max_context_chars, 15_000);
        assert_eq!(config.story_max_sentences, 500);
        assert!(!config.dry_run);
        assert!(config.image.is_none());
        assert_eq!(config.state_path, PathBuf::from("state/story_state.json"));
    }

    #[test]
    fn missing_values_are_all_reported_at_once() {
        let mut env = base_env();
        env.remove("BOT_TOKEN");
        env.remove("OPENAI_MODEL");

        let err = StoryBotConfig::from_lookup(lookup(env)).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("BOT_TOKEN"));
        assert!(message.contains("OPENAI_MODEL"));
    }

    #[test]
    fn image_capability_needs_both_values() {
        let mut env = base_env();
        env.insert("GEMINI_API_KEY", "g-test");
        assert!(StoryBotConfig::from_lookup(lookup(env)).is_err());

        let mut env = base_env();
        env.insert("GEMINI_API_KEY", "g-test");
        env.insert("GEMINI_IMAGE_MODEL", "imagen-test");
        let config = StoryBotConfig::from_lookup(lookup(env)).unwrap();
        assert!(config.image.is_some());
    }

    #[test]
    fn flags_and_numbers_parse() {
        let mut env = base_env();
        env.insert("DRY_RUN", "True");
        env.insert("MAX_CONTEXT_CHARS", "2000");
        let config = StoryBotConfig::from_lookup(lookup(env)).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.max_context_chars, 2000);

        let mut env = base_env();
        env.insert("DRY_RUN", "maybe");
        assert!(StoryBotConfig::from_lookup(lookup(env)).is_err());
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut env = base_env();
        env.insert("CHANNEL_ID", "");
        let err = StoryBotConfig::from_lookup(lookup(env)).unwrap_err();
        assert!(format!("{}", err).contains("CHANNEL_ID"));
    }
}
