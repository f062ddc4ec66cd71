//! Story generation over a chat driver.

use crate::{
    context, prompts, StoryStep, POLL_OPTION_COUNT, POLL_OPTION_MAX_CHARS,
};
use fabula_core::{ChatDriver, ChatMessage, GenerateRequest, GenerateResponse};
use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Limits that bound every generation request.
#[derive(Debug, Clone, Copy)]
pub struct StoryLimits {
    /// Trailing character budget for submitted context
    pub max_context_chars: usize,
    /// Sentence budget after which the story is steered to a close
    pub max_sentences: usize,
}

/// Produces story continuations, poll options, and image prompts.
///
/// Owns the chat driver plus the fixed texts that shape a story: the opening
/// premise, the fallback steering prompt used when no poll winner exists,
/// and the option that lets the audience vote to end the story.
pub struct StoryGenerator<D> {
    driver: D,
    limits: StoryLimits,
    initial_idea: String,
    fallback_choice: String,
    end_story_option: String,
}

#[derive(Debug, Deserialize)]
struct StoryPartArgs {
    #[serde(default)]
    reasoning: Option<String>,
    story_part: String,
}

#[derive(Debug, Deserialize)]
struct PollOptionsArgs {
    options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ImagePromptArgs {
    prompt: String,
}

impl<D: ChatDriver> StoryGenerator<D> {
    /// Creates a new generator.
    pub fn new(
        driver: D,
        limits: StoryLimits,
        initial_idea: impl Into<String>,
        fallback_choice: impl Into<String>,
        end_story_option: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            limits,
            initial_idea: initial_idea.into(),
            fallback_choice: fallback_choice.into(),
            end_story_option: end_story_option.into(),
        }
    }

    /// The poll option that concludes the story when it wins.
    pub fn end_story_option(&self) -> &str {
        &self.end_story_option
    }

    /// Generate the next story step.
    ///
    /// `story` is the full accumulated text; it is truncated to the trailing
    /// context budget before submission. With an empty `story` the configured
    /// premise opens the story verbatim — no continuation is requested, only
    /// poll options. A `prior_choice` equal to the end-story option, or a
    /// story past its sentence budget, produces a concluding step with no
    /// poll options.
    #[instrument(skip(self, story), fields(story_len = story.len(), prior_choice = ?prior_choice))]
    pub async fn continue_story(
        &self,
        story: &str,
        prior_choice: Option<&str>,
    ) -> FabulaResult<StoryStep> {
        if story.is_empty() {
            info!("No existing story, opening with the configured premise");
            let poll_options = self.poll_options(&self.initial_idea, false).await?;
            return Ok(StoryStep {
                continuation: self.initial_idea.clone(),
                poll_options,
                is_ending: false,
            });
        }

        let sentences = context::count_sentences(story);
        let over_budget = sentences > self.limits.max_sentences;
        let chose_ending = prior_choice == Some(self.end_story_option.as_str());
        let end_story = over_budget || chose_ending;
        let completion = sentences as f32 / self.limits.max_sentences as f32;

        if over_budget {
            info!(sentences, "Sentence budget exhausted, steering story to a close");
        }

        let choice = prior_choice.unwrap_or(self.fallback_choice.as_str());
        let truncated = context::truncate_context(story, self.limits.max_context_chars);
        let continuation = self
            .story_part(truncated, choice, completion, end_story)
            .await?;

        if end_story {
            return Ok(StoryStep {
                continuation,
                poll_options: Vec::new(),
                is_ending: true,
            });
        }

        // Past 80% of the budget the audience gets a vote on ending it
        let near_budget = sentences * 5 > self.limits.max_sentences * 4;
        let updated = format!("{}\n\n{}", story, continuation);
        let poll_context =
            context::truncate_context(&updated, self.limits.max_context_chars).to_string();
        let poll_options = self.poll_options(&poll_context, near_budget).await?;

        Ok(StoryStep {
            continuation,
            poll_options,
            is_ending: false,
        })
    }

    /// Derive a visual prompt for the latest scene.
    #[instrument(skip(self, scene, style_prefix), fields(scene_len = scene.len()))]
    pub async fn image_prompt(&self, scene: &str, style_prefix: &str) -> FabulaResult<String> {
        let request = GenerateRequest::forced_tool(
            vec![
                ChatMessage::system(prompts::image_system_prompt()),
                ChatMessage::user(prompts::image_user_prompt(scene, style_prefix)),
            ],
            prompts::image_prompt_tool(),
        );
        let response = self.driver.generate(&request).await?;
        let args: ImagePromptArgs = tool_arguments(&response, prompts::FORMAT_IMAGE_PROMPT)?;

        let prompt = args.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MalformedArguments(
                "'prompt' was empty".to_string(),
            ))
            .into());
        }
        debug!(prompt_len = prompt.len(), "Derived image prompt");
        Ok(prompt)
    }

    async fn story_part(
        &self,
        truncated_context: &str,
        choice: &str,
        completion: f32,
        end_story: bool,
    ) -> FabulaResult<String> {
        let request = GenerateRequest::forced_tool(
            vec![
                ChatMessage::system(prompts::continuation_system_prompt(end_story)),
                ChatMessage::user(prompts::continuation_user_prompt(
                    truncated_context,
                    choice,
                    completion,
                )),
            ],
            prompts::story_tool(),
        );
        let response = self.driver.generate(&request).await?;
        let args: StoryPartArgs = tool_arguments(&response, prompts::WRITE_STORY_PART)?;

        if let Some(reasoning) = &args.reasoning {
            debug!(reasoning = %reasoning, "Continuation plan");
        }

        let story_part = args.story_part.trim().to_string();
        if story_part.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyContinuation).into());
        }
        Ok(story_part)
    }

    async fn poll_options(
        &self,
        poll_context: &str,
        include_end_option: bool,
    ) -> FabulaResult<Vec<String>> {
        let request = GenerateRequest::forced_tool(
            vec![
                ChatMessage::system(prompts::poll_system_prompt()),
                ChatMessage::user(prompts::poll_user_prompt(poll_context)),
            ],
            prompts::poll_tool(),
        );
        let response = self.driver.generate(&request).await?;
        let args: PollOptionsArgs = tool_arguments(&response, prompts::SUGGEST_POLL_OPTIONS)?;

        let mut options: Vec<String> = args
            .options
            .iter()
            .map(|opt| clip_chars(opt.trim(), POLL_OPTION_MAX_CHARS))
            .filter(|opt| !opt.is_empty())
            .collect();

        if options.len() != POLL_OPTION_COUNT {
            return Err(GenerationError::new(GenerationErrorKind::PollOptionCount {
                expected: POLL_OPTION_COUNT,
                actual: options.len(),
            })
            .into());
        }

        let distinct: HashSet<&str> = options.iter().map(|s| s.as_str()).collect();
        if distinct.len() != POLL_OPTION_COUNT {
            return Err(
                GenerationError::new(GenerationErrorKind::DuplicatePollOptions).into(),
            );
        }

        if include_end_option {
            info!("Replacing the last poll option with the end-story choice");
            options[POLL_OPTION_COUNT - 1] = self.end_story_option.clone();
        }

        debug!(options = ?options, "Validated poll options");
        Ok(options)
    }
}

fn tool_arguments<T: DeserializeOwned>(
    response: &GenerateResponse,
    tool: &str,
) -> FabulaResult<T> {
    let call = response.tool_call(tool).ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::MissingToolCall(tool.to_string()))
    })?;
    serde_json::from_value(call.arguments.clone()).map_err(|e| {
        GenerationError::new(GenerationErrorKind::MalformedArguments(format!(
            "tool '{}': {}",
            tool, e
        )))
        .into()
    })
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
