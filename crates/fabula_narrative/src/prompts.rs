//! Prompt templates and tool schemas for the text provider.

use fabula_core::ToolSpec;
use serde_json::json;

pub(crate) const WRITE_STORY_PART: &str = "write_story_part";
pub(crate) const SUGGEST_POLL_OPTIONS: &str = "suggest_poll_options";
pub(crate) const FORMAT_IMAGE_PROMPT: &str = "format_image_prompt";

pub(crate) fn story_tool() -> ToolSpec {
    ToolSpec::new(
        WRITE_STORY_PART,
        "Writes the next part of the interactive story together with a short plan.",
        json!({
            "type": "object",
            "properties": {
                "reasoning": {
                    "type": "string",
                    "description": "A brief plan for the next paragraphs, including two cliches to avoid."
                },
                "story_part": {
                    "type": "string",
                    "description": "The next three paragraphs of the story, separated by blank lines."
                }
            },
            "required": ["reasoning", "story_part"],
            "additionalProperties": false
        }),
    )
}

pub(crate) fn poll_tool() -> ToolSpec {
    ToolSpec::new(
        SUGGEST_POLL_OPTIONS,
        "Suggests four continuation choices for the audience poll.",
        json!({
            "type": "object",
            "properties": {
                "options": {
                    "type": "array",
                    "description": "Exactly 4 concise continuation options (max 90 chars each).",
                    "items": { "type": "string" }
                }
            },
            "required": ["options"],
            "additionalProperties": false
        }),
    )
}

pub(crate) fn image_prompt_tool() -> ToolSpec {
    ToolSpec::new(
        FORMAT_IMAGE_PROMPT,
        "Combines the scene and styling directives into one image generation prompt.",
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The fully formatted image generation prompt."
                }
            },
            "required": ["prompt"],
            "additionalProperties": false
        }),
    )
}

pub(crate) fn continuation_system_prompt(end_story: bool) -> &'static str {
    if end_story {
        "You are a celebrated novelist concluding a serialized interactive story. \
         You are given the story so far. Write the FINAL THREE PARAGRAPHS, separated \
         by blank lines: resolve the open plot threads, answer the key questions, and \
         show how the characters have changed. Refer to characters by name, never as \
         'the hero'. Avoid stock phrases; in the 'reasoning' field name two cliches \
         you will deliberately avoid. Reply ONLY through the 'write_story_part' tool."
    } else {
        "You are a celebrated novelist continuing a serialized interactive story. The \
         audience steers the plot through polls, but you keep a coherent through-line. \
         You are given the story so far and the audience's chosen direction. Write the \
         NEXT THREE PARAGRAPHS, separated by blank lines, weaving the choice in \
         organically. Refer to characters by name, never as 'the hero'. Vary pacing \
         with the type of scene: linger on crises, compress quiet stretches. Avoid \
         stock phrases; in the 'reasoning' field name two cliches you will \
         deliberately avoid. Reply ONLY through the 'write_story_part' tool."
    }
}

pub(crate) fn continuation_user_prompt(context: &str, choice: &str, completion: f32) -> String {
    format!(
        "The story so far (about {:.0}% complete):\n{}\n\nAudience choice: '{}'\n\n\
         Write the next three paragraphs using the 'write_story_part' tool.",
        completion * 100.0,
        context,
        choice,
    )
}

pub(crate) fn poll_system_prompt() -> &'static str {
    "You are the assistant for a serialized interactive story. You are given the \
     current story text. Propose exactly 4 SHORT (at most 90 characters) and \
     FUNDAMENTALLY DIFFERENT continuation choices for an audience poll. The options \
     must pull the plot in clearly distinct, even opposite, directions; avoid minor \
     variations of the same action. Reply ONLY through the 'suggest_poll_options' \
     tool."
}

pub(crate) fn poll_user_prompt(context: &str) -> String {
    format!(
        "Current story text:\n{}\n\nSuggest 4 poll options using the \
         'suggest_poll_options' tool.",
        context,
    )
}

pub(crate) fn image_system_prompt() -> &'static str {
    "You are an expert prompt engineer. Transform the provided 'scene' into a \
     concise, vivid visual description optimized for image generation: key visual \
     elements, characters with their appearance, mood and composition. Refine the \
     raw 'styling' into a bullet list of clear style directives (art style, \
     lighting, palette). Reply with exactly one call to 'format_image_prompt' whose \
     'prompt' contains a [STYLING] section followed by a [SCENE DESCRIPTION] \
     section."
}

pub(crate) fn image_user_prompt(scene: &str, styling: &str) -> String {
    json!({ "scene": scene, "styling": styling }).to_string()
}
