use async_trait::async_trait;
use fabula_core::{ChatDriver, GenerateRequest, GenerateResponse, Output, Role, ToolCall};
use fabula_error::FabulaResult;
use fabula_narrative::{StoryGenerator, StoryLimits, POLL_OPTION_COUNT};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const PREMISE: &str = "A lone courier enters Neon Bay.";
const FALLBACK: &str = "Continue however you see fit.";
const END_OPTION: &str = "End the story";

/// Scripted driver that answers each forced tool by name and records every
/// request it sees.
#[derive(Clone)]
struct MockDriver(Arc<MockInner>);

struct MockInner {
    story_args: Value,
    poll_args: Value,
    image_args: Value,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    fn new(story_args: Value, poll_args: Value) -> Self {
        Self(Arc::new(MockInner {
            story_args,
            poll_args,
            image_args: json!({"prompt": "[STYLING]\n- neon\n\n[SCENE DESCRIPTION]\nA courier."}),
            requests: Mutex::new(Vec::new()),
        }))
    }

    fn requests(&self) -> Vec<GenerateRequest> {
        self.0.requests.lock().unwrap().clone()
    }

    fn requests_for(&self, tool: &str) -> Vec<GenerateRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.tool_choice.as_deref() == Some(tool))
            .collect()
    }

    fn user_prompt(req: &GenerateRequest) -> String {
        req.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl ChatDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        self.0.requests.lock().unwrap().push(req.clone());

        let tool = req.tool_choice.clone().expect("generator forces a tool");
        let arguments = match tool.as_str() {
            "write_story_part" => self.0.story_args.clone(),
            "suggest_poll_options" => self.0.poll_args.clone(),
            "format_image_prompt" => self.0.image_args.clone(),
            other => panic!("unexpected tool: {}", other),
        };

        Ok(GenerateResponse {
            outputs: vec![Output::ToolCalls(vec![ToolCall {
                id: "call_0".to_string(),
                name: tool,
                arguments,
            }])],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model-v1"
    }
}

fn four_options() -> Value {
    json!({"options": ["Turn left", "Turn right", "Wait in the alley", "Climb the tower"]})
}

fn generator(driver: MockDriver, limits: StoryLimits) -> StoryGenerator<MockDriver> {
    StoryGenerator::new(driver, limits, PREMISE, FALLBACK, END_OPTION)
}

fn default_limits() -> StoryLimits {
    StoryLimits {
        max_context_chars: 15_000,
        max_sentences: 500,
    }
}

#[tokio::test]
async fn first_step_publishes_the_premise_verbatim() {
    let driver = MockDriver::new(json!({}), four_options());
    let story_gen = generator(driver.clone(), default_limits());

    let step = story_gen.continue_story("", None).await.unwrap();

    assert_eq!(step.continuation, PREMISE);
    assert_eq!(step.poll_options.len(), POLL_OPTION_COUNT);
    assert!(!step.is_ending);
    // The premise is not generated; only the poll touches the provider
    assert!(driver.requests_for("write_story_part").is_empty());
    assert_eq!(driver.requests_for("suggest_poll_options").len(), 1);
}

#[tokio::test]
async fn prior_poll_winner_steers_the_continuation() {
    let driver = MockDriver::new(
        json!({"reasoning": "sharp turn", "story_part": "She turned left into the fog."}),
        four_options(),
    );
    let story_gen = generator(driver.clone(), default_limits());

    let step = story_gen
        .continue_story("The courier reached the crossing.", Some("Turn left"))
        .await
        .unwrap();

    assert_eq!(step.continuation, "She turned left into the fog.");
    let story_requests = driver.requests_for("write_story_part");
    assert_eq!(story_requests.len(), 1);
    assert!(MockDriver::user_prompt(&story_requests[0]).contains("'Turn left'"));
}

#[tokio::test]
async fn missing_winner_falls_back_to_free_continuation() {
    let driver = MockDriver::new(json!({"story_part": "The night went on."}), four_options());
    let story_gen = generator(driver.clone(), default_limits());

    story_gen.continue_story("The courier waited.", None).await.unwrap();

    let story_requests = driver.requests_for("write_story_part");
    assert!(MockDriver::user_prompt(&story_requests[0]).contains(FALLBACK));
}

#[tokio::test]
async fn submitted_context_is_the_trailing_character_budget() {
    let driver = MockDriver::new(json!({"story_part": "More."}), four_options());
    let limits = StoryLimits {
        max_context_chars: 10,
        max_sentences: 500,
    };
    let story_gen = generator(driver.clone(), limits);

    let story = format!("{}{}", "a".repeat(90), "b".repeat(10));
    story_gen.continue_story(&story, Some("Go on")).await.unwrap();

    let prompt = MockDriver::user_prompt(&driver.requests_for("write_story_part")[0]);
    assert!(prompt.contains(&"b".repeat(10)));
    assert!(!prompt.contains('a'));
}

#[tokio::test]
async fn fewer_than_four_options_is_a_generation_error() {
    let driver = MockDriver::new(
        json!({"story_part": "More."}),
        json!({"options": ["Left", "Right", "Wait"]}),
    );
    let story_gen = generator(driver, default_limits());

    let result = story_gen.continue_story("A scene.", Some("Go")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn duplicate_options_are_a_generation_error() {
    let driver = MockDriver::new(
        json!({"story_part": "More."}),
        json!({"options": ["Left", "Left", "Wait", "Climb"]}),
    );
    let story_gen = generator(driver, default_limits());

    let result = story_gen.continue_story("A scene.", Some("Go")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn long_options_are_clipped_not_rejected() {
    let long_option = "x".repeat(200);
    let driver = MockDriver::new(
        json!({"story_part": "More."}),
        json!({"options": [long_option, "Right", "Wait", "Climb"]}),
    );
    let story_gen = generator(driver, default_limits());

    let step = story_gen.continue_story("A scene.", Some("Go")).await.unwrap();
    assert_eq!(step.poll_options[0].chars().count(), 90);
}

#[tokio::test]
async fn near_budget_polls_offer_the_end_story_option() {
    let driver = MockDriver::new(json!({"story_part": "Almost there."}), four_options());
    let limits = StoryLimits {
        max_context_chars: 15_000,
        max_sentences: 10,
    };
    let story_gen = generator(driver, limits);

    // 9 sentences: inside the budget but past 80% of it
    let story = "One. Two. Three. Four. Five. Six. Seven. Eight. Nine.";
    let step = story_gen.continue_story(story, Some("Go")).await.unwrap();

    assert!(!step.is_ending);
    assert_eq!(step.poll_options[3], END_OPTION);
}

#[tokio::test]
async fn exhausted_budget_concludes_without_a_poll() {
    let driver = MockDriver::new(json!({"story_part": "And so it ended."}), four_options());
    let limits = StoryLimits {
        max_context_chars: 15_000,
        max_sentences: 3,
    };
    let story_gen = generator(driver.clone(), limits);

    let story = "One. Two. Three. Four.";
    let step = story_gen.continue_story(story, Some("Go")).await.unwrap();

    assert!(step.is_ending);
    assert!(step.poll_options.is_empty());
    assert!(driver.requests_for("suggest_poll_options").is_empty());
}

#[tokio::test]
async fn winning_end_option_concludes_the_story() {
    let driver = MockDriver::new(json!({"story_part": "The tale closed."}), four_options());
    let story_gen = generator(driver, default_limits());

    let step = story_gen
        .continue_story("A long journey.", Some(END_OPTION))
        .await
        .unwrap();

    assert!(step.is_ending);
    assert!(step.poll_options.is_empty());
}

#[tokio::test]
async fn image_prompt_is_derived_through_the_formatting_tool() {
    let driver = MockDriver::new(json!({}), json!({}));
    let story_gen = generator(driver.clone(), default_limits());

    let prompt = story_gen
        .image_prompt("She turned left into the fog.", "neo-noir, rain")
        .await
        .unwrap();

    assert!(prompt.contains("[SCENE DESCRIPTION]"));
    let requests = driver.requests_for("format_image_prompt");
    assert!(MockDriver::user_prompt(&requests[0]).contains("neo-noir"));
}
