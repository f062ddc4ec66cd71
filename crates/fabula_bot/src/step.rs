//! The story step state machine.

use crate::StoryBotConfig;
use fabula_core::{ChatDriver, ImageRenderer};
use fabula_error::{FabulaError, FabulaResult};
use fabula_narrative::{StoryGenerator, StoryStep};
use fabula_social::Publisher;
use fabula_storage::{StateRepository, StoryState};
use tracing::{debug, error, info, instrument, warn};

/// Phases of one orchestration step, in execution order.
///
/// Each phase must complete before the next begins; any failure aborts the
/// step without saving, so the next scheduled run resumes from the last
/// persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StepPhase {
    /// Reading the persisted story state
    #[display("loading")]
    Loading,
    /// Closing the previous audience poll
    #[display("closing_prior_poll")]
    ClosingPriorPoll,
    /// Generating the continuation and poll options
    #[display("generating_text")]
    GeneratingText,
    /// Deriving the image prompt and rendering the illustration
    #[display("generating_image")]
    GeneratingImage,
    /// Posting text, illustration, and poll to the channel
    #[display("publishing")]
    Publishing,
    /// Persisting the updated story state
    #[display("saving")]
    Saving,
    /// Step finished
    #[display("done")]
    Done,
    /// Step failed; persisted state untouched
    #[display("aborted")]
    Aborted,
}

/// What one invocation of the orchestrator did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The story had already concluded; nothing was done
    AlreadyFinished,
    /// A step was published
    Published {
        /// Message id of the posted scene text
        message_id: i64,
        /// Message id of the new poll, absent on a concluding step
        poll_message_id: Option<i64>,
        /// Whether this step concluded the story
        finished: bool,
    },
}

/// Sequences one story step across the generator, publisher, and state
/// repository.
pub struct StoryStepRunner<D, I, P, R> {
    generator: StoryGenerator<D>,
    renderer: Option<I>,
    publisher: P,
    repository: R,
    poll_question: String,
    image_style: String,
    require_image: bool,
}

impl<D, I, P, R> StoryStepRunner<D, I, P, R>
where
    D: ChatDriver,
    I: ImageRenderer,
    P: Publisher,
    R: StateRepository,
{
    /// Creates a runner from its collaborators and the deployment config.
    pub fn new(
        generator: StoryGenerator<D>,
        renderer: Option<I>,
        publisher: P,
        repository: R,
        config: &StoryBotConfig,
    ) -> Self {
        Self {
            generator,
            renderer,
            publisher,
            repository,
            poll_question: config.poll_question.clone(),
            image_style: config.image_style.clone(),
            require_image: config.require_image,
        }
    }

    /// Run one story step.
    #[instrument(skip(self))]
    pub async fn run(&self) -> FabulaResult<StepOutcome> {
        debug!(phase = %StepPhase::Loading, "Entering phase");
        let state = self
            .repository
            .load()
            .await
            .map_err(abort(StepPhase::Loading))?;

        if state.finished {
            info!("Story already concluded, nothing to do");
            return Ok(StepOutcome::AlreadyFinished);
        }

        debug!(phase = %StepPhase::ClosingPriorPoll, "Entering phase");
        let poll_outcome = self
            .publisher
            .close_poll(state.last_poll_message_id)
            .await
            .map_err(abort(StepPhase::ClosingPriorPoll))?;
        let prior_choice = poll_outcome.map(|outcome| outcome.winner);

        debug!(phase = %StepPhase::GeneratingText, "Entering phase");
        let step = self
            .generator
            .continue_story(&state.text, prior_choice.as_deref())
            .await
            .map_err(abort(StepPhase::GeneratingText))?;

        debug!(phase = %StepPhase::GeneratingImage, "Entering phase");
        let image = self
            .render_illustration(&state, &step)
            .await
            .map_err(abort(StepPhase::GeneratingImage))?;

        debug!(phase = %StepPhase::Publishing, "Entering phase");
        let message_id = self
            .publisher
            .publish(&step.continuation, image.as_deref())
            .await
            .map_err(abort(StepPhase::Publishing))?;

        let poll_message_id = if step.is_ending {
            info!("Story concluded, no new poll");
            None
        } else {
            let id = self
                .publisher
                .open_poll(&self.poll_question, &step.poll_options, Some(message_id))
                .await
                .map_err(abort(StepPhase::Publishing))?;
            Some(id)
        };

        debug!(phase = %StepPhase::Saving, "Entering phase");
        let text = if state.is_fresh() {
            step.continuation.clone()
        } else {
            format!("{}\n\n{}", state.text, step.continuation)
        };
        let new_state = StoryState {
            text,
            last_poll_message_id: poll_message_id,
            finished: step.is_ending,
        };
        self.repository
            .save(&new_state)
            .await
            .map_err(abort(StepPhase::Saving))?;

        info!(phase = %StepPhase::Done, message_id, finished = step.is_ending, "Story step complete");
        Ok(StepOutcome::Published {
            message_id,
            poll_message_id,
            finished: step.is_ending,
        })
    }

    async fn render_illustration(
        &self,
        state: &StoryState,
        step: &StoryStep,
    ) -> FabulaResult<Option<Vec<u8>>> {
        let Some(renderer) = &self.renderer else {
            debug!("No image provider configured, publishing text-only");
            return Ok(None);
        };

        // The opening premise is posted bare; illustrations start with the
        // first generated scene
        if state.is_fresh() {
            return Ok(None);
        }

        let prompt = match self
            .generator
            .image_prompt(&step.continuation, &self.image_style)
            .await
        {
            Ok(prompt) => prompt,
            Err(e) if !self.require_image => {
                warn!(error = %e, "Image prompt derivation failed, using the scene text");
                step.continuation.clone()
            }
            Err(e) => return Err(e),
        };

        match renderer.render(&prompt).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if !self.require_image => {
                warn!(error = %e, "Illustration rendering failed, publishing text-only");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn abort(phase: StepPhase) -> impl FnOnce(FabulaError) -> FabulaError {
    move |e| {
        error!(phase = %StepPhase::Aborted, failed_in = %phase, error = %e, "Step aborted");
        e
    }
}
