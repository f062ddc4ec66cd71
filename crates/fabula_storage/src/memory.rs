//! In-memory state repository for tests.

use crate::{StateRepository, StoryState};
use async_trait::async_trait;
use fabula_error::FabulaResult;
use std::sync::Mutex;

/// In-memory fake of [`StateRepository`].
///
/// Useful in tests and anywhere real storage must not be touched. The
/// `snapshot` accessor exposes what was persisted so tests can assert on
/// mutations (or their absence).
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    saved: Mutex<Option<StoryState>>,
    dry_run: bool,
}

impl MemoryStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing record.
    pub fn with_state(state: StoryState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
            dry_run: false,
        }
    }

    /// Create a store whose `save` is a no-op, mirroring dry-run file stores.
    pub fn dry_run() -> Self {
        Self {
            saved: Mutex::new(None),
            dry_run: true,
        }
    }

    /// The last record persisted, if any.
    pub fn snapshot(&self) -> Option<StoryState> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateRepository for MemoryStateStore {
    async fn load(&self) -> FabulaResult<StoryState> {
        Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, state: &StoryState) -> FabulaResult<()> {
        if self.dry_run {
            return Ok(());
        }
        *self.saved.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}
