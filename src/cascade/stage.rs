//! One link of the cascade: a list that is loaded for a trigger value.
//!
//! Every load is tagged with a [`RequestToken`]. Starting a new load or
//! resetting the stage bumps the generation, so a response that comes back
//! for an older token no longer matches and is dropped.

use crate::error::LoadError;

/// Load state of a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageState<T> {
    Idle,
    Loading,
    Ready(Vec<T>),
    Error(LoadError),
}

/// Identifies one load request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestToken {
    generation: u64,
    trigger: String,
}

impl RequestToken {
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result became the stage's state.
    Applied,
    /// A newer trigger superseded the request; the result was dropped.
    Stale,
    /// No request was issued and the stage was cleared.
    Cleared,
}

#[derive(Debug, Clone)]
pub struct Stage<T> {
    state: StageState<T>,
    generation: u64,
    trigger: Option<String>,
}

impl<T> Default for Stage<T> {
    fn default() -> Self {
        Self {
            state: StageState::Idle,
            generation: 0,
            trigger: None,
        }
    }
}

impl<T: Clone> Stage<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes any in-flight request and enters `Loading`.
    pub fn begin(&mut self, trigger: impl Into<String>) -> RequestToken {
        self.generation += 1;
        let trigger = trigger.into();
        self.trigger = Some(trigger.clone());
        self.state = StageState::Loading;
        RequestToken {
            generation: self.generation,
            trigger,
        }
    }

    /// Supersedes any in-flight request and returns to `Idle`.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.trigger = None;
        self.state = StageState::Idle;
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        token.generation == self.generation && self.trigger.as_deref() == Some(&token.trigger)
    }

    /// Applies a completed load if its token is still current. A failure
    /// leaves the stage in `Error` with an empty list, never in `Loading`.
    pub fn resolve(
        &mut self,
        token: &RequestToken,
        outcome: std::result::Result<Vec<T>, LoadError>,
    ) -> Resolution {
        if !self.is_current(token) {
            return Resolution::Stale;
        }
        self.state = match outcome {
            Ok(items) => StageState::Ready(items),
            Err(err) => StageState::Error(err),
        };
        Resolution::Applied
    }

    pub fn state(&self) -> &StageState<T> {
        &self.state
    }

    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Loaded items, empty unless `Ready`.
    pub fn items(&self) -> &[T] {
        match &self.state {
            StageState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, StageState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StageState::Ready(_))
    }

    pub fn error(&self) -> Option<&LoadError> {
        match &self.state {
            StageState::Error(err) => Some(err),
            _ => None,
        }
    }
}
