use parking_lot::Mutex;

use super::events::LessonEvent;
use super::states::LessonState;
use crate::error::{Result, TrainerError};

/// Outcome of applying an event to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The machine entered a new state
    Entered(LessonState),
    /// The event was valid but the machine was already in the target state
    /// (idempotent application, no side effects should fire)
    Unchanged(LessonState),
}

impl TransitionOutcome {
    pub fn state(&self) -> LessonState {
        match self {
            Self::Entered(state) | Self::Unchanged(state) => *state,
        }
    }

    pub fn entered(&self) -> bool {
        matches!(self, Self::Entered(_))
    }
}

/// Thread-safe lesson state machine.
///
/// `Passed` is monotonic: once entered, every further event is either an
/// idempotent no-op (`Pass`, `Open`) or rejected. Callers use
/// [`TransitionOutcome::entered`] to decide whether transition side effects
/// (messages, progress events) should fire.
#[derive(Debug)]
pub struct LessonStateMachine {
    state: Mutex<LessonState>,
}

impl LessonStateMachine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LessonState::default()),
        }
    }

    /// Get the current state of the lesson
    pub fn current_state(&self) -> LessonState {
        *self.state.lock()
    }

    /// Attempt to transition the lesson state
    pub fn transition(&self, event: LessonEvent) -> Result<TransitionOutcome> {
        let mut state = self.state.lock();
        let outcome = Self::determine_target_state(*state, event)?;
        if let TransitionOutcome::Entered(target) = outcome {
            let from = *state;
            tracing::debug!(
                from = %from,
                to = %target,
                event = event.event_type(),
                "Lesson state transition"
            );
            *state = target;
        }
        Ok(outcome)
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(
        current_state: LessonState,
        event: LessonEvent,
    ) -> Result<TransitionOutcome> {
        let outcome = match (current_state, event) {
            // Open transitions
            (LessonState::NotStarted, LessonEvent::Open) => {
                TransitionOutcome::Entered(LessonState::Open)
            }
            (LessonState::Open, LessonEvent::Open) => TransitionOutcome::Unchanged(LessonState::Open),

            // Pass transitions
            (LessonState::Open, LessonEvent::Pass) => {
                TransitionOutcome::Entered(LessonState::Passed)
            }
            (LessonState::Passed, LessonEvent::Pass) => {
                TransitionOutcome::Unchanged(LessonState::Passed)
            }

            // Passed is terminal; re-opening is an idempotent no-op
            (LessonState::Passed, LessonEvent::Open) => {
                TransitionOutcome::Unchanged(LessonState::Passed)
            }

            // Invalid transitions
            (from_state, event) => {
                return Err(TrainerError::StateTransition {
                    from: from_state.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(outcome)
    }
}

impl Default for LessonStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
