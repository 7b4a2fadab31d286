use serde::{Deserialize, Serialize};

/// Events that can trigger lesson state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonEvent {
    /// Begin executing the lesson's task sequence
    Open,
    /// Mark the lesson as passed
    Pass,
}

impl LessonEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pass => "pass",
        }
    }

    /// Check if this event represents a terminal transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Pass)
    }
}
