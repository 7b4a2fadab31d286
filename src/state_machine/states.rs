use serde::{Deserialize, Serialize};
use std::fmt;

/// Lesson state definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonState {
    /// Initial state before the session coordinator has started the lesson
    NotStarted,
    /// Lesson task sequence is being executed
    Open,
    /// Lesson completed; terminal and monotonic (never reverts)
    Passed,
}

impl LessonState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if this is an active state (lesson is being executed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for LessonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Open => write!(f, "open"),
            Self::Passed => write!(f, "passed"),
        }
    }
}

impl std::str::FromStr for LessonState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "open" => Ok(Self::Open),
            "passed" => Ok(Self::Passed),
            _ => Err(format!("Invalid lesson state: {s}")),
        }
    }
}

/// Default state for new lessons
impl Default for LessonState {
    fn default() -> Self {
        Self::NotStarted
    }
}
