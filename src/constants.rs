//! # System Constants
//!
//! Core constants that define the operational boundaries of the tutorial
//! engine: lifecycle event names published on the event stream and
//! system-wide defaults.

/// Lifecycle events published by the engine while a lesson session runs
pub mod events {
    // Lesson lifecycle events
    pub const LESSON_OPENED: &str = "lesson.opened";
    pub const LESSON_EXERCISE_PASSED: &str = "lesson.exercise_passed";
    pub const LESSON_PASSED: &str = "lesson.passed";

    // Recorder events
    pub const ACTION_OBSERVED: &str = "recorder.action_observed";
    pub const CHECK_SATISFIED: &str = "recorder.check_satisfied";
    pub const RECORDER_SUPERSEDED: &str = "recorder.superseded";
}

/// System-wide defaults
pub mod system {
    /// Delay before each simulated action dispatch in test mode. Sized so a
    /// real UI dispatch queue has settled before the synthetic event lands.
    pub const DEFAULT_DISPATCH_DELAY_MS: u64 = 2000;

    /// Capacity of broadcast channels carrying lifecycle events and messages
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

    /// Environment variable consulted for environment detection
    pub const ENV_VAR: &str = "TRAINER_ENV";

    /// Environment variable overriding the configuration file path
    pub const CONFIG_PATH_VAR: &str = "TRAINER_CONFIG_PATH";
}
