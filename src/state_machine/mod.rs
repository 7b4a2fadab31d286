// State machine module for lesson lifecycle management
//
// Lesson progress is a small, strictly monotonic machine: a lesson opens
// once, passes once, and never reverts.

pub mod events;
pub mod machine;
pub mod states;

// Re-export main types for convenient access
pub use events::LessonEvent;
pub use machine::{LessonStateMachine, TransitionOutcome};
pub use states::LessonState;
