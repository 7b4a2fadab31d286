//! # Lesson Task Execution Engine
//!
//! The core of the tutorial engine: task scripting and completion
//! ([`TaskContext`]), lesson sequencing ([`Lesson`]), the action/document
//! recorder ([`ActionsRecorder`]), the session coordinator that serializes
//! recorder registration and multiplexes output ([`SessionCoordinator`]),
//! and the test-mode action simulator ([`ActionSimulator`]).

pub mod check;
pub mod coordinator;
pub mod lesson;
pub mod message;
pub mod recorder;
pub mod sample;
pub mod simulator;
pub mod task;

// Re-export main types for convenient access
pub use check::{Check, StateSnapshotCheck};
pub use coordinator::SessionCoordinator;
pub use lesson::{Lesson, LessonBuilder, TaskFn};
pub use message::{action_ref, Message, MessagePart};
pub use recorder::ActionsRecorder;
pub use sample::{parse_lesson_sample, LessonSample, START_TAG};
pub use simulator::ActionSimulator;
pub use task::TaskContext;
