#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Trainer Core
//!
//! Core engine of an interactive, in-editor tutorial system. Lessons are
//! ordered scripts of tasks; each task shows instructional text, optionally
//! mutates the document, and registers completion conditions — expected
//! editor actions and before/after state checks — that must resolve before
//! the lesson advances.
//!
//! ## Architecture
//!
//! A task body runs synchronously against [`TaskContext`]; the conditions it
//! registers are resolved asynchronously by an [`ActionsRecorder`] observing
//! the host's action-dispatch and document-change pipelines. The
//! [`SessionCoordinator`] keeps exactly one recorder live per document and
//! multiplexes instructional messages and lifecycle events to subscribers.
//! In test mode an [`ActionSimulator`] injects the same dispatch events a
//! real user would produce, so lessons run headless end-to-end.
//!
//! ## Module Organization
//!
//! - [`learning`] - task/lesson execution engine, recorder, coordinator
//! - [`workspace`] - in-process host model: project, document, editor, actions
//! - [`state_machine`] - lesson lifecycle state management
//! - [`completion`] - one-shot completion handles
//! - [`events`] - lifecycle event stream
//! - [`registry`] - lesson id -> factory registration
//! - [`course`] - module grouping and language filtering
//! - [`config`] - configuration management
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use trainer_core::config::TrainerConfig;
//! use trainer_core::learning::{Lesson, SessionCoordinator};
//! use trainer_core::workspace::Workspace;
//!
//! # async fn example() -> trainer_core::Result<()> {
//! let workspace = Workspace::new("learn-project", "ruby");
//! let coordinator = SessionCoordinator::new(
//!     TrainerConfig::for_simulated_input(Duration::from_millis(5)),
//!     workspace,
//! );
//!
//! let lesson = Lesson::builder("Comment line", "Editor Basics", "ruby")
//!     .trigger_task("CommentByLineComment", |ctx, action| {
//!         ctx.text(&format!("Comment out any line with {}", ctx.action(action)));
//!         Ok(())
//!     })
//!     .build()?;
//!
//! lesson.clone().run(&coordinator).await?;
//! assert!(lesson.passed());
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod config;
pub mod constants;
pub mod course;
pub mod error;
pub mod events;
pub mod learning;
pub mod logging;
pub mod registry;
pub mod state_machine;
pub mod workspace;

pub use completion::CompletionHandle;
pub use config::{ConfigManager, TrainerConfig};
pub use error::{Result, TrainerError};
pub use events::{EventPublisher, PublishedEvent};
pub use learning::{
    ActionSimulator, ActionsRecorder, Check, Lesson, LessonBuilder, Message, MessagePart,
    SessionCoordinator, StateSnapshotCheck, TaskContext,
};
pub use logging::init_structured_logging;
pub use registry::LessonRegistry;
pub use state_machine::{LessonEvent, LessonState, LessonStateMachine};
pub use workspace::{
    ActionContext, ActionDispatcher, ActionEvent, ActionHandler, ActionObserver, Document,
    DocumentChange, DocumentListener, Editor, Keymap, Project, Workspace,
};
