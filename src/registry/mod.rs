//! # Registry Infrastructure
//!
//! Explicit registration tables populated at startup. Lesson implementations
//! are resolved through [`LessonRegistry`] by identifier — a registration
//! table, not runtime reflection — so an unknown or malformed lesson id fails
//! loudly at resolution time.

pub mod lesson_registry;

pub use lesson_registry::{LessonFactory, LessonRegistry, RegistryStats};
