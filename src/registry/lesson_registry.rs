//! # Lesson Registry
//!
//! Maps lesson identifiers to constructor functions. Modules register their
//! lesson factories at startup; the UI layer resolves lessons by id when the
//! user selects one.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::error::{Result, TrainerError};
use crate::learning::Lesson;

/// Constructor for a lesson implementation
pub type LessonFactory = Arc<dyn Fn() -> Result<Arc<Lesson>> + Send + Sync>;

/// Registry statistics
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_lessons: usize,
    pub lesson_ids: Vec<String>,
}

/// Thread-safe lesson registry
pub struct LessonRegistry {
    factories: DashMap<String, LessonFactory>,
}

impl LessonRegistry {
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Register a factory under `lesson_id`, replacing any previous
    /// registration for the same id.
    pub fn register(&self, lesson_id: impl Into<String>, factory: LessonFactory) {
        let lesson_id = lesson_id.into();
        if self.factories.insert(lesson_id.clone(), factory).is_some() {
            warn!(lesson = %lesson_id, "Replacing existing lesson registration");
        } else {
            debug!(lesson = %lesson_id, "Lesson registered");
        }
    }

    /// Register a closure as the factory for `lesson_id`
    pub fn register_fn<F>(&self, lesson_id: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<Lesson>> + Send + Sync + 'static,
    {
        self.register(lesson_id, Arc::new(factory));
    }

    /// Construct the lesson registered under `lesson_id`.
    ///
    /// Unknown ids and factory failures are reported, never skipped.
    pub fn resolve(&self, lesson_id: &str) -> Result<Arc<Lesson>> {
        let factory = self
            .factories
            .get(lesson_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                TrainerError::Lesson(format!("no lesson registered under id '{lesson_id}'"))
            })?;
        factory()
    }

    pub fn contains(&self, lesson_id: &str) -> bool {
        self.factories.contains_key(lesson_id)
    }

    pub fn stats(&self) -> RegistryStats {
        let mut lesson_ids: Vec<String> =
            self.factories.iter().map(|e| e.key().clone()).collect();
        lesson_ids.sort();
        RegistryStats {
            total_lessons: lesson_ids.len(),
            lesson_ids,
        }
    }
}

impl Default for LessonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_lesson() -> Result<Arc<Lesson>> {
        Lesson::builder("Select", "Editor Basics", "ruby")
            .task(|_ctx| Ok(()))
            .build()
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = LessonRegistry::new();
        registry.register_fn("editor.select", select_lesson);

        let lesson = registry.resolve("editor.select").unwrap();
        assert_eq!(lesson.name(), "Select");
        assert!(registry.contains("editor.select"));
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let registry = LessonRegistry::new();
        assert!(matches!(
            registry.resolve("missing"),
            Err(TrainerError::Lesson(_))
        ));
    }

    #[test]
    fn test_factory_failure_propagates() {
        let registry = LessonRegistry::new();
        // A malformed lesson (no tasks) must fail resolution, not be skipped
        registry.register_fn("broken", || {
            Lesson::builder("Broken", "m", "ruby").build()
        });
        assert!(registry.resolve("broken").is_err());
    }

    #[test]
    fn test_stats_lists_registrations() {
        let registry = LessonRegistry::new();
        registry.register_fn("b.lesson", select_lesson);
        registry.register_fn("a.lesson", select_lesson);

        let stats = registry.stats();
        assert_eq!(stats.total_lessons, 2);
        assert_eq!(stats.lesson_ids, vec!["a.lesson", "b.lesson"]);
    }
}
