//! # Course Modules
//!
//! Groups lessons into named modules and filters them by the session's
//! language. Content loading/parsing is an external collaborator; modules
//! receive already-constructed lessons.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::learning::Lesson;

/// How a module's sample project is provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    /// Lessons run against scratch files
    Scratch,
    /// Lessons run inside a dedicated sample project
    Project,
}

/// A named group of lessons
pub struct CourseModule {
    name: String,
    description: Option<String>,
    module_type: ModuleType,
    all_lessons: Vec<Arc<Lesson>>,
    /// Lessons visible for the currently selected language
    lessons: RwLock<Vec<Arc<Lesson>>>,
}

impl CourseModule {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        module_type: ModuleType,
        all_lessons: Vec<Arc<Lesson>>,
    ) -> Self {
        let lessons = all_lessons.clone();
        Self {
            name: name.into(),
            description,
            module_type,
            all_lessons,
            lessons: RwLock::new(lessons),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    /// Lessons visible for the currently selected language
    pub fn lessons(&self) -> Vec<Arc<Lesson>> {
        self.lessons.read().clone()
    }

    /// All lessons in this module whose language tag matches `lang`
    pub fn filter_lessons_by_lang(&self, lang: &str) -> Vec<Arc<Lesson>> {
        self.all_lessons
            .iter()
            .filter(|lesson| lesson.lang().eq_ignore_ascii_case(lang))
            .cloned()
            .collect()
    }

    /// Recompute the visible lesson list for `current_lang`; `None` shows all
    pub fn update(&self, current_lang: Option<&str>) {
        let filtered = match current_lang {
            Some(lang) => self.filter_lessons_by_lang(lang),
            None => self.all_lessons.clone(),
        };
        *self.lessons.write() = filtered;
    }

    /// First visible lesson that has not been passed
    pub fn give_not_passed_lesson(&self) -> Option<Arc<Lesson>> {
        self.lessons
            .read()
            .iter()
            .find(|lesson| !lesson.passed())
            .cloned()
    }

    /// First visible lesson that is neither passed nor currently open
    pub fn give_not_passed_and_not_opened_lesson(&self) -> Option<Arc<Lesson>> {
        self.lessons
            .read()
            .iter()
            .find(|lesson| !lesson.passed() && !lesson.is_open())
            .cloned()
    }

    pub fn has_not_passed_lesson(&self) -> bool {
        self.lessons.read().iter().any(|lesson| !lesson.passed())
    }
}
