use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use super::check::{Check, StateSnapshotCheck};
use super::coordinator::SessionCoordinator;
use super::lesson::Lesson;
use super::message::action_ref;
use super::recorder::ActionsRecorder;
use crate::completion::CompletionHandle;
use crate::error::{Result, TrainerError};
use crate::workspace::{Editor, Project};

/// Per-task execution context and scripting surface.
///
/// A task body runs synchronously against this context: it emits text,
/// mutates the document, and registers completion conditions. The task is
/// complete once every registered check-handle and trigger-handle has
/// resolved; checks are awaited strictly before triggers.
pub struct TaskContext {
    lesson: Arc<Lesson>,
    coordinator: Arc<SessionCoordinator>,
    project: Arc<Project>,
    editor: Arc<Editor>,
    recorder: Option<Arc<ActionsRecorder>>,
    check_handles: Vec<CompletionHandle<bool>>,
    trigger_handles: Vec<CompletionHandle<Vec<String>>>,
}

impl TaskContext {
    pub(crate) fn new(lesson: Arc<Lesson>, coordinator: Arc<SessionCoordinator>) -> Self {
        let workspace = coordinator.workspace().clone();
        Self {
            lesson,
            coordinator,
            project: workspace.project,
            editor: workspace.editor,
            recorder: None,
            check_handles: Vec::new(),
            trigger_handles: Vec::new(),
        }
    }

    /// Emit instructional text to the message stream.
    ///
    /// Fire-and-forget: the message is parsed, action references are resolved
    /// to shortcut names, and emission never blocks task completion.
    pub fn text(&self, message: &str) {
        self.coordinator.add_message(message);
    }

    /// Markup referencing `action_id` inside message text
    pub fn action(&self, action_id: &str) -> String {
        action_ref(action_id)
    }

    /// Replace the document content with `code` as one atomic, undo-visible
    /// command; document caches are committed before this returns.
    pub fn copy_code(&self, code: &str) {
        self.editor.document().replace_all("copy code", code);
    }

    /// Move the caret to a byte offset
    pub fn caret(&self, offset: usize) -> Result<()> {
        self.editor.move_caret(offset)
    }

    /// Move the caret to a 1-based (line, column) position
    pub fn caret_position(&self, line: usize, column: usize) -> Result<()> {
        self.editor.move_caret_to_position(line, column)
    }

    /// Move the caret to the first occurrence of `text`, searching from the
    /// document start. A missing match is a reported failure, not a no-op.
    pub fn caret_at(&self, text: &str) -> Result<()> {
        let offset = self
            .editor
            .search_offset(text)
            .ok_or_else(|| TrainerError::SearchNotFound {
                pattern: text.to_string(),
            })?;
        self.editor.move_caret(offset)
    }

    /// Register a single expected action
    pub fn trigger(&mut self, action_id: &str) {
        self.triggers(&[action_id]);
    }

    /// Register a set of expected actions; the resulting handle resolves once
    /// every id has been observed. Returns immediately. In test mode the ids
    /// are also handed to the action simulator.
    pub fn triggers(&mut self, action_ids: &[&str]) {
        let ids: Vec<String> = action_ids.iter().map(|s| s.to_string()).collect();
        let recorder = self.ensure_recorder();
        self.trigger_handles.push(recorder.futures_actions(&ids));
        self.coordinator.simulate_actions(ids);
    }

    /// Register a state check: bind it, capture its "before" snapshot
    /// eagerly, and await its first success.
    pub fn check(&mut self, check: Arc<dyn Check>) {
        let recorder = self.ensure_recorder();
        check.set(&self.project, &self.editor);
        check.before();
        self.check_handles.push(recorder.future_check(check));
    }

    /// Convenience overload building an anonymous check from a state-capture
    /// closure and a comparison predicate; both run under a read-consistent
    /// document snapshot.
    pub fn check_state<T, C, P>(&mut self, capture: C, compare: P)
    where
        T: Send + 'static,
        C: Fn() -> T + Send + Sync + 'static,
        P: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.check(Arc::new(StateSnapshotCheck::new(
            self.editor.clone(),
            capture,
            compare,
        )));
    }

    /// Block until every registered handle has resolved: all check-handles
    /// strictly before all trigger-handles. Must run off the event-dispatch
    /// thread; resolution arrives synchronously inside dispatch callbacks.
    pub(crate) async fn await_all(self) -> Result<()> {
        let lesson = self.lesson.name().to_string();
        if !self.check_handles.is_empty() {
            debug!(lesson = %lesson, checks = self.check_handles.len(), "Waiting for state checks");
            join_all(self.check_handles.iter().map(CompletionHandle::wait)).await;
        }
        if !self.trigger_handles.is_empty() {
            debug!(lesson = %lesson, triggers = self.trigger_handles.len(), "Waiting for triggers");
            let observed = join_all(self.trigger_handles.iter().map(CompletionHandle::wait)).await;
            debug!(lesson = %lesson, actions = ?observed, "All triggers observed");
        }
        Ok(())
    }

    fn ensure_recorder(&mut self) -> Arc<ActionsRecorder> {
        if let Some(recorder) = &self.recorder {
            return recorder.clone();
        }
        let recorder = Arc::new(ActionsRecorder::new(
            self.project.clone(),
            self.editor.document().clone(),
            self.coordinator.events().clone(),
        ));
        self.coordinator.register_recorder(&recorder);
        self.recorder = Some(recorder.clone());
        recorder
    }
}
