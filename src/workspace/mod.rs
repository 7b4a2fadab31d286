//! # Workspace Model
//!
//! In-process model of the host editor the engine drives: a project, a
//! document with undo-visible command mutation and change listeners, an
//! editor with a caret, and the action-dispatch pipeline. Lessons script
//! against these types; the recorder observes them.

pub mod actions;
pub mod document;
pub mod editor;
pub mod keymap;
pub mod project;

use std::sync::Arc;

pub use actions::{
    ActionContext, ActionDispatcher, ActionEvent, ActionHandler, ActionObserver,
};
pub use document::{Document, DocumentChange, DocumentListener};
pub use editor::Editor;
pub use keymap::Keymap;
pub use project::Project;

/// Fully wired workspace: one project, one document, one editor, and the
/// action-dispatch pipeline with the editor as the focused context.
#[derive(Clone)]
pub struct Workspace {
    pub project: Arc<Project>,
    pub document: Arc<Document>,
    pub editor: Arc<Editor>,
    pub dispatcher: Arc<ActionDispatcher>,
    pub keymap: Arc<Keymap>,
}

impl Workspace {
    /// Build a workspace for `project_name` in language `lang` with an empty
    /// document focused for action dispatch.
    pub fn new(project_name: impl Into<String>, lang: impl Into<String>) -> Self {
        let project = Arc::new(Project::new(project_name, lang));
        let document = Arc::new(Document::new(""));
        let editor = Arc::new(Editor::new(document.clone()));
        let dispatcher = Arc::new(ActionDispatcher::new());
        dispatcher.set_focused_context(ActionContext {
            project: project.clone(),
            editor: editor.clone(),
        });

        Self {
            project,
            document,
            editor,
            dispatcher,
            keymap: Arc::new(Keymap::new()),
        }
    }
}
