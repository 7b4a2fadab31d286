use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{Result, TrainerError};

/// Notification delivered to listeners after a document command commits
#[derive(Debug, Clone)]
pub struct DocumentChange {
    /// Document version after the change
    pub version: u64,
    /// Label of the command that produced the change
    pub label: String,
}

/// Listener on the document-change pipeline.
///
/// Called synchronously on the mutating thread, after the edit has committed
/// and the write lock has been released; listeners may take read-consistent
/// snapshots of the document.
pub trait DocumentListener: Send + Sync {
    fn document_changed(&self, change: &DocumentChange);
}

struct DocumentState {
    text: String,
    version: u64,
}

struct UndoEntry {
    label: String,
    before: String,
}

/// Text buffer with command-wrapped mutation.
///
/// Every mutation runs as a single atomic, undo-visible command: one coalesced
/// entry on the undo stack, change listeners notified once per command, never
/// mid-edit. Reads take a consistent snapshot under the read lock.
pub struct Document {
    state: RwLock<DocumentState>,
    undo_stack: Mutex<Vec<UndoEntry>>,
    listeners: RwLock<Vec<(Uuid, Arc<dyn DocumentListener>)>>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(DocumentState {
                text: text.into(),
                version: 0,
            }),
            undo_stack: Mutex::new(Vec::new()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Current text (cloned snapshot)
    pub fn text(&self) -> String {
        self.state.read_recursive().text.clone()
    }

    /// Document length in bytes
    pub fn len(&self) -> usize {
        self.state.read_recursive().text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Version counter; incremented once per committed command
    pub fn version(&self) -> u64 {
        self.state.read_recursive().version
    }

    /// Run `f` against a read-consistent snapshot of the text.
    ///
    /// The read lock is recursive so checks may nest snapshot reads.
    pub fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let state = self.state.read_recursive();
        f(&state.text)
    }

    /// Replace the entire document content as one undoable command
    pub fn replace_all(&self, label: impl Into<String>, text: &str) {
        self.run_command(label, |current| {
            *current = text.to_string();
        });
    }

    /// Insert `text` at byte `offset` as one undoable command
    pub fn insert(&self, offset: usize, text: &str) -> Result<()> {
        {
            let state = self.state.read_recursive();
            if offset > state.text.len() || !state.text.is_char_boundary(offset) {
                return Err(TrainerError::Document(format!(
                    "insert offset {offset} out of bounds for document of length {}",
                    state.text.len()
                )));
            }
        }
        self.run_command("insert", |current| {
            current.insert_str(offset, text);
        });
        Ok(())
    }

    /// Undo the most recent command.
    ///
    /// Restores the pre-command text in exactly one step and notifies change
    /// listeners. Errors when there is nothing to undo.
    pub fn undo(&self) -> Result<()> {
        let entry = self
            .undo_stack
            .lock()
            .pop()
            .ok_or_else(|| TrainerError::Document("nothing to undo".to_string()))?;

        let change = {
            let mut state = self.state.write();
            state.text = entry.before;
            state.version += 1;
            DocumentChange {
                version: state.version,
                label: format!("undo {}", entry.label),
            }
        };
        self.notify_listeners(&change);
        Ok(())
    }

    /// Number of entries on the undo stack
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.lock().len()
    }

    /// Attach a change listener under `token`
    pub fn add_listener(&self, token: Uuid, listener: Arc<dyn DocumentListener>) {
        self.listeners.write().push((token, listener));
    }

    /// Detach the listener registered under `token`
    pub fn remove_listener(&self, token: Uuid) {
        self.listeners.write().retain(|(t, _)| *t != token);
    }

    fn run_command(&self, label: impl Into<String>, f: impl FnOnce(&mut String)) {
        let label = label.into();
        let change = {
            let mut state = self.state.write();
            let before = state.text.clone();
            f(&mut state.text);
            state.version += 1;
            self.undo_stack.lock().push(UndoEntry {
                label: label.clone(),
                before,
            });
            DocumentChange {
                version: state.version,
                label,
            }
        };
        // Listeners run outside the write lock so they can take snapshots
        self.notify_listeners(&change);
    }

    fn notify_listeners(&self, change: &DocumentChange) {
        let listeners: Vec<Arc<dyn DocumentListener>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener.document_changed(change);
        }
    }
}
