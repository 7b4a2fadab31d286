use std::sync::Arc;

use parking_lot::Mutex;

use crate::workspace::{Editor, Project};

/// A before/after state predicate over editor or document state.
///
/// Three operations: bind to the context it will inspect, capture a "before"
/// snapshot (called exactly once, at registration), and evaluate whether the
/// desired condition now holds. Custom multi-step checks (structural document
/// analysis) implement this directly; simple value comparisons use
/// [`StateSnapshotCheck`].
pub trait Check: Send + Sync {
    /// Bind to the project/editor the check will inspect. Checks that carry
    /// their context themselves need not override this.
    fn set(&self, _project: &Arc<Project>, _editor: &Arc<Editor>) {}

    /// Capture the "before" snapshot
    fn before(&self);

    /// Whether the desired condition now holds
    fn check(&self) -> bool;
}

/// Anonymous check built from a capture closure and a comparison predicate.
///
/// Capture runs under the bound document's read lock, so both the "before"
/// snapshot and every re-evaluation see a consistent document, never a
/// mid-edit state.
pub struct StateSnapshotCheck<T> {
    editor: Arc<Editor>,
    capture: Box<dyn Fn() -> T + Send + Sync>,
    compare: Box<dyn Fn(&T, &T) -> bool + Send + Sync>,
    before: Mutex<Option<T>>,
}

impl<T: Send + 'static> StateSnapshotCheck<T> {
    pub fn new(
        editor: Arc<Editor>,
        capture: impl Fn() -> T + Send + Sync + 'static,
        compare: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            editor,
            capture: Box::new(capture),
            compare: Box::new(compare),
            before: Mutex::new(None),
        }
    }

    fn capture_consistent(&self) -> T {
        self.editor.document().with_text(|_text| (self.capture)())
    }
}

impl<T: Send + 'static> Check for StateSnapshotCheck<T> {
    fn before(&self) {
        *self.before.lock() = Some(self.capture_consistent());
    }

    fn check(&self) -> bool {
        let now = self.capture_consistent();
        let before = self.before.lock();
        match &*before {
            Some(before) => (self.compare)(before, &now),
            // Not captured yet; the condition cannot be evaluated
            None => false,
        }
    }
}
