use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use tracing::debug;

use super::check::Check;
use crate::completion::CompletionHandle;
use crate::constants::events;
use crate::events::EventPublisher;
use crate::workspace::{ActionEvent, ActionObserver, Document, DocumentChange, DocumentListener, Project};

struct ExpectedActions {
    remaining: HashSet<String>,
    observed: Vec<String>,
    handle: CompletionHandle<Vec<String>>,
}

struct RegisteredCheck {
    check: Arc<dyn Check>,
    handle: CompletionHandle<bool>,
}

/// Recorder on the action-dispatch and document-change pipelines.
///
/// Bound to exactly one (project, document) pair for its lifetime; created
/// per task and registered through the session coordinator, which guarantees
/// a single live recorder per document. Event intake happens synchronously on
/// the dispatching thread; handles resolve inside those callbacks. A detached
/// recorder drops all further events.
pub struct ActionsRecorder {
    project: Arc<Project>,
    document: Arc<Document>,
    events: EventPublisher,
    expected: Mutex<Vec<ExpectedActions>>,
    checks: Mutex<Vec<RegisteredCheck>>,
    detached: AtomicBool,
}

impl ActionsRecorder {
    pub fn new(project: Arc<Project>, document: Arc<Document>, events: EventPublisher) -> Self {
        Self {
            project,
            document,
            events,
            expected: Mutex::new(Vec::new()),
            checks: Mutex::new(Vec::new()),
            detached: AtomicBool::new(false),
        }
    }

    pub fn project(&self) -> &Arc<Project> {
        &self.project
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Await one observation of every id in `action_ids`.
    ///
    /// The handle resolves with the ids in the order they were actually
    /// observed, once each requested id has been seen at least once while the
    /// recorder is live. Multiple sets may be awaited concurrently.
    pub fn futures_actions(&self, action_ids: &[String]) -> CompletionHandle<Vec<String>> {
        let handle = CompletionHandle::new();
        let remaining: HashSet<String> = action_ids.iter().cloned().collect();
        if remaining.is_empty() {
            handle.resolve(Vec::new());
            return handle;
        }
        self.expected.lock().push(ExpectedActions {
            remaining,
            observed: Vec::new(),
            handle: handle.clone(),
        });
        handle
    }

    /// Register a state check; re-evaluated on every document change until it
    /// first passes. The caller is responsible for having captured the
    /// check's "before" snapshot.
    pub fn future_check(&self, check: Arc<dyn Check>) -> CompletionHandle<bool> {
        let handle = CompletionHandle::new();
        self.checks.lock().push(RegisteredCheck {
            check,
            handle: handle.clone(),
        });
        handle
    }

    /// Whether every registered handle has resolved
    pub fn is_done(&self) -> bool {
        self.expected.lock().iter().all(|e| e.handle.is_resolved())
            && self.checks.lock().iter().all(|c| c.handle.is_resolved())
    }

    /// Stop consuming events. Called by the coordinator on supersession or
    /// task teardown; a detached recorder never resolves from stale delivery.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }
}

impl ActionObserver for ActionsRecorder {
    fn after_action(&self, event: &ActionEvent) {
        if self.is_detached() {
            return;
        }

        let mut completed: Vec<Vec<String>> = Vec::new();
        {
            let mut expected = self.expected.lock();
            for set in expected.iter_mut() {
                if set.handle.is_resolved() {
                    continue;
                }
                if set.remaining.remove(&event.action_id) {
                    set.observed.push(event.action_id.clone());
                    if set.remaining.is_empty() && set.handle.resolve(set.observed.clone()) {
                        completed.push(set.observed.clone());
                    }
                }
            }
        }

        for observed in completed {
            debug!(actions = ?observed, "Expected actions observed");
            self.events
                .publish(events::ACTION_OBSERVED, json!({ "actions": observed }));
        }
    }
}

impl DocumentListener for ActionsRecorder {
    fn document_changed(&self, change: &DocumentChange) {
        if self.is_detached() {
            return;
        }

        // Snapshot the pending checks, then evaluate outside the collection
        // lock; checks take their own read-consistent document snapshots.
        let pending: Vec<(Arc<dyn Check>, CompletionHandle<bool>)> = self
            .checks
            .lock()
            .iter()
            .filter(|c| !c.handle.is_resolved())
            .map(|c| (c.check.clone(), c.handle.clone()))
            .collect();

        for (check, handle) in pending {
            if check.check() && handle.resolve(true) {
                debug!(version = change.version, "State check satisfied");
                self.events.publish(
                    events::CHECK_SATISFIED,
                    json!({ "document_version": change.version }),
                );
            }
        }
    }
}
