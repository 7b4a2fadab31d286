use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::workspace::ActionDispatcher;

/// Test-mode action injector.
///
/// Synthesizes the action-dispatch events a real user would produce, after a
/// fixed per-action delay long enough for the real dispatch queue to settle.
/// Dispatch goes through [`ActionDispatcher::perform_action`], the same path
/// a keystroke takes, pre/post notifications included.
pub struct ActionSimulator {
    dispatcher: Arc<ActionDispatcher>,
    delay: Duration,
}

impl ActionSimulator {
    pub fn new(dispatcher: Arc<ActionDispatcher>, delay: Duration) -> Self {
        Self { dispatcher, delay }
    }

    /// Schedule `action_ids` for delayed dispatch on a background worker.
    ///
    /// A missing focused context is non-fatal: that action is skipped with a
    /// warning and the remaining ids still dispatch.
    pub fn simulate(&self, action_ids: Vec<String>) {
        let dispatcher = self.dispatcher.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            for action_id in action_ids {
                tokio::time::sleep(delay).await;

                if dispatcher.focused_context().is_none() {
                    warn!(action = %action_id, "No focused context; skipping simulated dispatch");
                    continue;
                }

                debug!(action = %action_id, "Dispatching simulated action");
                if let Err(error) = dispatcher.perform_action(&action_id) {
                    warn!(action = %action_id, %error, "Simulated dispatch failed; skipping");
                }
            }
        });
    }
}
