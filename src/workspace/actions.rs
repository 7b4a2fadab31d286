use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use super::editor::Editor;
use super::project::Project;
use crate::error::{Result, TrainerError};

/// Context an action executes against: the focused project and editor
#[derive(Clone)]
pub struct ActionContext {
    pub project: Arc<Project>,
    pub editor: Arc<Editor>,
}

/// Notification describing a dispatched action
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub action_id: String,
    pub dispatched_at: chrono::DateTime<chrono::Utc>,
}

impl ActionEvent {
    fn new(action_id: &str) -> Self {
        Self {
            action_id: action_id.to_string(),
            dispatched_at: chrono::Utc::now(),
        }
    }
}

/// An executable editor action
pub trait ActionHandler: Send + Sync {
    fn perform(&self, context: &ActionContext) -> Result<()>;
}

struct FnActionHandler<F>(F);

impl<F> ActionHandler for FnActionHandler<F>
where
    F: Fn(&ActionContext) -> Result<()> + Send + Sync,
{
    fn perform(&self, context: &ActionContext) -> Result<()> {
        (self.0)(context)
    }
}

/// Observer on the action-dispatch pipeline.
///
/// Notified synchronously on the dispatching thread, in attach order, around
/// every performed action.
pub trait ActionObserver: Send + Sync {
    fn before_action(&self, _event: &ActionEvent) {}
    fn after_action(&self, event: &ActionEvent);
}

/// Action-dispatch pipeline: named handlers, observers, and the focused
/// context. Real input and the test-mode simulator go through the same
/// [`perform_action`](ActionDispatcher::perform_action) path, pre/post
/// notifications included.
pub struct ActionDispatcher {
    handlers: DashMap<String, Arc<dyn ActionHandler>>,
    observers: RwLock<Vec<(Uuid, Arc<dyn ActionObserver>)>>,
    focused: Mutex<Option<ActionContext>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            observers: RwLock::new(Vec::new()),
            focused: Mutex::new(None),
        }
    }

    /// Register the handler for `action_id`, replacing any previous one
    pub fn register_action(&self, action_id: impl Into<String>, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(action_id.into(), handler);
    }

    /// Register a closure as the handler for `action_id`
    pub fn register_action_fn<F>(&self, action_id: impl Into<String>, f: F)
    where
        F: Fn(&ActionContext) -> Result<()> + Send + Sync + 'static,
    {
        self.register_action(action_id, Arc::new(FnActionHandler(f)));
    }

    pub fn set_focused_context(&self, context: ActionContext) {
        *self.focused.lock() = Some(context);
    }

    pub fn clear_focused_context(&self) {
        *self.focused.lock() = None;
    }

    pub fn focused_context(&self) -> Option<ActionContext> {
        self.focused.lock().clone()
    }

    /// Attach an observer under `token`
    pub fn add_observer(&self, token: Uuid, observer: Arc<dyn ActionObserver>) {
        self.observers.write().push((token, observer));
    }

    /// Detach the observer registered under `token`
    pub fn remove_observer(&self, token: Uuid) {
        self.observers.write().retain(|(t, _)| *t != token);
    }

    /// Perform `action_id` against the focused context.
    ///
    /// Fires before-action notifications, runs the handler, fires
    /// after-action notifications. Errors on an unknown action id or when no
    /// context is focused.
    pub fn perform_action(&self, action_id: &str) -> Result<()> {
        let handler = self
            .handlers
            .get(action_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TrainerError::UnknownAction(action_id.to_string()))?;
        let context = self
            .focused
            .lock()
            .clone()
            .ok_or(TrainerError::NoFocusedContext)?;

        let event = ActionEvent::new(action_id);
        let observers: Vec<Arc<dyn ActionObserver>> = self
            .observers
            .read()
            .iter()
            .map(|(_, o)| o.clone())
            .collect();

        for observer in &observers {
            observer.before_action(&event);
        }
        handler.perform(&context)?;
        for observer in &observers {
            observer.after_action(&event);
        }
        Ok(())
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
