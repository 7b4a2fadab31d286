use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use super::lesson::Lesson;
use super::message::Message;
use super::recorder::ActionsRecorder;
use super::simulator::ActionSimulator;
use crate::config::TrainerConfig;
use crate::constants::events;
use crate::error::Result;
use crate::events::EventPublisher;
use crate::workspace::Workspace;

struct LiveRecorder {
    token: Uuid,
    recorder: Arc<ActionsRecorder>,
}

/// Tracks the active lesson, multiplexes message output, and serializes
/// recorder registration so exactly one recorder consumes the action and
/// document event streams per document at a time.
///
/// Message emission is safe from any thread; the broadcast send never blocks.
pub struct SessionCoordinator {
    config: TrainerConfig,
    workspace: Workspace,
    events: EventPublisher,
    messages: broadcast::Sender<Message>,
    current_lesson: Mutex<Option<Arc<Lesson>>>,
    live_recorder: Mutex<Option<LiveRecorder>>,
    simulator: Option<ActionSimulator>,
}

impl SessionCoordinator {
    pub fn new(config: TrainerConfig, workspace: Workspace) -> Arc<Self> {
        let events = EventPublisher::new(config.events.channel_capacity);
        let (messages, _) = broadcast::channel(config.events.channel_capacity);
        let simulator = config.test_mode.enabled.then(|| {
            ActionSimulator::new(workspace.dispatcher.clone(), config.dispatch_delay())
        });

        Arc::new(Self {
            config,
            workspace,
            events,
            messages,
            current_lesson: Mutex::new(None),
            live_recorder: Mutex::new(None),
            simulator,
        })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn events(&self) -> &EventPublisher {
        &self.events
    }

    pub fn current_lesson(&self) -> Option<Arc<Lesson>> {
        self.current_lesson.lock().clone()
    }

    /// Subscribe to the instructional message stream
    pub fn subscribe_messages(&self) -> broadcast::Receiver<Message> {
        self.messages.subscribe()
    }

    /// Parse and emit an instructional message. Callable from any thread;
    /// emission with no subscribers is acceptable.
    pub fn add_message(&self, raw: &str) {
        let message = Message::parse(raw, &self.workspace.keymap);
        if self.messages.send(message).is_err() {
            tracing::trace!("Message emitted with no subscribers");
        }
    }

    /// Register `recorder` as the live consumer of the action and document
    /// event streams.
    ///
    /// The swap is atomic under one lock: the previous recorder (resolved or
    /// abandoned) is detached before the new one attaches, so no event is
    /// dropped for the new recorder or double-delivered to the old one.
    /// Returns the registration token.
    pub fn register_recorder(&self, recorder: &Arc<ActionsRecorder>) -> Uuid {
        let mut live = self.live_recorder.lock();

        if let Some(old) = live.take() {
            old.recorder.detach();
            self.workspace.dispatcher.remove_observer(old.token);
            old.recorder.document().remove_listener(old.token);
            debug!(token = %old.token, resolved = old.recorder.is_done(), "Recorder superseded");
            self.events
                .publish(events::RECORDER_SUPERSEDED, json!({ "token": old.token }));
        }

        let token = Uuid::new_v4();
        self.workspace
            .dispatcher
            .add_observer(token, recorder.clone());
        recorder.document().add_listener(token, recorder.clone());
        *live = Some(LiveRecorder {
            token,
            recorder: recorder.clone(),
        });
        token
    }

    /// Begin a lesson: transition it to open and make it current
    pub fn start_lesson(&self, lesson: &Arc<Lesson>) -> Result<()> {
        let outcome = lesson.open()?;
        *self.current_lesson.lock() = Some(lesson.clone());
        if outcome.entered() {
            info!(lesson = %lesson.name(), module = %lesson.module(), "Lesson opened");
            self.events.publish(
                events::LESSON_OPENED,
                json!({
                    "lesson": lesson.name(),
                    "module": lesson.module(),
                    "lang": lesson.lang(),
                }),
            );
        }
        Ok(())
    }

    /// Report one task boundary; progress surfaces may update on this event
    pub fn pass_exercise(&self, lesson: &Lesson, task_index: usize) {
        debug!(lesson = %lesson.name(), task = task_index, "Exercise passed");
        self.events.publish(
            events::LESSON_EXERCISE_PASSED,
            json!({ "lesson": lesson.name(), "task": task_index }),
        );
    }

    /// Mark the lesson passed. Safe to call twice: the second call leaves the
    /// lesson passed and fires no duplicate message or event.
    pub fn pass_lesson(&self, lesson: &Arc<Lesson>) -> Result<()> {
        if lesson.pass()? {
            info!(lesson = %lesson.name(), "Lesson passed");
            self.events
                .publish(events::LESSON_PASSED, json!({ "lesson": lesson.name() }));
            self.add_message(&format!("Congratulations! '{}' is complete.", lesson.name()));
        } else {
            debug!(lesson = %lesson.name(), "Lesson already passed");
        }
        Ok(())
    }

    /// Hand action ids to the simulator; a no-op outside test mode
    pub(crate) fn simulate_actions(&self, action_ids: Vec<String>) {
        if let Some(simulator) = &self.simulator {
            simulator.simulate(action_ids);
        }
    }
}
