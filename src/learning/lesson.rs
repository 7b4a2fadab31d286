use std::sync::Arc;

use tracing::info;

use super::coordinator::SessionCoordinator;
use super::task::TaskContext;
use crate::error::{Result, TrainerError};
use crate::state_machine::{LessonEvent, LessonState, LessonStateMachine, TransitionOutcome};

/// A task body: the synchronous scripting part of one instructional step
pub type TaskFn = Box<dyn Fn(&mut TaskContext) -> Result<()> + Send + Sync>;

/// An ordered sequence of tasks with open/passed state.
///
/// The task sequence is defined ahead of time via [`LessonBuilder`]; running
/// the lesson executes each task strictly in order, waiting for all of a
/// task's completion conditions before the next begins.
pub struct Lesson {
    name: String,
    module: String,
    lang: String,
    tasks: Vec<TaskFn>,
    state: LessonStateMachine,
}

impl Lesson {
    pub fn builder(
        name: impl Into<String>,
        module: impl Into<String>,
        lang: impl Into<String>,
    ) -> LessonBuilder {
        LessonBuilder {
            name: name.into(),
            module: module.into(),
            lang: lang.into(),
            tasks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn state(&self) -> LessonState {
        self.state.current_state()
    }

    pub fn passed(&self) -> bool {
        self.state.current_state().is_terminal()
    }

    pub fn is_open(&self) -> bool {
        self.state.current_state().is_active()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Mark the lesson passed. Idempotent: returns `true` only on the call
    /// that actually entered the terminal state, so side effects fire once.
    pub fn pass(&self) -> Result<bool> {
        Ok(self.state.transition(LessonEvent::Pass)?.entered())
    }

    pub(crate) fn open(&self) -> Result<TransitionOutcome> {
        self.state.transition(LessonEvent::Open)
    }

    /// Execute the task sequence against the coordinator's workspace.
    ///
    /// Each task closure runs synchronously, then the run blocks until all of
    /// the task's check-handles (first) and trigger-handles (second) resolve.
    /// Task N+1 never begins before task N fully resolves. After the final
    /// task, completion is reported explicitly to the coordinator.
    pub async fn run(self: Arc<Self>, coordinator: &Arc<SessionCoordinator>) -> Result<()> {
        coordinator.start_lesson(&self)?;
        info!(lesson = %self.name, tasks = self.tasks.len(), "Running lesson");

        for (index, task_fn) in self.tasks.iter().enumerate() {
            let mut task = TaskContext::new(self.clone(), coordinator.clone());
            task_fn(&mut task)?;
            task.await_all().await?;
            coordinator.pass_exercise(&self, index);
        }

        coordinator.pass_lesson(&self)
    }
}

/// Builder for the ordered task sequence of a lesson
pub struct LessonBuilder {
    name: String,
    module: String,
    lang: String,
    tasks: Vec<TaskFn>,
}

impl LessonBuilder {
    /// Append a task
    pub fn task<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut TaskContext) -> Result<()> + Send + Sync + 'static,
    {
        self.tasks.push(Box::new(body));
        self
    }

    /// Append a task whose body runs and then waits for `action_id`
    pub fn trigger_task<F>(self, action_id: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TaskContext, &str) -> Result<()> + Send + Sync + 'static,
    {
        let action_id = action_id.into();
        self.task(move |ctx| {
            body(ctx, &action_id)?;
            ctx.trigger(&action_id);
            Ok(())
        })
    }

    /// Finish the lesson definition. A lesson with no tasks is malformed and
    /// rejected rather than silently skipped.
    pub fn build(self) -> Result<Arc<Lesson>> {
        if self.tasks.is_empty() {
            return Err(TrainerError::Lesson(format!(
                "lesson '{}' defines no tasks",
                self.name
            )));
        }
        Ok(Arc::new(Lesson {
            name: self.name,
            module: self.module,
            lang: self.lang,
            tasks: self.tasks,
            state: LessonStateMachine::new(),
        }))
    }
}
