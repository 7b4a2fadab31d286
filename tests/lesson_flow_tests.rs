//! End-to-end lesson execution tests: simulated input, manual dispatch,
//! ordering guarantees, and failure policies.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::timeout;

use trainer_core::config::TrainerConfig;
use trainer_core::constants::events;
use trainer_core::events::PublishedEvent;
use trainer_core::learning::{parse_lesson_sample, Lesson, SessionCoordinator, START_TAG};
use trainer_core::state_machine::LessonState;
use trainer_core::workspace::Workspace;
use trainer_core::TrainerError;

fn coordinator_with(config: TrainerConfig) -> (Workspace, Arc<SessionCoordinator>) {
    let workspace = Workspace::new("learn-project", "ruby");
    common::register_editor_actions(&workspace);
    workspace.keymap.bind("CommentByLineComment", "Ctrl+/");
    let coordinator = SessionCoordinator::new(config, workspace.clone());
    (workspace, coordinator)
}

async fn wait_for_event(
    rx: &mut tokio::sync::broadcast::Receiver<PublishedEvent>,
    name: &str,
) -> PublishedEvent {
    timeout(Duration::from_secs(5), async {
        loop {
            let event = rx.recv().await.expect("event stream closed");
            if event.name == name {
                return event;
            }
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for event '{name}'"))
}

/// The full single-line-comment scenario, driven entirely by the test-mode
/// simulator: task 1 seeds the sample and caret, task 2 waits for the
/// comment action, task 3 waits for the same action to toggle the comment
/// back off and for a comment count of zero.
#[tokio::test]
async fn comment_lesson_passes_end_to_end_with_simulated_input() {
    let (workspace, coordinator) =
        coordinator_with(TrainerConfig::for_simulated_input(Duration::from_millis(5)));
    let mut messages = coordinator.subscribe_messages();

    let sample = parse_lesson_sample("def cat\n  <start>puts 'meow'\nend\n", &[START_TAG]);
    let sample_text = sample.text().to_string();
    let start_offset = sample.start_offset().unwrap();

    let document = workspace.document.clone();
    let lesson = Lesson::builder("Single Line Comment", "Editor Basics", "ruby")
        .task(move |ctx| {
            ctx.copy_code(&sample_text);
            ctx.caret(start_offset)
        })
        .trigger_task("CommentByLineComment", |ctx, action| {
            ctx.text(&format!("Comment out any line with {}", ctx.action(action)));
            Ok(())
        })
        .trigger_task("CommentByLineComment", {
            move |ctx, action| {
                ctx.text(&format!(
                    "Uncomment the commented line with the same shortcut, {}.",
                    ctx.action(action)
                ));
                let doc = document.clone();
                ctx.check_state(
                    move || doc.with_text(common::comment_lines),
                    |_before, now| *now == 0,
                );
                Ok(())
            }
        })
        .build()
        .unwrap();

    assert_eq!(lesson.state(), LessonState::NotStarted);
    timeout(Duration::from_secs(10), lesson.clone().run(&coordinator))
        .await
        .expect("lesson should complete under simulated input")
        .unwrap();

    assert!(lesson.passed());
    assert_eq!(workspace.document.text(), "def cat\n  puts 'meow'\nend\n");

    // Instructional text was rendered with the bound shortcut
    let first = messages.try_recv().unwrap();
    assert_eq!(first.plain_text(), "Comment out any line with Ctrl+/");
}

/// Task N+1 never starts executing its body until task N's handles resolved.
#[tokio::test]
async fn tasks_run_strictly_in_sequence() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());
    let mut event_rx = coordinator.events().subscribe();

    let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let lesson = Lesson::builder("Sequencing", "Editor Basics", "ruby")
        .task({
            let log = log.clone();
            move |ctx| {
                log.lock().push("task1-body");
                ctx.trigger("EditorSelectWord");
                Ok(())
            }
        })
        .task({
            let log = log.clone();
            move |_ctx| {
                log.lock().push("task2-body");
                Ok(())
            }
        })
        .build()
        .unwrap();

    let run = tokio::spawn({
        let lesson = lesson.clone();
        let coordinator = coordinator.clone();
        async move { lesson.run(&coordinator).await }
    });

    // The first task's recorder is registered before the lesson parks
    wait_for_event(&mut event_rx, events::LESSON_OPENED).await;
    assert_eq!(*log.lock(), vec!["task1-body"]);

    log.lock().push("dispatch");
    workspace.dispatcher.perform_action("EditorSelectWord").unwrap();

    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(*log.lock(), vec!["task1-body", "dispatch", "task2-body"]);
    assert!(lesson.passed());
}

/// A trigger set resolves once every id has been seen, whatever the arrival
/// order, and unrelated actions do not satisfy it.
#[tokio::test]
async fn trigger_set_resolves_regardless_of_arrival_order() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());
    let mut event_rx = coordinator.events().subscribe();

    let lesson = Lesson::builder("Multi Select", "Editor Basics", "ruby")
        .task(|ctx| {
            ctx.copy_code("line one\nline two\n");
            ctx.triggers(&["EditorDownWithSelection", "CommentByLineComment"]);
            Ok(())
        })
        .build()
        .unwrap();

    let run = tokio::spawn({
        let lesson = lesson.clone();
        let coordinator = coordinator.clone();
        async move { lesson.run(&coordinator).await }
    });

    wait_for_event(&mut event_rx, events::LESSON_OPENED).await;

    // Reverse of the requested order, with an unrelated action in between
    workspace
        .dispatcher
        .perform_action("CommentByLineComment")
        .unwrap();
    assert!(!lesson.passed());
    workspace.dispatcher.perform_action("EditorSelectWord").unwrap();
    assert!(!lesson.passed());
    workspace
        .dispatcher
        .perform_action("EditorDownWithSelection")
        .unwrap();

    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(lesson.passed());
}

#[tokio::test]
async fn caret_search_moves_to_exact_offset() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());

    let lesson = Lesson::builder("Navigate", "Editor Basics", "ruby")
        .task(|ctx| {
            ctx.copy_code("class Users\nend\n");
            ctx.caret_at("Us")
        })
        .build()
        .unwrap();

    lesson.clone().run(&coordinator).await.unwrap();
    assert_eq!(workspace.editor.caret_offset(), 6);
}

/// A missing search match is a reported failure: the run errors and the
/// lesson is not passed.
#[tokio::test]
async fn caret_search_miss_fails_the_run() {
    let (_workspace, coordinator) = coordinator_with(TrainerConfig::default());

    let lesson = Lesson::builder("Navigate", "Editor Basics", "ruby")
        .task(|ctx| {
            ctx.copy_code("class Accounts\nend\n");
            ctx.caret_at("Us")
        })
        .build()
        .unwrap();

    let result = lesson.clone().run(&coordinator).await;
    assert!(matches!(
        result,
        Err(TrainerError::SearchNotFound { pattern }) if pattern == "Us"
    ));
    assert!(!lesson.passed());
}

/// `copy_code` is one coalesced edit: a single host-level undo restores the
/// pre-insertion content exactly, and only once.
#[tokio::test]
async fn copy_code_round_trips_through_one_undo_step() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());
    workspace.document.replace_all("seed", "original contents\n");
    let undo_depth_before = workspace.document.undo_depth();

    let lesson = Lesson::builder("Copy", "Editor Basics", "ruby")
        .task(|ctx| {
            ctx.copy_code("fn main() {\n    println!(\"hi\");\n}\n");
            Ok(())
        })
        .build()
        .unwrap();
    lesson.run(&coordinator).await.unwrap();

    assert_eq!(workspace.document.undo_depth(), undo_depth_before + 1);
    workspace.document.undo().unwrap();
    assert_eq!(workspace.document.text(), "original contents\n");
}

/// The "before" snapshot of a state check is captured exactly once, at
/// registration, no matter how many change events fire before the predicate
/// first passes.
#[tokio::test]
async fn before_snapshot_captured_once_across_many_changes() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());
    workspace.document.replace_all("seed", "// a\n// b\nc\n");
    let mut event_rx = coordinator.events().subscribe();

    let before_log: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

    let document = workspace.document.clone();
    let lesson = Lesson::builder("Uncomment All", "Editor Basics", "ruby")
        .task({
            let before_log = before_log.clone();
            move |ctx| {
                ctx.text("Remove every line comment.");
                let doc = document.clone();
                let log = before_log.clone();
                ctx.check_state(
                    move || doc.with_text(common::comment_lines),
                    move |before, now| {
                        log.lock().push(*before);
                        *now == 0
                    },
                );
                Ok(())
            }
        })
        .build()
        .unwrap();

    let run = tokio::spawn({
        let lesson = lesson.clone();
        let coordinator = coordinator.clone();
        async move { lesson.run(&coordinator).await }
    });
    wait_for_event(&mut event_rx, events::LESSON_OPENED).await;

    workspace.document.replace_all("edit", "// b\nc\n");
    workspace.document.replace_all("edit", "c\n");

    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    // Two evaluations, both comparing against the registration-time snapshot
    assert_eq!(*before_log.lock(), vec![2, 2]);
    assert!(lesson.passed());
}

/// A recorder left behind by an abandoned lesson is superseded when the next
/// lesson's task registers: the stale one stops receiving, the new one
/// resolves, and no event is double-delivered.
#[tokio::test]
async fn abandoned_lesson_recorder_is_superseded() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());
    let mut event_rx = coordinator.events().subscribe();

    let abandoned = Lesson::builder("Abandoned", "Editor Basics", "ruby")
        .task(|ctx| {
            ctx.trigger("EditorSelectWord");
            Ok(())
        })
        .build()
        .unwrap();
    let next = Lesson::builder("Next", "Editor Basics", "ruby")
        .task(|ctx| {
            ctx.trigger("EditorSelectWord");
            Ok(())
        })
        .build()
        .unwrap();

    let abandoned_run = tokio::spawn({
        let lesson = abandoned.clone();
        let coordinator = coordinator.clone();
        async move { lesson.run(&coordinator).await }
    });
    wait_for_event(&mut event_rx, events::LESSON_OPENED).await;

    // The user navigates away; the next lesson takes over the event stream
    let next_run = tokio::spawn({
        let lesson = next.clone();
        let coordinator = coordinator.clone();
        async move { lesson.run(&coordinator).await }
    });
    wait_for_event(&mut event_rx, events::RECORDER_SUPERSEDED).await;

    workspace.dispatcher.perform_action("EditorSelectWord").unwrap();

    timeout(Duration::from_secs(5), next_run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(next.passed());

    // The abandoned lesson never advanced and is simply still waiting
    assert!(!abandoned.passed());
    assert_eq!(abandoned.state(), LessonState::Open);
    abandoned_run.abort();
}

/// Progress events: one exercise-passed per task, then a single
/// lesson-passed, with the current lesson tracked throughout.
#[tokio::test]
async fn progress_events_published_per_task_and_lesson() {
    let (_workspace, coordinator) =
        coordinator_with(TrainerConfig::for_simulated_input(Duration::from_millis(2)));
    let mut event_rx = coordinator.events().subscribe();

    let lesson = Lesson::builder("Select", "Editor Basics", "ruby")
        .trigger_task("EditorSelectWord", |_ctx, _action| Ok(()))
        .trigger_task("EditorDownWithSelection", |_ctx, _action| Ok(()))
        .build()
        .unwrap();

    timeout(Duration::from_secs(10), lesson.clone().run(&coordinator))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        coordinator.current_lesson().unwrap().name(),
        "Select"
    );

    let mut exercise_count = 0;
    loop {
        let event = event_rx.try_recv().unwrap();
        match event.name.as_str() {
            events::LESSON_EXERCISE_PASSED => exercise_count += 1,
            events::LESSON_PASSED => break,
            _ => {}
        }
    }
    assert_eq!(exercise_count, 2);
}

/// Counter shared across tasks to prove trigger registration does not block
/// the task body.
#[tokio::test]
async fn trigger_registration_returns_immediately() {
    let (workspace, coordinator) = coordinator_with(TrainerConfig::default());
    let mut event_rx = coordinator.events().subscribe();
    let body_finished = Arc::new(AtomicUsize::new(0));

    let lesson = Lesson::builder("NonBlocking", "Editor Basics", "ruby")
        .task({
            let body_finished = body_finished.clone();
            move |ctx| {
                ctx.trigger("EditorSelectWord");
                // Reached synchronously even though nothing has resolved yet
                body_finished.store(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .build()
        .unwrap();

    let run = tokio::spawn({
        let lesson = lesson.clone();
        let coordinator = coordinator.clone();
        async move { lesson.run(&coordinator).await }
    });
    wait_for_event(&mut event_rx, events::LESSON_OPENED).await;

    assert_eq!(body_finished.load(Ordering::SeqCst), 1);
    assert!(!lesson.passed());

    workspace.dispatcher.perform_action("EditorSelectWord").unwrap();
    timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
