//! Timer control commands.
//!
//! `watch` is the live mode: it starts the named tasks and runs the tick
//! service on a current-thread runtime until every timer has paused (or
//! Ctrl-C). Timers never resume automatically across invocations; a reload
//! always starts with every task paused.

use clap::Subcommand;
use focusflow_core::{phase_snapshot, Store, TaskCollection, TickService, TimerEvent};
use tokio::sync::mpsc;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Flip a task's run state
    Toggle {
        /// Task ID
        id: String,
    },
    /// Start the given tasks and tick them live until all pause or Ctrl-C
    Watch {
        /// Task IDs to run
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the current timer state of every task as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut collection = TaskCollection::from_tasks(store.load_tasks()?);

    match action {
        TimerAction::Toggle { id } => {
            let event = collection.toggle_timer(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            store.save_tasks(collection.tasks())?;
        }
        TimerAction::Watch { ids } => {
            for id in &ids {
                let event = collection.toggle_timer(id)?;
                print_notification(&event);
            }
            let (events_tx, mut events_rx) = mpsc::unbounded_channel();
            let service = TickService::new(collection, events_tx);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let local = tokio::task::LocalSet::new();
            local.block_on(&runtime, async {
                let printer = tokio::task::spawn_local(async move {
                    while let Some(event) = events_rx.recv().await {
                        print_notification(&event);
                    }
                });
                tokio::select! {
                    _ = service.run(&store) => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                let _ = printer.await;
            });
        }
        TimerAction::Status => {
            // Read-only query; the stored collection is left untouched.
            let snapshots: Vec<serde_json::Value> =
                collection.tasks().iter().map(task_snapshot).collect();
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        }
    }
    Ok(())
}

fn task_snapshot(task: &focusflow_core::Task) -> serde_json::Value {
    let mut snapshot = serde_json::json!({
        "id": task.id,
        "name": task.name,
        "completed": task.completed,
        "is_running": task.is_running,
        "time_spent_seconds": task.time_spent_seconds,
    });
    match task.pomodoro {
        Some(ref p) => {
            let snap = phase_snapshot(
                task.time_spent_seconds,
                p.focus_minutes,
                p.break_minutes,
                p.is_on_break,
            );
            snapshot["phase"] = serde_json::json!(snap.phase);
            snapshot["phase_elapsed_secs"] = serde_json::json!(snap.phase_elapsed_secs);
            snapshot["phase_length_secs"] = serde_json::json!(snap.phase_length_secs);
            snapshot["progress_percent"] = serde_json::json!(snap.progress_percent);
            snapshot["cycles_completed"] = serde_json::json!(p.cycles_completed);
        }
        None => {
            snapshot["goal_seconds"] = serde_json::json!(task.goal_seconds());
            snapshot["goal_reached"] = serde_json::json!(task.goal_reached());
        }
    }
    snapshot
}

/// Render a core signal as a console notification line.
fn print_notification(event: &TimerEvent) {
    match event {
        TimerEvent::BreakStarted {
            task_name,
            break_minutes,
            ..
        } => println!("☕ Break Time! Take a {break_minutes} minute break (\"{task_name}\")"),
        TimerEvent::FocusStarted {
            task_name,
            cycles_completed,
            ..
        } => println!("🧠 Focus Time! Back to work on \"{task_name}\" ({cycles_completed} cycles done)"),
        TimerEvent::GoalReached { task_name, .. } => {
            println!("🎉 Goal reached for \"{task_name}\"! Mark it complete when ready.")
        }
        TimerEvent::TimerStarted { task_name, .. } => {
            println!("Focus session started for \"{task_name}\"")
        }
        TimerEvent::TimerPaused { task_name, .. } => println!("Timer paused for \"{task_name}\""),
        TimerEvent::TimerReset { task_name, .. } => {
            println!("\"{task_name}\" timer has been reset")
        }
        TimerEvent::TaskAdded { task_name, .. } => {
            println!("\"{task_name}\" added to your focus list")
        }
        TimerEvent::TaskDeleted { task_name, .. } => {
            println!("\"{task_name}\" removed from your list")
        }
        TimerEvent::TaskCompleted { task_name, .. } => {
            println!("🎉 Task completed! Great work on \"{task_name}\"")
        }
    }
}
