//! Task management commands.

use clap::Subcommand;
use focusflow_core::{phase_snapshot, Settings, Store, TaskCollection};

use super::{format_duration, format_hms};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task name
        name: String,
        /// Goal duration in minutes (simple mode)
        #[arg(long, default_value = "25")]
        duration: u32,
        /// Create the task in Pomodoro mode
        #[arg(long)]
        pomodoro: bool,
        /// Focus phase minutes (Pomodoro mode; defaults from settings)
        #[arg(long)]
        focus: Option<u32>,
        /// Break phase minutes (Pomodoro mode; defaults from settings)
        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },
    /// List tasks
    List {
        /// Print the raw task records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Mark a simple-mode task completed (goal must be reached)
    Complete {
        /// Task ID
        id: String,
    },
    /// Reset a task's elapsed time and cycle state
    Reset {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let settings = Settings::load_or_default();
    let mut collection = TaskCollection::from_tasks(store.load_tasks()?);

    match action {
        TaskAction::Add {
            name,
            duration,
            pomodoro,
            focus,
            break_minutes,
        } => {
            // Pomodoro sub-state is defaulted from the global settings when
            // the mode is requested explicitly or enabled globally.
            let state = if pomodoro || settings.pomodoro.enabled {
                let mut state = settings.default_pomodoro_state();
                if let Some(focus) = focus {
                    state.focus_minutes = focus;
                }
                if let Some(break_minutes) = break_minutes {
                    state.break_minutes = break_minutes;
                }
                Some(state)
            } else {
                None
            };
            let event = collection.add(name, duration, state)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(collection.tasks())?);
            } else if collection.is_empty() {
                println!("No tasks yet.");
            } else {
                for task in collection.tasks() {
                    print_task_line(task);
                }
            }
        }
        TaskAction::Delete { id } => {
            let event = collection.delete(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TaskAction::Complete { id } => {
            let event = collection.complete(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TaskAction::Reset { id } => {
            let event = collection.reset(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }

    store.save_tasks(collection.tasks())?;
    Ok(())
}

fn print_task_line(task: &focusflow_core::Task) {
    let status = if task.completed {
        "done"
    } else if task.is_running {
        "running"
    } else {
        "paused"
    };
    match task.pomodoro {
        Some(ref p) => {
            let snap = phase_snapshot(
                task.time_spent_seconds,
                p.focus_minutes,
                p.break_minutes,
                p.is_on_break,
            );
            println!(
                "{}  {:24} [{status}] {} in {} phase ({:.0}%), {} cycles, {}m focus / {}m break",
                task.id,
                task.name,
                format_hms(snap.phase_elapsed_secs),
                snap.phase,
                snap.progress_percent,
                p.cycles_completed,
                p.focus_minutes,
                p.break_minutes,
            );
        }
        None => {
            println!(
                "{}  {:24} [{status}] {} of {} goal",
                task.id,
                task.name,
                format_hms(task.time_spent_seconds),
                format_duration(task.duration_minutes),
            );
        }
    }
}
