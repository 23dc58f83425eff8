//! Outbound events raised by the timer core.
//!
//! The core produces no sound and renders no UI. It raises these signals with
//! the task id and name; the presentation layer turns them into audible and
//! visual alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces a TimerEvent.
/// The CLI renders them as notification lines; a GUI would raise toasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    /// A focus phase ended and a break began (Pomodoro mode).
    BreakStarted {
        task_id: String,
        task_name: String,
        break_minutes: u32,
        at: DateTime<Utc>,
    },
    /// A break ended and a new focus phase began (Pomodoro mode).
    /// `cycles_completed` is the count after the break -> focus increment.
    FocusStarted {
        task_id: String,
        task_name: String,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    /// A simple-mode task reached its goal duration and auto-paused.
    /// The task is not marked completed; the user confirms that separately.
    GoalReached {
        task_id: String,
        task_name: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        task_id: String,
        task_name: String,
        at: DateTime<Utc>,
    },
    TimerPaused {
        task_id: String,
        task_name: String,
        time_spent_seconds: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        task_id: String,
        task_name: String,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task_id: String,
        task_name: String,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: String,
        task_name: String,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task_id: String,
        task_name: String,
        time_spent_seconds: u64,
        at: DateTime<Utc>,
    },
}

impl TimerEvent {
    /// Id of the task this event refers to.
    pub fn task_id(&self) -> &str {
        match self {
            TimerEvent::BreakStarted { task_id, .. }
            | TimerEvent::FocusStarted { task_id, .. }
            | TimerEvent::GoalReached { task_id, .. }
            | TimerEvent::TimerStarted { task_id, .. }
            | TimerEvent::TimerPaused { task_id, .. }
            | TimerEvent::TimerReset { task_id, .. }
            | TimerEvent::TaskAdded { task_id, .. }
            | TimerEvent::TaskDeleted { task_id, .. }
            | TimerEvent::TaskCompleted { task_id, .. } => task_id,
        }
    }
}
