//! Task records the timer engine operates on.
//!
//! A task tracks elapsed time in one of two modes:
//!
//! - **Simple mode**: counts up toward a fixed goal duration, then auto-pauses.
//! - **Pomodoro mode**: alternates Focus and Break phases indefinitely,
//!   counting completed cycles. The mode is fixed at creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Per-task Pomodoro sub-state. Present iff the task is in Pomodoro mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    /// Focus phase length in minutes. Strictly positive.
    pub focus_minutes: u32,
    /// Break phase length in minutes. Strictly positive.
    pub break_minutes: u32,
    /// Completed Focus+Break cycles. Increments on break -> focus only.
    #[serde(default)]
    pub cycles_completed: u32,
    #[serde(default)]
    pub is_on_break: bool,
}

impl PomodoroState {
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes,
            break_minutes,
            cycles_completed: 0,
            is_on_break: false,
        }
    }
}

/// A focus task with its own independent elapsed-time timer.
///
/// Mutated exclusively through [`crate::collection::TaskCollection`] commands
/// and [`crate::engine::TaskTimerEngine`] ticks. Fields carry serde defaults
/// so a stored record with a missing or malformed field falls back to a
/// documented default instead of aborting the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    pub name: String,
    /// Goal duration in minutes. Meaningful only in simple mode.
    pub duration_minutes: u32,
    /// Accumulated elapsed seconds. Never decreases except via reset.
    #[serde(default)]
    pub time_spent_seconds: u64,
    /// Once true, the task accepts no further ticks.
    #[serde(default)]
    pub completed: bool,
    /// True while exactly one active tick source is bound to this task.
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub is_pomodoro_mode: bool,
    #[serde(default)]
    pub pomodoro: Option<PomodoroState>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task, validating command input before any state exists.
    ///
    /// Pass `Some(PomodoroState)` for Pomodoro mode, `None` for simple mode.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty, the duration is
    /// zero, or a Pomodoro phase length is zero.
    pub fn new(
        name: impl Into<String>,
        duration_minutes: u32,
        pomodoro: Option<PomodoroState>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if duration_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration_minutes".into(),
                message: "must be greater than zero".into(),
            });
        }
        if let Some(ref p) = pomodoro {
            if p.focus_minutes == 0 {
                return Err(ValidationError::InvalidValue {
                    field: "focus_minutes".into(),
                    message: "must be greater than zero".into(),
                });
            }
            if p.break_minutes == 0 {
                return Err(ValidationError::InvalidValue {
                    field: "break_minutes".into(),
                    message: "must be greater than zero".into(),
                });
            }
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            duration_minutes,
            time_spent_seconds: 0,
            completed: false,
            is_running: false,
            is_pomodoro_mode: pomodoro.is_some(),
            pomodoro,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    /// Goal duration in seconds (simple mode).
    pub fn goal_seconds(&self) -> u64 {
        u64::from(self.duration_minutes).saturating_mul(60)
    }

    /// Whether a simple-mode task has reached its goal duration.
    /// Always false for Pomodoro tasks, which have no fixed goal.
    pub fn goal_reached(&self) -> bool {
        !self.is_pomodoro_mode && self.time_spent_seconds >= self.goal_seconds()
    }

    /// Zero the timer: elapsed time, cycle count, break flag, run flag.
    pub fn reset_timer(&mut self) {
        self.time_spent_seconds = 0;
        self.is_running = false;
        if let Some(ref mut p) = self.pomodoro {
            p.cycles_completed = 0;
            p.is_on_break = false;
        }
    }
}
