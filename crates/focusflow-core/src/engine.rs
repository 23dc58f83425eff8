//! Per-task timer engine.
//!
//! The tick core holds no thread and no internal clock: all task data is
//! passed in at tick time and the engine is parameterized purely by the id of
//! the task it is bound to. The async [`TickSource`] below owns the actual
//! one-second cadence; the service layer feeds its ticks back into the engine
//! on a single serial event loop.
//!
//! A tick delivered to a stopped or completed task is discarded as a no-op,
//! never an error. This is what makes late ticks from an already-cancelled
//! source harmless.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::TimerEvent;
use crate::pomodoro::phase_snapshot;
use crate::task::Task;

/// Result of delivering one tick to a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TickResult {
    /// The tick arrived for a stopped, completed, or foreign task and was
    /// discarded without touching any state.
    Ignored,
    /// Elapsed time advanced by one second without crossing a boundary.
    Advanced { time_spent_seconds: u64 },
    /// Elapsed time advanced and a phase or goal boundary was crossed.
    Boundary(TimerEvent),
}

/// Timer engine bound to exactly one task id.
///
/// Stateless apart from that binding: every call receives the task snapshot,
/// so there is no captured state to go stale between ticks.
#[derive(Debug, Clone)]
pub struct TaskTimerEngine {
    task_id: String,
}

impl TaskTimerEngine {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Deliver one one-second tick to the bound task.
    ///
    /// Advances `time_spent_seconds` by exactly one. In Pomodoro mode the
    /// cycle calculator is consulted with the *pre-tick* phase flag; a
    /// detected boundary flips `is_on_break` and, on break -> focus,
    /// increments `cycles_completed`. In simple mode, reaching the goal
    /// duration pauses the task (the user still confirms completion
    /// separately).
    pub fn tick(&self, task: &mut Task) -> TickResult {
        if task.id != self.task_id || task.completed || !task.is_running {
            return TickResult::Ignored;
        }
        task.time_spent_seconds += 1;

        if task.is_pomodoro_mode {
            let Some(pomo) = task.pomodoro.as_mut() else {
                return TickResult::Advanced {
                    time_spent_seconds: task.time_spent_seconds,
                };
            };
            let snap = phase_snapshot(
                task.time_spent_seconds,
                pomo.focus_minutes,
                pomo.break_minutes,
                pomo.is_on_break,
            );
            if !snap.phase_just_ended {
                return TickResult::Advanced {
                    time_spent_seconds: task.time_spent_seconds,
                };
            }
            pomo.is_on_break = !pomo.is_on_break;
            if pomo.is_on_break {
                TickResult::Boundary(TimerEvent::BreakStarted {
                    task_id: task.id.clone(),
                    task_name: task.name.clone(),
                    break_minutes: pomo.break_minutes,
                    at: Utc::now(),
                })
            } else {
                pomo.cycles_completed += 1;
                TickResult::Boundary(TimerEvent::FocusStarted {
                    task_id: task.id.clone(),
                    task_name: task.name.clone(),
                    cycles_completed: pomo.cycles_completed,
                    at: Utc::now(),
                })
            }
        } else if task.time_spent_seconds >= task.goal_seconds() {
            // Auto-pause, not auto-complete. Subsequent ticks hit the
            // not-running guard, so this fires at most once.
            task.is_running = false;
            TickResult::Boundary(TimerEvent::GoalReached {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                at: Utc::now(),
            })
        } else {
            TickResult::Advanced {
                time_spent_seconds: task.time_spent_seconds,
            }
        }
    }
}

/// Message sent by a [`TickSource`] once per second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFired {
    pub task_id: String,
    /// Generation of the source that fired this tick. A tick whose generation
    /// no longer matches the current source for the task is stale and must be
    /// discarded.
    pub generation: u64,
}

/// A cancellable one-second periodic tick source bound to one task.
///
/// Owns a spawned tokio task driving a 1s interval into an mpsc channel.
/// Dropping or calling [`TickSource::stop`] cancels it; both are always safe
/// and idempotent.
pub struct TickSource {
    task_id: String,
    generation: u64,
    handle: JoinHandle<()>,
}

impl TickSource {
    pub fn spawn(
        task_id: String,
        generation: u64,
        tx: mpsc::UnboundedSender<TickFired>,
    ) -> Self {
        let id = task_id.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick resolves immediately; skip it so the
            // first delivered tick lands a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                let fired = TickFired {
                    task_id: id.clone(),
                    generation,
                };
                if tx.send(fired).is_err() {
                    break;
                }
            }
        });
        Self {
            task_id,
            generation,
            handle,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the periodic tick. Safe to call any number of times.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
