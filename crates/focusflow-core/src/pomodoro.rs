//! Pomodoro cycle arithmetic.
//!
//! Pure functions over a task's accumulated elapsed time and its Pomodoro
//! configuration. Given `(time_spent_seconds, focus_minutes, break_minutes,
//! is_on_break)` they compute the current phase, the position and progress
//! within that phase, and whether a phase boundary was crossed on the most
//! recent one-second tick.
//!
//! Boundary detection uses exact equality, not `>=`: the tick sources
//! guarantee whole-second, gapless, monotonic increments, so the boundary
//! second is always visited and a boundary can never fire twice.

use serde::{Deserialize, Serialize};

/// Current sub-state of a Pomodoro task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Focus => write!(f, "focus"),
            Phase::Break => write!(f, "break"),
        }
    }
}

/// Snapshot of where a Pomodoro task sits within its current phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub phase: Phase,
    /// Seconds elapsed within the current phase.
    pub phase_elapsed_secs: u64,
    /// Total length of the current phase in seconds.
    pub phase_length_secs: u64,
    /// Progress within the current phase, clamped to `[0, 100]`.
    pub progress_percent: f64,
    /// True iff the current second is exactly a phase boundary.
    pub phase_just_ended: bool,
}

/// Compute the phase snapshot for a Pomodoro task.
///
/// `is_on_break` must be the phase flag *before* the tick under evaluation:
/// a focus phase ends exactly when the position within the cycle reaches
/// `focus_minutes * 60`, and a break ends exactly when cumulative time wraps
/// to a multiple of the full cycle length (position 0).
pub fn phase_snapshot(
    time_spent_seconds: u64,
    focus_minutes: u32,
    break_minutes: u32,
    is_on_break: bool,
) -> PhaseSnapshot {
    let focus_secs = u64::from(focus_minutes).saturating_mul(60);
    let break_secs = u64::from(break_minutes).saturating_mul(60);
    let cycle_secs = focus_secs + break_secs;
    if cycle_secs == 0 {
        // Degenerate configuration; construction validates against this.
        return PhaseSnapshot {
            phase: Phase::Focus,
            phase_elapsed_secs: 0,
            phase_length_secs: 0,
            progress_percent: 0.0,
            phase_just_ended: false,
        };
    }
    let position = time_spent_seconds % cycle_secs;

    if is_on_break {
        // Break occupies the tail of the cycle, starting at focus_secs.
        let phase_elapsed = position.saturating_sub(focus_secs).min(break_secs);
        PhaseSnapshot {
            phase: Phase::Break,
            phase_elapsed_secs: phase_elapsed,
            phase_length_secs: break_secs,
            progress_percent: progress_percent(phase_elapsed, break_secs),
            phase_just_ended: position == 0,
        }
    } else {
        PhaseSnapshot {
            phase: Phase::Focus,
            phase_elapsed_secs: position,
            phase_length_secs: focus_secs,
            progress_percent: progress_percent(position, focus_secs),
            phase_just_ended: position == focus_secs,
        }
    }
}

fn progress_percent(elapsed: u64, length: u64) -> f64 {
    if length == 0 {
        return 0.0;
    }
    (elapsed as f64 / length as f64 * 100.0).clamp(0.0, 100.0)
}
