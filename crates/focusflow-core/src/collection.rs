//! The task collection and its command surface.
//!
//! Holds the ordered set of tasks (insertion order is display order) and is
//! the only place task records are mutated. Every command is synchronous and
//! atomic with respect to the in-memory collection: validation happens before
//! any mutation, so a rejected command has no partial effect.

use chrono::Utc;

use crate::engine::{TaskTimerEngine, TickResult};
use crate::error::ValidationError;
use crate::events::TimerEvent;
use crate::task::{PomodoroState, Task};

/// Ordered collection of tasks plus the commands that mutate it.
#[derive(Debug, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task, ValidationError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))
    }

    /// Ids of all currently running tasks, in display order.
    pub fn running_ids(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|t| t.is_running)
            .map(|t| t.id.clone())
            .collect()
    }

    // ── Read-only projections for goal/stat displays ─────────────────

    /// Sum of elapsed seconds across every task.
    pub fn total_elapsed_seconds(&self) -> u64 {
        self.tasks.iter().map(|t| t.time_spent_seconds).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a new task. `pomodoro` selects the mode: `Some` for Pomodoro,
    /// `None` for simple count-up. Callers default the sub-state from the
    /// global Pomodoro settings when that mode is globally enabled.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        duration_minutes: u32,
        pomodoro: Option<PomodoroState>,
    ) -> Result<TimerEvent, ValidationError> {
        let task = Task::new(name, duration_minutes, pomodoro)?;
        let event = TimerEvent::TaskAdded {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            at: Utc::now(),
        };
        self.tasks.push(task);
        Ok(event)
    }

    /// Flip a task's run state. Starting a completed task is rejected.
    pub fn toggle_timer(&mut self, id: &str) -> Result<TimerEvent, ValidationError> {
        let task = self.get_mut(id)?;
        if task.is_running {
            task.is_running = false;
            Ok(TimerEvent::TimerPaused {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                time_spent_seconds: task.time_spent_seconds,
                at: Utc::now(),
            })
        } else {
            if task.completed {
                return Err(ValidationError::AlreadyCompleted(id.to_string()));
            }
            task.is_running = true;
            Ok(TimerEvent::TimerStarted {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                at: Utc::now(),
            })
        }
    }

    /// Remove a task from the collection. No cascading effects beyond the
    /// removal; the service layer cancels any tick source bound to it.
    pub fn delete(&mut self, id: &str) -> Result<TimerEvent, ValidationError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?;
        let task = self.tasks.remove(index);
        Ok(TimerEvent::TaskDeleted {
            task_id: task.id,
            task_name: task.name,
            at: Utc::now(),
        })
    }

    /// Mark a simple-mode task completed once its goal duration is reached.
    /// Pomodoro tasks run indefinitely and cannot be completed this way.
    pub fn complete(&mut self, id: &str) -> Result<TimerEvent, ValidationError> {
        let task = self.get_mut(id)?;
        if task.completed {
            return Err(ValidationError::AlreadyCompleted(id.to_string()));
        }
        if task.is_pomodoro_mode {
            return Err(ValidationError::NoFixedGoal(id.to_string()));
        }
        if !task.goal_reached() {
            return Err(ValidationError::GoalNotReached(id.to_string()));
        }
        task.completed = true;
        task.is_running = false;
        task.completed_at = Some(Utc::now());
        Ok(TimerEvent::TaskCompleted {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            time_spent_seconds: task.time_spent_seconds,
            at: Utc::now(),
        })
    }

    /// Zero a task's elapsed time and cycle state, stopping it if running.
    pub fn reset(&mut self, id: &str) -> Result<TimerEvent, ValidationError> {
        let task = self.get_mut(id)?;
        task.reset_timer();
        Ok(TimerEvent::TimerReset {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            at: Utc::now(),
        })
    }

    /// Apply one engine tick to the task the engine is bound to.
    /// A tick for a deleted, stopped, or completed task is a silent no-op.
    pub fn apply_tick(&mut self, engine: &TaskTimerEngine) -> TickResult {
        match self.tasks.iter_mut().find(|t| t.id == engine.task_id()) {
            Some(task) => engine.tick(task),
            None => TickResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_with_one(name: &str, minutes: u32) -> (TaskCollection, String) {
        let mut collection = TaskCollection::new();
        let event = collection.add(name, minutes, None).unwrap();
        let id = event.task_id().to_string();
        (collection, id)
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut collection = TaskCollection::new();
        collection.add("first", 10, None).unwrap();
        collection.add("second", 20, None).unwrap();
        collection.add("third", 30, None).unwrap();
        let names: Vec<_> = collection.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn add_rejects_invalid_input_without_effect() {
        let mut collection = TaskCollection::new();
        assert!(collection.add("", 10, None).is_err());
        assert!(collection.add("x", 0, None).is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn toggle_flips_run_state() {
        let (mut collection, id) = collection_with_one("t", 25);
        assert!(matches!(
            collection.toggle_timer(&id).unwrap(),
            TimerEvent::TimerStarted { .. }
        ));
        assert!(collection.get(&id).unwrap().is_running);
        assert!(matches!(
            collection.toggle_timer(&id).unwrap(),
            TimerEvent::TimerPaused { .. }
        ));
        assert!(!collection.get(&id).unwrap().is_running);
    }

    #[test]
    fn toggle_on_completed_task_is_rejected() {
        let (mut collection, id) = collection_with_one("t", 1);
        {
            let task = collection.get_mut(&id).unwrap();
            task.time_spent_seconds = 60;
        }
        collection.complete(&id).unwrap();
        assert!(matches!(
            collection.toggle_timer(&id),
            Err(ValidationError::AlreadyCompleted(_))
        ));
    }

    #[test]
    fn delete_twice_yields_same_end_state_as_once() {
        let (mut collection, id) = collection_with_one("t", 25);
        collection.delete(&id).unwrap();
        assert!(collection.is_empty());
        // Second delete reports the unknown id but leaves state unchanged.
        assert!(matches!(
            collection.delete(&id),
            Err(ValidationError::UnknownTask(_))
        ));
        assert!(collection.is_empty());
    }

    #[test]
    fn complete_requires_goal_reached() {
        let (mut collection, id) = collection_with_one("t", 25);
        assert!(matches!(
            collection.complete(&id),
            Err(ValidationError::GoalNotReached(_))
        ));
        collection.get_mut(&id).unwrap().time_spent_seconds = 25 * 60;
        let event = collection.complete(&id).unwrap();
        assert!(matches!(event, TimerEvent::TaskCompleted { .. }));
        let task = collection.get(&id).unwrap();
        assert!(task.completed);
        assert!(!task.is_running);
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn complete_rejects_pomodoro_tasks() {
        let mut collection = TaskCollection::new();
        let event = collection
            .add("pomo", 25, Some(PomodoroState::new(25, 5)))
            .unwrap();
        let id = event.task_id().to_string();
        collection.get_mut(&id).unwrap().time_spent_seconds = 100_000;
        assert!(matches!(
            collection.complete(&id),
            Err(ValidationError::NoFixedGoal(_))
        ));
    }

    #[test]
    fn reset_zeroes_timer_state_regardless_of_prior_state() {
        let mut collection = TaskCollection::new();
        let event = collection
            .add("pomo", 25, Some(PomodoroState::new(25, 5)))
            .unwrap();
        let id = event.task_id().to_string();
        {
            let task = collection.get_mut(&id).unwrap();
            task.time_spent_seconds = 5000;
            task.is_running = true;
            let p = task.pomodoro.as_mut().unwrap();
            p.cycles_completed = 2;
            p.is_on_break = true;
        }
        collection.reset(&id).unwrap();
        let task = collection.get(&id).unwrap();
        assert_eq!(task.time_spent_seconds, 0);
        assert!(!task.is_running);
        let p = task.pomodoro.as_ref().unwrap();
        assert_eq!(p.cycles_completed, 0);
        assert!(!p.is_on_break);
    }

    #[test]
    fn apply_tick_for_deleted_task_is_ignored() {
        let (mut collection, id) = collection_with_one("t", 25);
        collection.toggle_timer(&id).unwrap();
        let engine = TaskTimerEngine::new(id.clone());
        collection.delete(&id).unwrap();
        assert_eq!(collection.apply_tick(&engine), TickResult::Ignored);
    }

    #[test]
    fn projections_cover_goal_and_stat_displays() {
        let mut collection = TaskCollection::new();
        let a = collection.add("a", 1, None).unwrap().task_id().to_string();
        let b = collection.add("b", 25, None).unwrap().task_id().to_string();
        collection.get_mut(&a).unwrap().time_spent_seconds = 60;
        collection.get_mut(&b).unwrap().time_spent_seconds = 40;
        collection.complete(&a).unwrap();
        assert_eq!(collection.total_elapsed_seconds(), 100);
        assert_eq!(collection.completed_count(), 1);
        assert_eq!(collection.active_count(), 1);
    }
}
