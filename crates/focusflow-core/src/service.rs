//! Async tick service wiring tick sources to the collection.
//!
//! One [`TickSource`] per running task feeds a single mpsc channel; the
//! service drains that channel on one serial loop, so no two ticks ever race
//! on the collection, and each tick observes the fully-applied result of the
//! previous one. Boundary events are forwarded to an outbound channel for the
//! presentation layer, and the collection is saved best-effort after every
//! change.
//!
//! Stale ticks are discarded by generation: stopping a task retires its
//! source, and any tick that fired before the cancellation landed carries a
//! generation that no longer matches.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::collection::TaskCollection;
use crate::engine::{TaskTimerEngine, TickFired, TickResult, TickSource};
use crate::events::TimerEvent;
use crate::storage::Store;

/// Drives the running tasks of a [`TaskCollection`] at one tick per second.
pub struct TickService {
    collection: TaskCollection,
    tick_tx: mpsc::UnboundedSender<TickFired>,
    tick_rx: mpsc::UnboundedReceiver<TickFired>,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
    sources: HashMap<String, TickSource>,
    next_generation: u64,
}

impl TickService {
    /// Create a service over a collection. Boundary events are delivered to
    /// `events_tx`; the caller keeps the receiving half.
    pub fn new(collection: TaskCollection, events_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            collection,
            tick_tx,
            tick_rx,
            events_tx,
            sources: HashMap::new(),
            next_generation: 0,
        }
    }

    pub fn collection(&self) -> &TaskCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut TaskCollection {
        &mut self.collection
    }

    /// Number of live tick sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Reconcile tick sources with the collection's run state: spawn a source
    /// for every running task without one, cancel the source of every task
    /// that stopped or was deleted. Invariant: at most one source per task.
    pub fn sync_sources(&mut self) {
        let running = self.collection.running_ids();
        self.sources.retain(|id, source| {
            if running.iter().any(|r| r == id) {
                true
            } else {
                source.stop();
                false
            }
        });
        for id in running {
            if !self.sources.contains_key(&id) {
                self.next_generation += 1;
                let source =
                    TickSource::spawn(id.clone(), self.next_generation, self.tick_tx.clone());
                self.sources.insert(id, source);
            }
        }
    }

    /// Apply one fired tick. Returns the engine's verdict; `Ignored` covers
    /// both stale generations and ticks for tasks no longer running.
    pub fn handle_tick(&mut self, fired: &TickFired) -> TickResult {
        let current = match self.sources.get(&fired.task_id) {
            Some(source) if source.generation() == fired.generation => source,
            _ => return TickResult::Ignored, // Stale or retired source.
        };
        let engine = TaskTimerEngine::new(current.task_id());
        self.collection.apply_tick(&engine)
    }

    /// Run the tick loop until no task is running or the channel closes.
    ///
    /// Saving is best-effort: a failed save never stops the loop.
    pub async fn run(mut self, store: &Store) {
        self.sync_sources();
        if self.sources.is_empty() {
            return;
        }
        while let Some(fired) = self.tick_rx.recv().await {
            match self.handle_tick(&fired) {
                TickResult::Ignored => continue,
                TickResult::Advanced { .. } => {
                    let _ = store.save_tasks(self.collection.tasks());
                }
                TickResult::Boundary(event) => {
                    // GoalReached auto-pauses the task; retire its source.
                    let pausing = matches!(event, TimerEvent::GoalReached { .. });
                    let _ = self.events_tx.send(event);
                    let _ = store.save_tasks(self.collection.tasks());
                    if pausing {
                        self.sync_sources();
                    }
                }
            }
            if self.sources.is_empty() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service_with_running_task(minutes: u32) -> (TickService, String) {
        let mut collection = TaskCollection::new();
        let event = collection.add("task", minutes, None).unwrap();
        let id = event.task_id().to_string();
        collection.toggle_timer(&id).unwrap();
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        (TickService::new(collection, events_tx), id)
    }

    #[tokio::test]
    async fn sync_spawns_one_source_per_running_task() {
        let (mut service, id) = service_with_running_task(25);
        service.sync_sources();
        assert_eq!(service.source_count(), 1);
        // Re-syncing does not duplicate the source.
        service.sync_sources();
        assert_eq!(service.source_count(), 1);
        service.collection_mut().toggle_timer(&id).unwrap();
        service.sync_sources();
        assert_eq!(service.source_count(), 0);
    }

    #[tokio::test]
    async fn current_tick_advances_task() {
        let (mut service, id) = service_with_running_task(25);
        service.sync_sources();
        let generation = service.sources[&id].generation();
        let fired = TickFired {
            task_id: id.clone(),
            generation,
        };
        assert!(matches!(
            service.handle_tick(&fired),
            TickResult::Advanced {
                time_spent_seconds: 1
            }
        ));
        assert_eq!(service.collection().get(&id).unwrap().time_spent_seconds, 1);
    }

    #[tokio::test]
    async fn stale_generation_is_discarded() {
        let (mut service, id) = service_with_running_task(25);
        service.sync_sources();
        let stale_generation = service.sources[&id].generation();
        // Pause and restart: the task gets a new source with a new generation.
        service.collection_mut().toggle_timer(&id).unwrap();
        service.sync_sources();
        service.collection_mut().toggle_timer(&id).unwrap();
        service.sync_sources();
        let fired = TickFired {
            task_id: id.clone(),
            generation: stale_generation,
        };
        assert_eq!(service.handle_tick(&fired), TickResult::Ignored);
        assert_eq!(service.collection().get(&id).unwrap().time_spent_seconds, 0);
    }

    #[tokio::test]
    async fn tick_after_delete_is_discarded() {
        let (mut service, id) = service_with_running_task(25);
        service.sync_sources();
        let generation = service.sources[&id].generation();
        service.collection_mut().delete(&id).unwrap();
        service.sync_sources();
        let fired = TickFired {
            task_id: id,
            generation,
        };
        assert_eq!(service.handle_tick(&fired), TickResult::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_once_the_goal_pauses_the_last_task() {
        let mut collection = TaskCollection::new();
        let event = collection.add("one minute", 1, None).unwrap();
        let id = event.task_id().to_string();
        collection.toggle_timer(&id).unwrap();
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let service = TickService::new(collection, events_tx);
        let store = Store::open_memory().unwrap();

        tokio::time::timeout(Duration::from_secs(120), service.run(&store))
            .await
            .expect("run should end when the goal auto-pauses the task");

        let mut saw_goal = false;
        while let Ok(event) = events_rx.try_recv() {
            if matches!(event, TimerEvent::GoalReached { .. }) {
                saw_goal = true;
            }
        }
        assert!(saw_goal);
        let stored = store.load_tasks().unwrap();
        assert_eq!(stored[0].time_spent_seconds, 60);
        assert!(!stored[0].is_running);
    }
}
