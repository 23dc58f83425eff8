//! # FocusFlow Core Library
//!
//! Core business logic for FocusFlow, a focus-task tracker where every task
//! owns an independent elapsed-time timer. The CLI binary is a thin layer
//! over this library.
//!
//! ## Architecture
//!
//! - **Cycle calculator**: pure Pomodoro phase arithmetic over accumulated
//!   elapsed time
//! - **Timer engine**: caller-driven one-second ticks, bound to a single task
//!   id, with cancellable async tick sources
//! - **Collection**: the ordered task set and its atomic command surface
//! - **Tick service**: serial event loop wiring tick sources to the
//!   collection and forwarding signals to the presentation layer
//! - **Storage**: SQLite-backed task store and TOML-based settings
//!
//! ## Key Components
//!
//! - [`TaskTimerEngine`]: per-task tick state machine
//! - [`TaskCollection`]: command surface and stat projections
//! - [`TickService`]: async tick loop
//! - [`Store`] / [`Settings`]: persistence

pub mod collection;
pub mod engine;
pub mod error;
pub mod events;
pub mod pomodoro;
pub mod service;
pub mod storage;
pub mod task;

pub use collection::TaskCollection;
pub use engine::{TaskTimerEngine, TickFired, TickResult, TickSource};
pub use error::{CoreError, StorageError, ValidationError};
pub use events::TimerEvent;
pub use pomodoro::{phase_snapshot, Phase, PhaseSnapshot};
pub use service::TickService;
pub use storage::{PomodoroDefaults, Settings, Store};
pub use task::{PomodoroState, Task};
