//! Mock providers for testing.
//!
//! Each mock keeps its call log behind an `Arc`, so clones observe the same
//! calls.

mod grafana;
mod renderer;
mod shipyard;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use grafana::{GrafanaCall, MockGrafanaProvider};
pub use renderer::MockRenderer;
pub use shipyard::MockShipyardProvider;

/// Locks a call log, recovering from poisoning caused by a panicking test.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
