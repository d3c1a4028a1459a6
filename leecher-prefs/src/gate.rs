use tokio::sync::{Mutex, MutexGuard};

/// Exclusion domain for commands that read and then write shared state.
///
/// At most one operation holds the state at a time. Overlapping callers
/// wait for the current holder to finish and then observe whatever state it
/// left behind; there is no ordering guarantee between waiters. The state is
/// released on every exit path, including early returns and unwinding.
#[derive(Debug, Default)]
pub struct CommandGate<T> {
    state: Mutex<T>,
}

impl<T> CommandGate<T> {
    pub fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Run a synchronous operation with exclusive access to the state.
    pub async fn run_exclusive<R>(
        &self,
        operation: impl FnOnce(&mut T) -> R,
    ) -> R {
        let mut state = self.state.lock().await;
        operation(&mut state)
    }

    /// Hold the exclusion domain across suspension points.
    ///
    /// Other gated operations wait until the returned guard is dropped.
    pub async fn enter(&self) -> MutexGuard<'_, T> {
        self.state.lock().await
    }

    /// Return whether an operation currently holds the state.
    pub fn is_busy(&self) -> bool {
        self.state.try_lock().is_err()
    }
}
