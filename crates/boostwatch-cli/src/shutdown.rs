use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A shutdown flag that supports interruptible waits.
///
/// The frame loop sleeps on this between ticks, so a ctrl-c or quit key
/// ends the loop immediately instead of after the current sleep.
pub struct ShutdownSignal {
    state: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    /// Request shutdown, waking every waiting thread.
    pub fn trigger(&self) {
        let mut stopped = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `timeout` or until shutdown is requested.
    ///
    /// Returns `true` if shutdown was requested.
    pub fn wait(&self, timeout: Duration) -> bool {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (stopped, _) = self
            .condvar
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_starts_running() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_shutdown());
    }

    #[test]
    fn test_trigger_sets_flag() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        assert!(signal.is_shutdown());
    }

    #[test]
    fn test_wait_times_out_when_running() {
        let signal = ShutdownSignal::new();
        let start = Instant::now();
        assert!(!signal.wait(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_wait_returns_immediately_after_trigger() {
        let signal = ShutdownSignal::new();
        signal.trigger();

        let start = Instant::now();
        assert!(signal.wait(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_trigger_interrupts_a_waiting_thread() {
        let signal = Arc::new(ShutdownSignal::new());
        let waiter = {
            let signal = Arc::clone(&signal);
            thread::spawn(move || signal.wait(Duration::from_secs(10)))
        };

        thread::sleep(Duration::from_millis(50));
        signal.trigger();

        assert!(waiter.join().unwrap());
    }
}
