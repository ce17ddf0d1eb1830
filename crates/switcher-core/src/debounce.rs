use std::time::Duration;

use tracing::trace;

use crate::host::{Host, Task, TimerId};

/// Timed gate that keeps hover events from changing the selection.
///
/// Starts closed. Arming (re)starts a single-shot window; when the timer
/// fires the gate opens. Keyboard selection is never gated.
#[derive(Debug)]
pub struct HoverDebouncer {
    window: Duration,
    timer: Option<TimerId>,
    open: bool,
}

impl HoverDebouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            timer: None,
            open: false,
        }
    }

    /// Close the gate and restart the window.
    pub fn arm(&mut self, host: &mut dyn Host) {
        self.open = false;
        if let Some(id) = self.timer.take() {
            host.cancel(id);
        }
        self.timer = Some(host.schedule(self.window, Task::EnableHover));
    }

    /// Handle the window timer firing. Returns `false` for stale tokens.
    pub fn on_elapsed(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            trace!("ignoring stale hover timer {:?}", id);
            return false;
        }
        self.timer = None;
        self.open = true;
        true
    }

    #[must_use]
    pub fn permits(&self) -> bool {
        self.open
    }

    pub fn cancel(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.timer.take() {
            host.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::MockHost;

    #[test]
    fn test_starts_closed() {
        let gate = HoverDebouncer::new(Duration::from_millis(500));
        assert!(!gate.permits());
    }

    #[test]
    fn test_opens_when_window_elapses() {
        let mut host = MockHost::new();
        let mut gate = HoverDebouncer::new(Duration::from_millis(500));
        gate.arm(&mut host);

        let (id, delay, task) = host.last_scheduled().unwrap();
        assert_eq!(delay, Duration::from_millis(500));
        assert_eq!(task, Task::EnableHover);

        assert!(gate.on_elapsed(id));
        assert!(gate.permits());
    }

    #[test]
    fn test_rearm_restarts_window() {
        let mut host = MockHost::new();
        let mut gate = HoverDebouncer::new(Duration::from_millis(500));
        gate.arm(&mut host);
        let (first, _, _) = host.last_scheduled().unwrap();

        gate.arm(&mut host);
        let (second, _, _) = host.last_scheduled().unwrap();

        assert_ne!(first, second);
        assert!(host.was_cancelled(first));
        assert!(!gate.on_elapsed(first));
        assert!(!gate.permits());
        assert!(gate.on_elapsed(second));
        assert!(gate.permits());
    }

    #[test]
    fn test_rearm_after_open_closes_again() {
        let mut host = MockHost::new();
        let mut gate = HoverDebouncer::new(Duration::from_millis(500));
        gate.arm(&mut host);
        let (id, _, _) = host.last_scheduled().unwrap();
        gate.on_elapsed(id);
        assert!(gate.permits());

        gate.arm(&mut host);
        assert!(!gate.permits());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut host = MockHost::new();
        let mut gate = HoverDebouncer::new(Duration::from_millis(500));
        gate.arm(&mut host);
        let (id, _, _) = host.last_scheduled().unwrap();

        gate.cancel(&mut host);
        gate.cancel(&mut host);

        assert_eq!(host.cancel_count(id), 1);
        assert!(!gate.on_elapsed(id));
    }
}
