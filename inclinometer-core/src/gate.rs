//! Single-slot sample notification.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// One-bit handoff from the periodic notifier to the sampling loop.
///
/// The slot holds at most one pending notification: raising the gate while
/// one is already pending collapses the two into one, so a burst of ticks
/// is serviced exactly once. [`wait`](Self::wait) drains the slot, and the
/// safe single-producer/single-consumer pattern is the notifier writing and
/// the sampling loop draining.
pub struct SampleGate {
    slot: Signal<CriticalSectionRawMutex, ()>,
}

impl SampleGate {
    /// Creates an empty gate.
    pub const fn new() -> Self {
        Self { slot: Signal::new() }
    }

    /// Raises the notification. Never blocks.
    pub fn notify(&self) {
        self.slot.signal(());
    }

    /// Waits until a notification is pending, then drains it.
    pub async fn wait(&self) {
        self.slot.wait().await;
    }

    /// True while a notification is pending and undrained.
    pub fn pending(&self) -> bool {
        self.slot.signaled()
    }
}

#[cfg(test)]
mod tests {
    use core::task::Poll;

    use embassy_futures::{block_on, poll_once};

    use super::SampleGate;

    #[test]
    fn notify_then_wait_drains() {
        let gate = SampleGate::new();
        gate.notify();
        assert!(gate.pending());
        block_on(gate.wait());
        assert!(!gate.pending());
    }

    #[test]
    fn bursts_collapse_into_one_service() {
        let gate = SampleGate::new();
        // Two firings with no intervening drain...
        gate.notify();
        gate.notify();
        // ...are serviced once; the next wait has nothing to drain.
        block_on(gate.wait());
        assert_eq!(poll_once(gate.wait()), Poll::Pending);
    }

    #[test]
    fn each_service_needs_a_fresh_notification() {
        let gate = SampleGate::new();
        gate.notify();
        block_on(gate.wait());
        assert_eq!(poll_once(gate.wait()), Poll::Pending);
        gate.notify();
        assert_eq!(poll_once(gate.wait()), Poll::Ready(()));
    }
}
