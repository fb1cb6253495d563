//! Periodic sample notifier
//!
//! Fires at the fixed sampling interval and raises the sample gate. All
//! real work is deferred to the sampling loop; a tick that lands while the
//! previous one is still being serviced collapses into it instead of
//! queueing.

use embassy_time::{Duration, Ticker};

use crate::task::accel_read::notify_sample_due;

/// Time between accelerometer samples
const SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Periodic notifier task
#[embassy_executor::task]
pub async fn sample_tick() {
    let mut ticker = Ticker::every(SAMPLE_INTERVAL);
    loop {
        ticker.next().await;
        // Nothing else belongs here: no bus access, no computation. Raise
        // the gate and go back to sleep.
        notify_sample_due();
    }
}
