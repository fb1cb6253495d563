//! Standby control
//!
//! Puts the device into the dormant power state on a wake-button press and
//! resumes normal operation after the wake event. While dormant the
//! oscillator is stopped and only the armed wake pin brings the core back;
//! the sampling pipeline continues where it left off.

use defmt::info;
use embassy_rp::gpio::{Input, Level, Pull};
use embassy_time::{Duration, Timer};
use inclinometer_core::power::{PowerDomains, PowerRequest, WakeSource, WakeTrigger};

use crate::system::power;
use crate::system::resources::StandbyButtonResources;

/// Wake pin number armed in the power-up block; must match the pin in the
/// `StandbyButtonResources` group.
const WAKE_PIN: u8 = 22;

/// Button debounce delay (ms)
const DEBOUNCE_DURATION: Duration = Duration::from_millis(30);

/// Standby control task
#[embassy_executor::task]
pub async fn standby_control(r: StandbyButtonResources) {
    let mut button = Input::new(r.wake_pin, Pull::Down);

    loop {
        button.wait_for_high().await;
        Timer::after(DEBOUNCE_DURATION).await;
        if button.get_level() != Level::High {
            continue;
        }

        // Wait out the release: the wake source is a high level on this
        // same pin, so arming it while the button is still held would end
        // the dormant state before it began.
        button.wait_for_low().await;
        Timer::after(DEBOUNCE_DURATION).await;

        info!("Entering dormant state, wake on GPIO {}", WAKE_PIN);
        let request = PowerRequest {
            domains: PowerDomains::ALL_OFF,
            wake: WakeSource::Gpio { pin: WAKE_PIN, trigger: WakeTrigger::HighLevel },
        };
        power::enter_dormant(&request);

        // Execution resumes here once the wake pin went high.
        info!("Woke from dormant state, sampling resumes");
        button.wait_for_low().await;
    }
}
