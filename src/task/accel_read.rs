//! Accelerometer sampling loop
//!
//! Drives the measurement pipeline: wait until the sample gate is raised,
//! read the three axis registers, convert to g-force and emit one report
//! line over the serial link. Between ticks the executor parks the core in
//! its low-power wait; only an enabled interrupt (the sample timer, or the
//! wake pin while in standby) resumes execution. That wait cannot be
//! cancelled from software; it always ends on an interrupt.
//!
//! # Error handling
//! A failed bus transaction skips the tick: the loop logs it and returns
//! to waiting, and the next timer tick is the retry. Repeated failures
//! escalate the log level but never stop the loop. A configuration failure
//! at startup is fatal - the task logs and terminates without entering the
//! loop, since sampling without a configured sensor is meaningless.

use defmt::{error, info, warn};
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::uart::{self, UartTx};
use inclinometer_core::accel::spi::SpiInterface;
use inclinometer_core::accel::Accelerometer;
use inclinometer_core::gate::SampleGate;
use inclinometer_core::report::format_report;

use crate::system::resources::{
    AccelerometerResources, ReportSerialResources, StatusLedResources,
};
use crate::SpiBusShared;

/// Consecutive bus failures before warnings escalate to errors
const FAILURE_ESCALATION: u32 = 10;

/// Pending-sample gate, raised by the periodic notifier.
///
/// Owned here so only the sampling loop can drain it; the notifier writes
/// through [`notify_sample_due`].
static SAMPLE_GATE: SampleGate = SampleGate::new();

/// Raises the sample gate. Bursts collapse into one pending sample.
pub fn notify_sample_due() {
    SAMPLE_GATE.notify();
}

/// Sampling loop task
#[embassy_executor::task]
pub async fn accel_read(
    spi_bus: &'static SpiBusShared,
    r: AccelerometerResources,
    serial: ReportSerialResources,
    led: StatusLedResources,
) {
    let cs = Output::new(r.cs_pin, Level::High);
    let spi = SpiDevice::new(spi_bus, cs);
    let mut sensor = Accelerometer::new(SpiInterface::new(spi));

    let mut uart = UartTx::new(serial.uart, serial.tx_pin, serial.tx_dma, uart::Config::default());
    let mut activity_led = Output::new(led.led_pin, Level::Low);

    // Switch the part into measurement mode before the first tick.
    if let Err(e) = sensor.init().await {
        error!("Accelerometer configuration failed: {} - sampling task terminating", e);
        return;
    }
    info!("Accelerometer configured, measurement mode active");

    let mut consecutive_failures = 0u32;

    loop {
        // Idle: parked until the notifier raises the gate.
        SAMPLE_GATE.wait().await;

        // Servicing: one read-convert-report cycle, then back to waiting.
        match sensor.acceleration().await {
            Ok(g) => {
                if consecutive_failures > 0 {
                    info!("Accelerometer recovered after {} failed ticks", consecutive_failures);
                    consecutive_failures = 0;
                }
                activity_led.toggle();
                info!("Acceleration: x={} g, y={} g, z={} g", g.x, g.y, g.z);

                let line = format_report(&g);
                if let Err(e) = uart.write(line.as_bytes()).await {
                    warn!("Report write failed: {}", e);
                }
            }
            Err(e) => {
                consecutive_failures += 1;
                if consecutive_failures >= FAILURE_ESCALATION {
                    error!(
                        "Accelerometer unresponsive: {} ({} consecutive failed ticks)",
                        e, consecutive_failures
                    );
                } else {
                    warn!("Accelerometer read failed: {} - skipping tick", e);
                }
            }
        }
    }
}
