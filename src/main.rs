//! Inclinometer firmware entry point
//!
//! Initializes system and spawns the sampling pipeline tasks.

#![no_std]
#![no_main]

use crate::task::{
    accel_read::accel_read, sample_tick::sample_tick, standby_control::standby_control,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async as SpiAsync, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use system::resources::{
    self, AccelerometerResources, AssignedResources, ReportSerialResources,
    StandbyButtonResources, StatusLedResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Shared SPI bus handed to the sampling task
pub type SpiBusShared = Mutex<CriticalSectionRawMutex, Spi<'static, SPI0, SpiAsync>>;

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Bring up the shared SPI bus before spawning any tasks, so the
    // sampling task finds the accelerometer bus ready. This is the only
    // place the bus is created; tasks get a chip-select-scoped device on
    // top of it.
    let spi_bus = resources::init_spi(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, p.DMA_CH0, p.DMA_CH1);

    // Split the remaining resources into separate groups, one per task.
    let r = split_resources!(p);

    // Spawn the notifier last so the sampling loop is already waiting on
    // the gate when the first tick lands.
    spawner
        .spawn(accel_read(spi_bus, r.accelerometer, r.report_serial, r.status_led))
        .unwrap();
    spawner.spawn(standby_control(r.standby_button)).unwrap();
    spawner.spawn(sample_tick()).unwrap();
}
