//! Hardware Resource Management
//!
//! Manages and allocates hardware resources (pins, peripherals) to the
//! firmware's tasks:
//! - Defining clear ownership of hardware resources
//! - Preventing conflicts in hardware access
//! - Providing safe concurrent access to the shared SPI bus
//!
//! # Resource Groups
//! - Accelerometer: chip-select pin (the bus itself is shared)
//! - Report Serial: UART TX pin and DMA channel for the report lines
//! - Standby Button: dormant-wake input pin
//! - Status LED: on-board activity indicator
//!
//! # Shared Resources
//! The SPI bus is created once at startup and shared through a mutex; the
//! sampling task layers a chip-select-framed device on top of it, so every
//! register transaction holds the bus for exactly one chip-select window.

use assign_resources::assign_resources;
use embassy_rp::peripherals::{self, DMA_CH0, DMA_CH1, PIN_16, PIN_18, PIN_19, SPI0};
use embassy_rp::spi::{self, Spi};
use embassy_rp::Peri;
use embassy_sync::mutex::Mutex;
use static_cell::StaticCell;

use crate::SpiBusShared;

/// Accelerometer bus clock rate (1 MHz keeps well inside the part's limit)
const SPI_FREQUENCY: u32 = 1_000_000;

/// Storage for the shared SPI bus; populated exactly once by `init_spi`.
static SPI_BUS: StaticCell<SpiBusShared> = StaticCell::new();

/// Initializes the SPI peripheral and wraps it in the shared-bus mutex.
///
/// This must be called exactly once during system initialization in
/// main.rs, before any tasks are spawned, so that every task sees a ready
/// bus and no initialization race is possible.
pub fn init_spi(
    spi: Peri<'static, SPI0>,
    clk: Peri<'static, PIN_18>,
    mosi: Peri<'static, PIN_19>,
    miso: Peri<'static, PIN_16>,
    tx_dma: Peri<'static, DMA_CH0>,
    rx_dma: Peri<'static, DMA_CH1>,
) -> &'static SpiBusShared {
    let mut config = spi::Config::default();
    config.frequency = SPI_FREQUENCY;
    let spi = Spi::new(spi, clk, mosi, miso, tx_dma, rx_dma, config);
    SPI_BUS.init(Mutex::new(spi))
}

assign_resources! {
    /// Accelerometer chip select; the bus pins are claimed by `init_spi`
    accelerometer: AccelerometerResources {
        cs_pin: PIN_17,
    },
    /// UART serial report output
    report_serial: ReportSerialResources {
        uart: UART0,
        tx_pin: PIN_0,
        tx_dma: DMA_CH2,
    },
    /// Dormant-wake button
    standby_button: StandbyButtonResources {
        wake_pin: PIN_22,
    },
    /// On-board activity LED
    status_led: StatusLedResources {
        led_pin: PIN_25,
    },
}
