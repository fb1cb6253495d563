//! [`AccelBus`] over an `embedded-hal-async` SPI device.

use embedded_hal_async::spi::{Operation, SpiDevice};

use super::{AccelBus, CMD_READ, CMD_WRITE};

/// Command-prefixed register protocol on a shared SPI bus.
///
/// The `SpiDevice` contract supplies the chip-select framing: each method
/// below runs as exactly one chip-select-low window.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }
}

impl<SPI: SpiDevice> AccelBus for SpiInterface<SPI> {
    type Error = SPI::Error;

    async fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.spi.write(&[CMD_WRITE, address, value]).await
    }

    async fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.spi
            .transaction(&mut [Operation::Write(&[CMD_READ, address]), Operation::Read(buf)])
            .await
    }
}
