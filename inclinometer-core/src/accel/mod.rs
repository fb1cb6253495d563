//! Three-axis SPI accelerometer driver.
//!
//! The part speaks a command-prefixed register protocol over a
//! chip-select-framed bus: every transaction opens with a command byte
//! (read or write) and a register address, followed by the payload bytes.
//! Axis data lives in three consecutive big-endian 16-bit register pairs
//! (upper byte at the lower address), each carrying a 14-bit
//! two's-complement reading in its upper bits.
//!
//! The driver is generic over [`AccelBus`] so the register protocol can be
//! exercised against a scripted bus on the host; [`spi::SpiInterface`]
//! implements the trait for any `embedded-hal-async` SPI device.

pub mod spi;

/// Command byte opening a register write transaction.
pub const CMD_WRITE: u8 = 0x0A;
/// Command byte opening a register read transaction.
pub const CMD_READ: u8 = 0x0B;

/// Device identification register.
pub const REG_DEVID: u8 = 0x00;
/// First axis data register (X upper byte); X/Y/Z pairs are consecutive.
pub const REG_AXIS_DATA: u8 = 0x0E;
/// Power control register; switches the part between standby and measurement.
pub const REG_POWER_CTL: u8 = 0x2D;

/// Expected contents of [`REG_DEVID`].
pub const DEVICE_ID: u8 = 0xAD;
/// [`REG_POWER_CTL`] value selecting continuous measurement mode.
pub const MODE_MEASURE: u8 = 0x02;

/// Unused low bits in each 16-bit axis register pair.
const AXIS_SHIFT: i16 = 2;

/// Acceleration represented by one raw LSB, in g.
pub const SENSITIVITY: f32 = 0.00025;

/// Bus access required by the driver.
///
/// Implementations must frame each call as exactly one chip-select-low
/// window; the driver never splits a register access across transactions.
#[allow(async_fn_in_trait)]
pub trait AccelBus {
    /// Error produced by the concrete bus implementation.
    type Error;

    /// Writes one register: command byte, address, value.
    async fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;

    /// Reads `buf.len()` consecutive registers starting at `address`.
    async fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// Driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A bus transaction failed or the device did not respond.
    Bus(E),
    /// The identification register did not match [`DEVICE_ID`].
    InvalidDevice,
}

/// Raw signed axis readings, one decoded 14-bit value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAxes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Acceleration per axis in g.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GForce {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Assembles one axis from its big-endian register pair.
///
/// The shift discarding the unused low bits must be arithmetic so the sign
/// of the 14-bit reading survives.
pub fn decode_axis(high: u8, low: u8) -> i16 {
    i16::from_be_bytes([high, low]) >> AXIS_SHIFT
}

/// Converts raw axis readings to g-force.
pub fn to_g_force(raw: RawAxes) -> GForce {
    GForce {
        x: f32::from(raw.x) * SENSITIVITY,
        y: f32::from(raw.y) * SENSITIVITY,
        z: f32::from(raw.z) * SENSITIVITY,
    }
}

/// Register-level driver for the accelerometer.
pub struct Accelerometer<B> {
    bus: B,
}

impl<B: AccelBus> Accelerometer<B> {
    /// Wraps a bus; the device is not touched until [`init`](Self::init).
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Verifies the device identity and switches to measurement mode.
    ///
    /// Until this succeeds the part sits in standby and the axis registers
    /// hold no valid data, so callers must treat a failure as fatal for
    /// sampling.
    pub async fn init(&mut self) -> Result<(), Error<B::Error>> {
        let mut id = [0u8; 1];
        self.bus
            .read_registers(REG_DEVID, &mut id)
            .await
            .map_err(Error::Bus)?;
        if id[0] != DEVICE_ID {
            return Err(Error::InvalidDevice);
        }
        self.bus
            .write_register(REG_POWER_CTL, MODE_MEASURE)
            .await
            .map_err(Error::Bus)
    }

    /// Reads and decodes all three axis register pairs in one transaction.
    pub async fn read_axes(&mut self) -> Result<RawAxes, Error<B::Error>> {
        let mut raw = [0u8; 6];
        self.bus
            .read_registers(REG_AXIS_DATA, &mut raw)
            .await
            .map_err(Error::Bus)?;
        Ok(RawAxes {
            x: decode_axis(raw[0], raw[1]),
            y: decode_axis(raw[2], raw[3]),
            z: decode_axis(raw[4], raw[5]),
        })
    }

    /// One full sample: raw axes converted to g.
    pub async fn acceleration(&mut self) -> Result<GForce, Error<B::Error>> {
        Ok(to_g_force(self.read_axes().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    /// Register-file bus double: writes land in an array, reads copy
    /// consecutive registers back out.
    struct EchoBus {
        regs: [u8; 0x40],
    }

    impl EchoBus {
        fn new() -> Self {
            let mut regs = [0u8; 0x40];
            regs[REG_DEVID as usize] = DEVICE_ID;
            Self { regs }
        }

        fn load(&mut self, address: u8, bytes: &[u8]) {
            let start = address as usize;
            self.regs[start..start + bytes.len()].copy_from_slice(bytes);
        }
    }

    impl AccelBus for EchoBus {
        type Error = ();

        async fn write_register(&mut self, address: u8, value: u8) -> Result<(), ()> {
            self.regs[address as usize] = value;
            Ok(())
        }

        async fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), ()> {
            let start = address as usize;
            buf.copy_from_slice(&self.regs[start..start + buf.len()]);
            Ok(())
        }
    }

    /// Bus double that fails the first `failures` transactions.
    struct FlakyBus {
        inner: EchoBus,
        failures: u32,
    }

    impl AccelBus for FlakyBus {
        type Error = ();

        async fn write_register(&mut self, address: u8, value: u8) -> Result<(), ()> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(());
            }
            self.inner.write_register(address, value).await
        }

        async fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), ()> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(());
            }
            self.inner.read_registers(address, buf).await
        }
    }

    #[test]
    fn decode_shift_is_arithmetic() {
        // A negative pair must stay negative through the shift and a
        // positive one positive; a logical shift would break the first.
        assert_eq!(decode_axis(0xFF, 0xFC), -1);
        assert_eq!(decode_axis(0x00, 0x04), 1);
        assert_eq!(decode_axis(0x80, 0x00), -8192);
        assert_eq!(decode_axis(0x7F, 0xFC), 8191);
    }

    #[test]
    fn conversion_is_deterministic() {
        let raw = RawAxes { x: 400, y: -400, z: 16000 };
        let a = to_g_force(raw);
        let b = to_g_force(raw);
        assert_eq!(a, b);
        assert!((a.x - 0.100).abs() < 1e-6);
        assert!((a.y + 0.100).abs() < 1e-6);
        assert!((a.z - 4.000).abs() < 1e-6);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut bus = EchoBus::new();
        let value = block_on(async {
            bus.write_register(REG_POWER_CTL, 0x5A).await.unwrap();
            let mut buf = [0u8; 1];
            bus.read_registers(REG_POWER_CTL, &mut buf).await.unwrap();
            buf[0]
        });
        assert_eq!(value, 0x5A);
    }

    #[test]
    fn read_axes_assembles_big_endian_pairs() {
        let mut bus = EchoBus::new();
        // 0x0640 -> 400, 0xF9C0 -> -400, 0x0FA0 -> 1000 after the shift.
        bus.load(REG_AXIS_DATA, &[0x06, 0x40, 0xF9, 0xC0, 0x0F, 0xA0]);
        let mut sensor = Accelerometer::new(bus);
        let axes = block_on(sensor.read_axes()).unwrap();
        assert_eq!(axes, RawAxes { x: 400, y: -400, z: 1000 });
    }

    #[test]
    fn init_enters_measurement_mode() {
        let mut sensor = Accelerometer::new(EchoBus::new());
        block_on(sensor.init()).unwrap();
        assert_eq!(sensor.bus.regs[REG_POWER_CTL as usize], MODE_MEASURE);
    }

    #[test]
    fn init_rejects_unknown_device() {
        let mut bus = EchoBus::new();
        bus.regs[REG_DEVID as usize] = 0x00;
        let mut sensor = Accelerometer::new(bus);
        assert_eq!(block_on(sensor.init()), Err(Error::InvalidDevice));
        // The part must not be switched on when the identity is wrong.
        assert_eq!(sensor.bus.regs[REG_POWER_CTL as usize], 0x00);
    }

    #[test]
    fn bus_failure_surfaces_then_next_read_recovers() {
        let mut inner = EchoBus::new();
        inner.load(REG_AXIS_DATA, &[0x00, 0x04, 0x00, 0x00, 0x0F, 0xA0]);
        let mut sensor = Accelerometer::new(FlakyBus { inner, failures: 1 });

        assert_eq!(block_on(sensor.read_axes()), Err(Error::Bus(())));
        let axes = block_on(sensor.read_axes()).unwrap();
        assert_eq!(axes, RawAxes { x: 1, y: 0, z: 1000 });
    }
}
