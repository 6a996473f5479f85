//! I2C master

use embedded_hal::i2c::I2c;

/// Adapts any embedded-hal blocking I2C master to [`stele_hal::I2cBus`]
///
/// Used with `embassy_rp::i2c::I2c<'_, I2C0, Blocking>` for the LCD.
pub struct BlockingI2c<B> {
    bus: B,
}

impl<B: I2c> BlockingI2c<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: I2c> stele_hal::I2cBus for BlockingI2c<B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }
}
