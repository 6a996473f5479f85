//! Board pin assignments
//!
//! | GPIO  | Function                  |
//! |-------|---------------------------|
//! | 0     | UART0 TX (bus transceiver)|
//! | 1     | UART0 RX                  |
//! | 2..=5 | Address jumpers, bit 0..3 |
//! | 6..=7 | Speed jumpers, bit 0..1   |
//! | 20    | I2C0 SDA (LCD backpack)   |
//! | 21    | I2C0 SCL                  |
//!
//! embassy-rp hands out pins as typed peripherals, so the firmware claims
//! them by name (`p.PIN_2` ...) following this table.

/// Settling time for the jumper pull-ups before sampling
pub const JUMPER_SETTLE_MS: u64 = 100;
