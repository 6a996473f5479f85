//! RP2040-specific HAL for the character display firmware
//!
//! This crate provides RP2040 implementations of the shared `stele-hal`
//! traits on top of embassy-rp:
//!
//! - Jumper inputs ([`gpio::JumperInput`])
//! - Blocking I2C master for the LCD backpack ([`i2c::BlockingI2c`])
//! - Buffered UART halves for the field bus ([`uart::BufferedRx`], [`uart::BufferedTx`])
//! - Monotonic clock from the embassy time driver ([`time::EmbassyClock`])
//! - Board pin assignments ([`pins`])

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod pins;
pub mod time;
pub mod uart;

// Re-export shared traits from stele-hal for convenience
pub use stele_hal::{Clock, I2cBus, InputPin, UartRx, UartTx};
