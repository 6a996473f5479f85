//! Stele Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. Drivers and the bus transport are written against
//! these traits so they can be unit tested on the host with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stele-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stele-drivers (LCD, jumpers, Modbus)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stele-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  stele-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (configuration jumpers)
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication (field bus)
//! - [`i2c::I2cBus`] - I2C bus operations (LCD backpack)
//! - [`time::Clock`] - Monotonic time source (frame gap detection)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use i2c::I2cBus;
pub use time::Clock;
pub use uart::{UartRx, UartTx};
