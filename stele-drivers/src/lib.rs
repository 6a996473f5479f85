//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stele-core, written against the stele-hal traits:
//!
//! - Character LCD (HD44780 behind a PCF8574 I2C backpack)
//! - Configuration jumpers (station address, line speed)
//! - Modbus RTU bus transport

#![no_std]
#![deny(unsafe_code)]

pub mod jumpers;
pub mod lcd;
pub mod modbus;
