//! Board-agnostic core logic for the Stele character display
//!
//! This crate turns a block of bus-writable registers into writes on a
//! character grid. It contains no hardware code:
//!
//! - Register bank and register map
//! - Change detection over the writable region
//! - Clear and display-enable command handshakes
//! - Frame renderer (packed register pairs to cells)
//! - Status publishing into the read-only region
//! - Device configuration and boot screen
//! - Hardware abstraction traits (display surface, bus transport)
//!
//! One [`device::Device`] owns all state. Each cycle the transport is
//! serviced first, then the core runs detect, commands, render and status
//! to completion.

#![no_std]
#![deny(unsafe_code)]

pub mod change;
pub mod charset;
pub mod command;
pub mod config;
pub mod device;
pub mod registers;
pub mod render;
pub mod splash;
pub mod status;
pub mod traits;

#[cfg(test)]
mod mock;

pub use device::{CycleReport, Device};
pub use registers::RegisterBank;
