//! Modbus RTU Slave Protocol
//!
//! This crate implements the serial side of the field bus that the Stele
//! display is attached to. A remote controller (the Modbus master) reads and
//! writes 16-bit registers; the display firmware answers as a slave.
//!
//! # Protocol Overview
//!
//! Every message is an Application Data Unit (ADU):
//! ```text
//! ┌─────────┬──────────┬─────────────┬──────────┐
//! │ ADDRESS │ FUNCTION │ DATA        │ CRC-16   │
//! │ 1B      │ 1B       │ 0–252B      │ 2B (LE)  │
//! └─────────┴──────────┴─────────────┴──────────┘
//! ```
//!
//! Frames carry no length or start byte: they are delimited on the wire by
//! at least 3.5 character times of silence.
//!
//! Supported function codes:
//! - `0x03` Read Holding Registers
//! - `0x04` Read Input Registers
//! - `0x06` Write Single Register
//! - `0x10` Write Multiple Registers

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod slave;

pub use frame::{
    crc16, silent_interval_us, Frame, FrameAssembler, FrameError, BROADCAST_ADDRESS,
    MAX_ADU_SIZE, MAX_PDU_SIZE,
};
pub use messages::{Exception, Request};
pub use slave::{RegisterStore, Reply, Slave};
