//! Request and response PDUs
//!
//! Requests are parsed from the PDU of a received frame. Responses are
//! built directly into a PDU buffer by the [`crate::slave::Slave`].

use crate::frame::MAX_PDU_SIZE;
use heapless::Vec;

// Function codes
pub const FC_READ_HOLDING_REGISTERS: u8 = 0x03;
pub const FC_READ_INPUT_REGISTERS: u8 = 0x04;
pub const FC_WRITE_SINGLE_REGISTER: u8 = 0x06;
pub const FC_WRITE_MULTIPLE_REGISTERS: u8 = 0x10;

/// Bit set in the function code of an exception response
pub const EXCEPTION_FLAG: u8 = 0x80;

/// Maximum registers per read request
pub const MAX_READ_QUANTITY: u16 = 125;

/// Maximum registers per write-multiple request
pub const MAX_WRITE_QUANTITY: u16 = 123;

/// Modbus exception codes returned to the master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Exception {
    /// Function code not supported
    IllegalFunction = 0x01,
    /// Register range outside the addressed region
    IllegalDataAddress = 0x02,
    /// Malformed request (quantity, byte count, length)
    IllegalDataValue = 0x03,
    /// Unrecoverable error while performing the action
    ServerDeviceFailure = 0x04,
}

impl Exception {
    /// Wire value of this exception
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A parsed master request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request<'a> {
    /// Read a run of holding (writable) registers
    ReadHoldingRegisters { start: u16, quantity: u16 },
    /// Read a run of input (read-only) registers
    ReadInputRegisters { start: u16, quantity: u16 },
    /// Write one holding register
    WriteSingleRegister { address: u16, value: u16 },
    /// Write a run of holding registers
    ///
    /// `values` holds `2 * quantity` big-endian bytes.
    WriteMultipleRegisters { start: u16, values: &'a [u8] },
}

impl<'a> Request<'a> {
    /// Parse a request from a PDU
    ///
    /// Validates lengths and quantities; register ranges are checked
    /// against the actual register store by the slave.
    pub fn parse(pdu: &'a [u8]) -> Result<Self, Exception> {
        let (&function, data) = pdu.split_first().ok_or(Exception::IllegalDataValue)?;

        match function {
            FC_READ_HOLDING_REGISTERS | FC_READ_INPUT_REGISTERS => {
                if data.len() != 4 {
                    return Err(Exception::IllegalDataValue);
                }
                let start = be_u16(data, 0);
                let quantity = be_u16(data, 2);
                if quantity == 0 || quantity > MAX_READ_QUANTITY {
                    return Err(Exception::IllegalDataValue);
                }
                if function == FC_READ_HOLDING_REGISTERS {
                    Ok(Request::ReadHoldingRegisters { start, quantity })
                } else {
                    Ok(Request::ReadInputRegisters { start, quantity })
                }
            }
            FC_WRITE_SINGLE_REGISTER => {
                if data.len() != 4 {
                    return Err(Exception::IllegalDataValue);
                }
                Ok(Request::WriteSingleRegister {
                    address: be_u16(data, 0),
                    value: be_u16(data, 2),
                })
            }
            FC_WRITE_MULTIPLE_REGISTERS => {
                if data.len() < 5 {
                    return Err(Exception::IllegalDataValue);
                }
                let start = be_u16(data, 0);
                let quantity = be_u16(data, 2);
                let byte_count = data[4] as usize;
                if quantity == 0
                    || quantity > MAX_WRITE_QUANTITY
                    || byte_count != quantity as usize * 2
                    || data.len() != 5 + byte_count
                {
                    return Err(Exception::IllegalDataValue);
                }
                Ok(Request::WriteMultipleRegisters {
                    start,
                    values: &data[5..],
                })
            }
            _ => Err(Exception::IllegalFunction),
        }
    }

    /// Function code of this request
    pub fn function(&self) -> u8 {
        match self {
            Request::ReadHoldingRegisters { .. } => FC_READ_HOLDING_REGISTERS,
            Request::ReadInputRegisters { .. } => FC_READ_INPUT_REGISTERS,
            Request::WriteSingleRegister { .. } => FC_WRITE_SINGLE_REGISTER,
            Request::WriteMultipleRegisters { .. } => FC_WRITE_MULTIPLE_REGISTERS,
        }
    }

    /// Whether this request modifies registers
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Request::WriteSingleRegister { .. } | Request::WriteMultipleRegisters { .. }
        )
    }
}

/// Build an exception response PDU
pub fn exception_pdu(function: u8, exception: Exception) -> Vec<u8, MAX_PDU_SIZE> {
    let mut pdu = Vec::new();
    // Two bytes always fit
    let _ = pdu.push(function | EXCEPTION_FLAG);
    let _ = pdu.push(exception.code());
    pdu
}

/// Read a big-endian u16 at `offset`
fn be_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}
