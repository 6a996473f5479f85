//! Slave-side request handling
//!
//! Applies parsed requests to a [`RegisterStore`] and builds the response
//! frame. The slave itself is stateless apart from its station address.

use heapless::Vec;

use crate::frame::{Frame, MAX_PDU_SIZE};
use crate::messages::{exception_pdu, Exception, Request};

/// Register memory exposed over the bus
///
/// Holding registers are readable and writable by the master; input
/// registers are read-only from the bus.
pub trait RegisterStore {
    /// Holding registers (function codes 0x03, 0x06, 0x10)
    fn holding(&self) -> &[u16];

    /// Mutable holding registers
    fn holding_mut(&mut self) -> &mut [u16];

    /// Input registers (function code 0x04)
    fn input(&self) -> &[u16];
}

/// Outcome of handling one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Frame was not for this station (or was a broadcast read)
    Ignored,
    /// Request handled, nothing to send (broadcast write)
    Silent,
    /// Normal response
    Response(Frame),
    /// Exception response
    Exception(Frame, Exception),
}

impl Reply {
    /// Frame to transmit, if any
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Reply::Response(frame) | Reply::Exception(frame, _) => Some(frame),
            Reply::Ignored | Reply::Silent => None,
        }
    }
}

/// Modbus RTU slave station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slave {
    address: u8,
}

impl Slave {
    /// Create a slave answering at `address` (1-247)
    pub fn new(address: u8) -> Self {
        Self { address }
    }

    /// Station address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Handle a received frame
    pub fn handle<S: RegisterStore + ?Sized>(&self, frame: &Frame, store: &mut S) -> Reply {
        let broadcast = frame.is_broadcast();
        if frame.address != self.address && !broadcast {
            return Reply::Ignored;
        }

        let result = Request::parse(&frame.pdu).and_then(|request| {
            if broadcast && !request.is_write() {
                return Ok(None);
            }
            execute(&request, store).map(Some)
        });

        match (result, broadcast) {
            (Ok(None), _) => Reply::Ignored,
            (Ok(Some(_)), true) | (Err(_), true) => Reply::Silent,
            (Ok(Some(pdu)), false) => match Frame::new(self.address, &pdu) {
                Ok(response) => Reply::Response(response),
                Err(_) => self.exception(frame.function(), Exception::ServerDeviceFailure),
            },
            (Err(exception), false) => self.exception(frame.function(), exception),
        }
    }

    fn exception(&self, function: u8, exception: Exception) -> Reply {
        let pdu = exception_pdu(function, exception);
        match Frame::new(self.address, &pdu) {
            Ok(frame) => Reply::Exception(frame, exception),
            // Two-byte PDU always fits
            Err(_) => Reply::Silent,
        }
    }
}

/// Apply a request and build the normal response PDU
fn execute<S: RegisterStore + ?Sized>(
    request: &Request<'_>,
    store: &mut S,
) -> Result<Vec<u8, MAX_PDU_SIZE>, Exception> {
    let mut pdu = Vec::<u8, MAX_PDU_SIZE>::new();
    put(&mut pdu, &[request.function()])?;

    match *request {
        Request::ReadHoldingRegisters { start, quantity } => {
            let registers = range(store.holding(), start, quantity)?;
            put_registers(&mut pdu, registers)?;
        }
        Request::ReadInputRegisters { start, quantity } => {
            let registers = range(store.input(), start, quantity)?;
            put_registers(&mut pdu, registers)?;
        }
        Request::WriteSingleRegister { address, value } => {
            let register = store
                .holding_mut()
                .get_mut(address as usize)
                .ok_or(Exception::IllegalDataAddress)?;
            *register = value;

            put(&mut pdu, &address.to_be_bytes())?;
            put(&mut pdu, &value.to_be_bytes())?;
        }
        Request::WriteMultipleRegisters { start, values } => {
            let quantity = (values.len() / 2) as u16;
            let registers = range_mut(store.holding_mut(), start, quantity)?;
            for (register, pair) in registers.iter_mut().zip(values.chunks_exact(2)) {
                *register = u16::from_be_bytes([pair[0], pair[1]]);
            }

            put(&mut pdu, &start.to_be_bytes())?;
            put(&mut pdu, &quantity.to_be_bytes())?;
        }
    }

    Ok(pdu)
}

fn put(pdu: &mut Vec<u8, MAX_PDU_SIZE>, bytes: &[u8]) -> Result<(), Exception> {
    pdu.extend_from_slice(bytes)
        .map_err(|_| Exception::ServerDeviceFailure)
}

/// Byte count followed by big-endian register values
fn put_registers(pdu: &mut Vec<u8, MAX_PDU_SIZE>, registers: &[u16]) -> Result<(), Exception> {
    put(pdu, &[(registers.len() * 2) as u8])?;
    for value in registers {
        put(pdu, &value.to_be_bytes())?;
    }
    Ok(())
}

fn range(registers: &[u16], start: u16, quantity: u16) -> Result<&[u16], Exception> {
    let start = start as usize;
    let end = start + quantity as usize;
    registers.get(start..end).ok_or(Exception::IllegalDataAddress)
}

fn range_mut(registers: &mut [u16], start: u16, quantity: u16) -> Result<&mut [u16], Exception> {
    let start = start as usize;
    let end = start + quantity as usize;
    registers.get_mut(start..end).ok_or(Exception::IllegalDataAddress)
}
