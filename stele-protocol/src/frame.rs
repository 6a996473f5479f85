//! RTU frame encoding and decoding.
//!
//! Frame format:
//! - ADDRESS (1 byte): slave address, 0 = broadcast
//! - PDU (1-253 bytes): function code followed by function data
//! - CRC (2 bytes): CRC-16/MODBUS over ADDRESS and PDU, low byte first
//!
//! RTU has no start byte or length field. The receiver collects bytes with a
//! [`FrameAssembler`]. Frames of the supported function codes end at the
//! length their header implies; anything else ends once the line has been
//! silent for [`silent_interval_us`].

use heapless::Vec;

use crate::messages::{
    EXCEPTION_FLAG, FC_READ_HOLDING_REGISTERS, FC_READ_INPUT_REGISTERS,
    FC_WRITE_MULTIPLE_REGISTERS, FC_WRITE_SINGLE_REGISTER,
};

/// Broadcast slave address (writes applied, never answered)
pub const BROADCAST_ADDRESS: u8 = 0;

/// Maximum complete frame size (ADDRESS + PDU + CRC)
pub const MAX_ADU_SIZE: usize = 256;

/// Maximum PDU size (function code + data)
pub const MAX_PDU_SIZE: usize = MAX_ADU_SIZE - 3;

/// Smallest valid frame: address, function code, two CRC bytes
pub const MIN_ADU_SIZE: usize = 4;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer bytes than the smallest valid frame
    TooShort,
    /// More bytes than the largest valid frame
    TooLong,
    /// CRC mismatch
    InvalidCrc,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// CRC-16/MODBUS (reflected polynomial 0xA001, initial value 0xFFFF)
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Inter-frame silence in microseconds for a given baud rate
///
/// 3.5 characters of 11 bits each. Above 19200 baud the interval is fixed
/// at 1750 µs.
pub const fn silent_interval_us(baud: u32) -> u32 {
    if baud > 19_200 || baud == 0 {
        1_750
    } else {
        38_500_000 / baud
    }
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Slave address
    pub address: u8,
    /// Function code and data
    pub pdu: Vec<u8, MAX_PDU_SIZE>,
}

impl Frame {
    /// Create a new frame with the given address and PDU
    pub fn new(address: u8, pdu: &[u8]) -> Result<Self, FrameError> {
        if pdu.is_empty() {
            return Err(FrameError::TooShort);
        }

        let mut pdu_vec = Vec::new();
        pdu_vec
            .extend_from_slice(pdu)
            .map_err(|_| FrameError::TooLong)?;

        Ok(Self {
            address,
            pdu: pdu_vec,
        })
    }

    /// Decode a complete ADU, verifying its CRC
    pub fn decode(adu: &[u8]) -> Result<Self, FrameError> {
        if adu.len() < MIN_ADU_SIZE {
            return Err(FrameError::TooShort);
        }
        if adu.len() > MAX_ADU_SIZE {
            return Err(FrameError::TooLong);
        }

        let (body, crc_bytes) = adu.split_at(adu.len() - 2);
        let received = u16::from_le_bytes([crc_bytes[0], crc_bytes[1]]);
        if crc16(body) != received {
            return Err(FrameError::InvalidCrc);
        }

        Self::new(body[0], &body[1..])
    }

    /// Function code (first PDU byte)
    pub fn function(&self) -> u8 {
        self.pdu[0]
    }

    /// Whether this frame was sent to every station
    pub fn is_broadcast(&self) -> bool {
        self.address == BROADCAST_ADDRESS
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let body_len = 1 + self.pdu.len();
        let frame_len = body_len + 2;
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = self.address;
        buffer[1..body_len].copy_from_slice(&self.pdu);
        let crc = crc16(&buffer[..body_len]);
        buffer[body_len..frame_len].copy_from_slice(&crc.to_le_bytes());

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_ADU_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_ADU_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// ADU lengths a partial frame may complete at
///
/// A shared bus carries requests and other stations' replies, so both
/// forms are candidates. Unknown function codes have none.
fn implied_lengths(adu: &[u8]) -> [Option<usize>; 2] {
    let byte_at = |index: usize| adu.get(index).map(|&byte| byte as usize);
    match adu.get(1) {
        Some(&(FC_READ_HOLDING_REGISTERS | FC_READ_INPUT_REGISTERS)) => {
            [Some(8), byte_at(2).map(|count| 5 + count)]
        }
        Some(&FC_WRITE_SINGLE_REGISTER) => [Some(8), None],
        Some(&FC_WRITE_MULTIPLE_REGISTERS) => [byte_at(6).map(|count| 9 + count), Some(8)],
        Some(&function) if function & EXCEPTION_FLAG != 0 => [Some(5), None],
        _ => [None, None],
    }
}

/// Collects received bytes into frames
///
/// The caller owns the timing: bytes are pushed as they arrive, checked
/// with [`FrameAssembler::take_frame`], and [`FrameAssembler::finish`] is
/// called once a silent interval has elapsed.
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    buffer: Vec<u8, MAX_ADU_SIZE>,
    overflow: bool,
}

impl FrameAssembler {
    /// Create a new, empty assembler
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflow: false,
        }
    }

    /// Discard any partially received frame
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflow = false;
    }

    /// Whether any bytes are pending
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && !self.overflow
    }

    /// Number of bytes collected so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Append a received byte
    ///
    /// Bytes beyond the maximum frame size are dropped and the frame is
    /// reported as too long when finished.
    pub fn push(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.overflow = true;
        }
    }

    /// Append a run of received bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Take a frame that is complete by length
    ///
    /// Returns `Some` once the pending bytes reach a length implied by the
    /// header and carry a valid CRC. Back-to-back frames are split this way
    /// without waiting for silence. Otherwise the bytes stay pending.
    pub fn take_frame(&mut self) -> Option<Frame> {
        let len = self.buffer.len();
        if self.overflow || !implied_lengths(&self.buffer).contains(&Some(len)) {
            return None;
        }

        let frame = Frame::decode(&self.buffer).ok()?;
        self.reset();
        Some(frame)
    }

    /// Close the current frame after a silent interval
    ///
    /// Returns `None` if no bytes were pending. The assembler is reset
    /// either way.
    pub fn finish(&mut self) -> Option<Result<Frame, FrameError>> {
        if self.is_empty() {
            return None;
        }

        let result = if self.overflow {
            Err(FrameError::TooLong)
        } else {
            Frame::decode(&self.buffer)
        };

        self.reset();
        Some(result)
    }
}
