//! Modbus RTU bus transport
//!
//! Connects the register bank to a serial line. Each service call drains
//! the UART byte by byte. A frame of a supported function code is handled
//! as soon as its implied length arrives with a valid CRC, so back-to-back
//! frames on a shared bus are split without waiting for silence. Any other
//! pending bytes are decoded as one frame once the line has been quiet for
//! the 3.5 character silent interval.
//!
//! Timing is measured at service granularity: the timestamp of a chunk is
//! when it was read, not when it arrived. This only ever delays the end of
//! a silence-delimited frame, it never splits one.

use stele_core::config::DeviceConfig;
use stele_core::registers::RegisterBank;
use stele_core::traits::Transport;
use stele_hal::{Clock, UartRx, UartTx};
use stele_protocol::{
    silent_interval_us, Frame, FrameAssembler, FrameError, Reply, Slave, MAX_ADU_SIZE,
};

/// Bytes read from the UART per call
const READ_CHUNK: usize = 64;

/// Transport counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportStats {
    /// Frames addressed to this station (or broadcast) and handled
    pub frames: u32,
    /// Frames dropped for a bad CRC
    pub crc_errors: u32,
    /// Frames dropped for a bad length
    pub framing_errors: u32,
    /// Exception responses sent
    pub exceptions: u32,
    /// Frames for other stations, and broadcast reads
    pub ignored: u32,
    /// UART read or write failures
    pub uart_errors: u32,
}

/// Modbus RTU slave transport
pub struct ModbusTransport<R, W, C> {
    rx: R,
    tx: W,
    clock: C,
    slave: Slave,
    assembler: FrameAssembler,
    silent_us: u64,
    last_byte_us: u64,
    stats: TransportStats,
}

impl<R: UartRx, W: UartTx, C: Clock> ModbusTransport<R, W, C> {
    /// Create a transport answering at the configured address and speed
    pub fn new(rx: R, tx: W, clock: C, config: &DeviceConfig) -> Self {
        Self {
            rx,
            tx,
            clock,
            slave: Slave::new(config.address),
            assembler: FrameAssembler::new(),
            silent_us: silent_interval_us(config.baud.bps()) as u64,
            last_byte_us: 0,
            stats: TransportStats::default(),
        }
    }

    pub fn stats(&self) -> &TransportStats {
        &self.stats
    }

    pub fn slave(&self) -> &Slave {
        &self.slave
    }

    /// Read everything the UART has buffered, handling complete frames
    fn drain(&mut self, bank: &mut RegisterBank) {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = match self.rx.read_available(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(_) => {
                    // Partial frame is unusable
                    self.stats.uart_errors = self.stats.uart_errors.wrapping_add(1);
                    self.assembler.reset();
                    break;
                }
            };
            self.last_byte_us = self.clock.now_us();

            for &byte in &chunk[..n] {
                self.assembler.push(byte);
                if let Some(frame) = self.assembler.take_frame() {
                    self.respond(&frame, bank);
                }
            }
        }
    }

    fn respond(&mut self, frame: &Frame, bank: &mut RegisterBank) {
        let reply = self.slave.handle(frame, bank);
        match reply {
            Reply::Ignored => {
                self.stats.ignored = self.stats.ignored.wrapping_add(1);
                return;
            }
            Reply::Exception(..) => {
                self.stats.exceptions = self.stats.exceptions.wrapping_add(1);
            }
            Reply::Silent | Reply::Response(_) => {}
        }
        self.stats.frames = self.stats.frames.wrapping_add(1);

        let Some(response) = reply.frame() else {
            return;
        };
        let mut buffer = [0u8; MAX_ADU_SIZE];
        // Any reply fits the largest ADU
        let Ok(len) = response.encode(&mut buffer) else {
            return;
        };
        let sent = self
            .tx
            .write_blocking(&buffer[..len])
            .and_then(|()| self.tx.flush());
        if sent.is_err() {
            self.stats.uart_errors = self.stats.uart_errors.wrapping_add(1);
        }
    }
}

impl<R: UartRx, W: UartTx, C: Clock> Transport for ModbusTransport<R, W, C> {
    fn service(&mut self, bank: &mut RegisterBank) {
        self.drain(bank);

        if self.assembler.is_empty()
            || self.clock.elapsed_since(self.last_byte_us) < self.silent_us
        {
            return;
        }

        match self.assembler.finish() {
            Some(Ok(frame)) => self.respond(&frame, bank),
            Some(Err(FrameError::InvalidCrc)) => {
                self.stats.crc_errors = self.stats.crc_errors.wrapping_add(1);
            }
            Some(Err(_)) => {
                self.stats.framing_errors = self.stats.framing_errors.wrapping_add(1);
            }
            None => {}
        }
    }
}
