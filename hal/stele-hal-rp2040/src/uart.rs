//! Buffered UART halves
//!
//! embassy-rp's buffered UART fills a ring buffer from its interrupt
//! handler. The receive adapter only reads when the ring buffer already
//! holds data, so a service call never blocks waiting for the bus.

use embedded_io::{Read, ReadReady, Write};

/// Non-blocking receive half
pub struct BufferedRx<R> {
    rx: R,
}

impl<R: Read + ReadReady> BufferedRx<R> {
    pub fn new(rx: R) -> Self {
        Self { rx }
    }
}

impl<R: Read + ReadReady> stele_hal::UartRx for BufferedRx<R> {
    type Error = R::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !self.rx.read_ready()? {
            return Ok(0);
        }
        self.rx.read(buf)
    }
}

/// Blocking transmit half
pub struct BufferedTx<W> {
    tx: W,
}

impl<W: Write> BufferedTx<W> {
    pub fn new(tx: W) -> Self {
        Self { tx }
    }
}

impl<W: Write> stele_hal::UartTx for BufferedTx<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.flush()
    }
}
