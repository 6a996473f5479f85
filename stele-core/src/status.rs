//! Status publishing into the read-only register region

use crate::config::DeviceConfig;
use crate::registers::map::status;
use crate::registers::RegisterBank;

/// Firmware version reported in the status region (`major << 8 | minor`)
pub const FIRMWARE_VERSION: u16 = 0x0100;

/// Error code shown in the status region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    /// No error
    pub const NONE: Self = Self(0x0000);
    /// A display operation failed
    pub const DISPLAY_IO: Self = Self(0x0001);

    /// Whether this is an actual error
    pub fn is_error(self) -> bool {
        self != Self::NONE
    }
}

/// Owner of the status region contents
///
/// Keeps the authoritative error code; the status register mirrors it.
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    error: ErrorCode,
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPublisher {
    /// Create a publisher with no error recorded
    pub fn new() -> Self {
        Self {
            error: ErrorCode::NONE,
        }
    }

    /// Current error code
    pub fn error(&self) -> ErrorCode {
        self.error
    }

    /// Rewrite the per-cycle slots (version and readiness)
    pub fn refresh_status(&self, bank: &mut RegisterBank) {
        bank.set_status(status::VERSION, FIRMWARE_VERSION);
        bank.set_status(status::READY, 1);
    }

    /// Record an error
    pub fn set_error(&mut self, bank: &mut RegisterBank, code: ErrorCode) {
        self.error = code;
        bank.set_status(status::ERROR, code.0);
    }

    /// Clear the recorded error
    pub fn clear_error(&mut self, bank: &mut RegisterBank) {
        self.set_error(bank, ErrorCode::NONE);
    }

    /// Publish the resolved configuration
    ///
    /// Written once at startup; not refreshed per cycle.
    pub fn publish_config(&self, bank: &mut RegisterBank, config: &DeviceConfig) {
        bank.set_status(status::ADDRESS, config.address as u16);
        bank.set_status(status::BAUD, (config.baud.bps() / 100) as u16);
    }
}
