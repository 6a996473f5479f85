//! Shared register memory

use stele_protocol::RegisterStore;

use super::map::{
    BLANK_PAIR, DISPLAY_ENABLE, FRAME_REGISTERS, STATUS_REGISTERS, WRITABLE_REGISTERS,
};

/// The register surface shared between the bus and the display core
///
/// The bus writes the writable region and reads the status region. Only the
/// core writes the status region.
///
/// Register indices are compile-time constants; indexing past either region
/// panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBank {
    writable: [u16; WRITABLE_REGISTERS],
    readonly: [u16; STATUS_REGISTERS],
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBank {
    /// Create a bank in its power-on state
    ///
    /// Everything is zero except the frame buffer (all spaces) and the
    /// display-enable register (1, matching the display's power-on state).
    pub fn new() -> Self {
        let mut bank = Self {
            writable: [0; WRITABLE_REGISTERS],
            readonly: [0; STATUS_REGISTERS],
        };
        bank.reset_frame();
        bank.writable[DISPLAY_ENABLE] = 1;
        bank
    }

    /// Read a writable register
    ///
    /// # Panics
    /// If `index` is outside the writable region.
    pub fn read(&self, index: usize) -> u16 {
        self.writable[index]
    }

    /// Write a writable register
    ///
    /// # Panics
    /// If `index` is outside the writable region.
    pub fn write(&mut self, index: usize, value: u16) {
        self.writable[index] = value;
    }

    /// Read a status register
    ///
    /// # Panics
    /// If `slot` is outside the status region.
    pub fn status(&self, slot: usize) -> u16 {
        self.readonly[slot]
    }

    pub(crate) fn set_status(&mut self, slot: usize, value: u16) {
        self.readonly[slot] = value;
    }

    /// The whole writable region
    pub fn writable(&self) -> &[u16; WRITABLE_REGISTERS] {
        &self.writable
    }

    /// The whole status region
    pub fn readonly(&self) -> &[u16; STATUS_REGISTERS] {
        &self.readonly
    }

    /// The frame-buffer registers
    pub fn frame(&self) -> &[u16] {
        &self.writable[..FRAME_REGISTERS]
    }

    /// Fill the frame buffer with spaces
    pub fn reset_frame(&mut self) {
        self.writable[..FRAME_REGISTERS].fill(BLANK_PAIR);
    }
}

impl RegisterStore for RegisterBank {
    fn holding(&self) -> &[u16] {
        &self.writable
    }

    fn holding_mut(&mut self) -> &mut [u16] {
        &mut self.writable
    }

    fn input(&self) -> &[u16] {
        &self.readonly
    }
}
