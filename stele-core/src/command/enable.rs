//! Display enable register

use crate::registers::{RegisterBank, DISPLAY_ENABLE};
use crate::traits::{CharacterDisplay, DisplayControl, DisplayError};

/// Applies the display-enable register whenever its value changes
///
/// The last applied raw value is tracked, so any change of value sends a
/// control command, including a change between two nonzero values.
#[derive(Debug, Clone)]
pub struct DisplayEnableCommand {
    applied: u16,
}

impl Default for DisplayEnableCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayEnableCommand {
    /// Start in the enabled state, matching the display at power on
    pub fn new() -> Self {
        Self { applied: 1 }
    }

    /// Last applied register value
    pub fn applied(&self) -> u16 {
        self.applied
    }

    /// Poll the enable register
    ///
    /// Returns the control sent and its result, or `None` when the value
    /// did not change. A failed control is not retried.
    pub fn poll<D: CharacterDisplay + ?Sized>(
        &mut self,
        bank: &RegisterBank,
        display: &mut D,
    ) -> Option<(DisplayControl, Result<(), DisplayError>)> {
        let value = bank.read(DISPLAY_ENABLE);
        if value == self.applied {
            return None;
        }

        let control = DisplayControl::from_enable(value);
        let result = display.control(control);
        self.applied = value;
        Some((control, result))
    }
}
