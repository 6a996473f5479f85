//! Character display surface

use crate::charset;
use crate::registers::DISPLAY_COLS;

/// Errors that can occur while driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the display controller failed
    Communication,
    /// Cursor position outside the grid
    InvalidPosition,
}

/// Display on/off control
///
/// Controller-specific command codes live in the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayControl {
    /// Display off, contents retained
    Blank,
    /// Display on, cursor hidden
    VisibleNoCursor,
}

impl DisplayControl {
    /// Control matching a display-enable register value
    pub fn from_enable(value: u16) -> Self {
        if value == 0 {
            DisplayControl::Blank
        } else {
            DisplayControl::VisibleNoCursor
        }
    }
}

/// Trait for a character grid display
///
/// Positions are `(col, row)`, zero-based. The cursor advances one column
/// after each written character.
pub trait CharacterDisplay {
    /// Clear every cell and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write one controller character code at the cursor
    fn write_char(&mut self, code: u8) -> Result<(), DisplayError>;

    /// Apply a display on/off control
    fn control(&mut self, control: DisplayControl) -> Result<(), DisplayError>;
}

/// Helper for writing text lines
pub trait DisplayExt: CharacterDisplay {
    /// Write ASCII text starting at `(col, row)`
    ///
    /// Text running past the end of the row is cut off.
    fn write_text(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        let room = DISPLAY_COLS.saturating_sub(col as usize);
        for &byte in text.as_bytes().iter().take(room) {
            self.write_char(charset::to_display_code(byte))?;
        }
        Ok(())
    }
}

impl<T: CharacterDisplay + ?Sized> DisplayExt for T {}
