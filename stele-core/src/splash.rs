//! Boot screen
//!
//! Shown once after the configuration is resolved. It is drawn straight to
//! the display, not into the frame buffer, so it stays until the master
//! first changes the frame buffer or requests a clear.

use core::fmt::Write;

use heapless::String;

use crate::config::DeviceConfig;
use crate::registers::DISPLAY_COLS;
use crate::traits::{CharacterDisplay, DisplayError, DisplayExt};

/// Draw the boot screen
pub fn show_splash<D: CharacterDisplay + ?Sized>(
    display: &mut D,
    config: &DeviceConfig,
) -> Result<(), DisplayError> {
    display.clear()?;
    display.write_text(0, 0, "Modbus LCD Ready")?;

    let mut line: String<DISPLAY_COLS> = String::new();
    // "Baud: 115200" is the longest line and fits a row
    let _ = write!(line, "Addr: {}", config.address);
    display.write_text(0, 1, &line)?;

    line.clear();
    let _ = write!(line, "Baud: {}", config.baud.bps());
    display.write_text(0, 2, &line)?;

    display.write_text(0, 3, "Status: Ready")
}
