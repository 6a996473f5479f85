//! HD44780 character LCD behind a PCF8574 I2C expander
//!
//! The controller runs in 4-bit mode. Each expander byte carries one
//! nibble plus the control lines:
//!
//! ```text
//!  bit  7    6    5    4    3          2    1    0
//!      D7   D6   D5   D4   BACKLIGHT  EN   RW   RS
//! ```
//!
//! A nibble is latched by pulsing EN high then low. The driver never reads
//! the busy flag (RW stays low); it waits out the command times instead.

use embedded_hal::delay::DelayNs;
use stele_core::registers::{DISPLAY_COLS, DISPLAY_ROWS};
use stele_core::traits::{CharacterDisplay, DisplayControl, DisplayError};
use stele_hal::I2cBus;

/// Usual address of a PCF8574 backpack (0x3F on PCF8574A boards)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x27;

// Expander control lines
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

// Commands
const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

// Flags
const ENTRY_INCREMENT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINE: u8 = 0x08;

/// DDRAM address of the first cell of each row (20x4 layout)
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Controller code for a display on/off control
pub const fn control_code(control: DisplayControl) -> u8 {
    match control {
        DisplayControl::Blank => CMD_DISPLAY_CONTROL,
        DisplayControl::VisibleNoCursor => CMD_DISPLAY_CONTROL | DISPLAY_ON,
    }
}

/// HD44780 LCD driver
pub struct Hd44780<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<I: I2cBus, D: DelayNs> Hd44780<I, D> {
    /// Create a driver; call [`Hd44780::init`] before use
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: false,
        }
    }

    /// Run the power-on initialization sequence
    ///
    /// Leaves the display on with the cursor hidden, cleared, and the
    /// backlight on.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Controller needs >40 ms after Vcc rises
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Force 8-bit mode three times, whatever state it was in
        self.write_nibble(0x03 << 4)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03 << 4)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03 << 4)?;
        self.delay.delay_us(150);

        // Switch to 4-bit
        self.write_nibble(0x02 << 4)?;

        self.command(CMD_FUNCTION_SET | TWO_LINE)?;
        self.command(control_code(DisplayControl::VisibleNoCursor))?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_INCREMENT)?;
        self.home()?;

        self.set_backlight(true)
    }

    /// Switch the backlight
    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander_write(0)
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Return the cursor to (0, 0)
    pub fn home(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_HOME)?;
        self.delay.delay_us(2_000);
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble(((value << 4) & 0xF0) | mode)
    }

    fn write_nibble(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.expander_write(bits)?;
        self.expander_write(bits | EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits & !EN)?;
        // Commands need >37 us to settle
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        let backlight = if self.backlight { BACKLIGHT } else { 0 };
        self.i2c
            .write(self.address, &[bits | backlight])
            .map_err(|_| DisplayError::Communication)
    }
}

impl<I: I2cBus, D: DelayNs> CharacterDisplay for Hd44780<I, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2_000);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col as usize >= DISPLAY_COLS || row as usize >= DISPLAY_ROWS {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn write_char(&mut self, code: u8) -> Result<(), DisplayError> {
        self.send(code, RS)
    }

    fn control(&mut self, control: DisplayControl) -> Result<(), DisplayError> {
        self.command(control_code(control))
    }
}
