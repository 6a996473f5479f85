//! Register map
//!
//! Writable (holding) registers:
//!
//! | Index     | Purpose                                   |
//! |-----------|-------------------------------------------|
//! | 0..40     | Frame buffer, two character codes each    |
//! | 40..110   | Reserved                                  |
//! | 110       | Clear request (nonzero = requested)       |
//! | 111       | Clear acknowledge (1 = done)              |
//! | 112       | Display enable (0 = blank)                |
//! | 113..120  | Reserved                                  |
//!
//! Read-only (input) registers are listed in [`status`].

/// Display columns
pub const DISPLAY_COLS: usize = 20;

/// Display rows
pub const DISPLAY_ROWS: usize = 4;

/// Total character cells
pub const DISPLAY_CELLS: usize = DISPLAY_COLS * DISPLAY_ROWS;

/// Registers in the frame-buffer region
pub const FRAME_REGISTERS: usize = DISPLAY_CELLS.div_ceil(2);

/// Size of the writable region
pub const WRITABLE_REGISTERS: usize = 120;

/// Size of the read-only status region
pub const STATUS_REGISTERS: usize = 10;

/// Clear-screen request
pub const CLEAR_REQUEST: usize = 110;

/// Clear-screen acknowledge, reset to 0 by the master
pub const CLEAR_ACK: usize = 111;

/// Display enable (0 = blank, nonzero = visible)
pub const DISPLAY_ENABLE: usize = 112;

/// Character code that leaves its cell untouched
pub const KEEP_CELL: u8 = 0x00;

/// Space character
pub const SPACE: u8 = 0x20;

/// Frame register holding two spaces
pub const BLANK_PAIR: u16 = pack(SPACE, SPACE);

const _: () = assert!(FRAME_REGISTERS <= CLEAR_REQUEST);
const _: () = assert!(DISPLAY_ENABLE < WRITABLE_REGISTERS);

/// Read-only status slots
pub mod status {
    /// Firmware version, `major << 8 | minor`
    pub const VERSION: usize = 0;
    /// Readiness flag (1 = ready)
    pub const READY: usize = 1;
    /// Last error code (0 = none)
    pub const ERROR: usize = 2;
    /// Resolved station address
    pub const ADDRESS: usize = 3;
    /// Resolved baud rate divided by 100
    pub const BAUD: usize = 4;
}

/// Pack two character codes into a frame register
///
/// The first cell (lower cell index) goes in the high byte.
pub const fn pack(first: u8, second: u8) -> u16 {
    u16::from_be_bytes([first, second])
}

/// Split a frame register into its two character codes
pub const fn unpack(value: u16) -> (u8, u8) {
    let [first, second] = value.to_be_bytes();
    (first, second)
}

/// Grid position `(col, row)` of a raster cell
///
/// Returns `None` for cells beyond the grid.
pub const fn cell_position(cell: usize) -> Option<(u8, u8)> {
    if cell >= DISPLAY_CELLS {
        return None;
    }
    Some(((cell % DISPLAY_COLS) as u8, (cell / DISPLAY_COLS) as u8))
}
