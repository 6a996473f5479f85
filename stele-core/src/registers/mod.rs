//! Register bank and register map

pub mod bank;
pub mod map;

pub use bank::RegisterBank;
pub use map::{
    cell_position, pack, unpack, BLANK_PAIR, CLEAR_ACK, CLEAR_REQUEST, DISPLAY_CELLS,
    DISPLAY_COLS, DISPLAY_ENABLE, DISPLAY_ROWS, FRAME_REGISTERS, KEEP_CELL, SPACE,
    STATUS_REGISTERS, WRITABLE_REGISTERS,
};
