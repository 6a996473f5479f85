//! Recording display used by the unit tests

use heapless::Vec;

use crate::traits::{CharacterDisplay, DisplayControl, DisplayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Cursor(u8, u8),
    Char(u8),
    Control(DisplayControl),
}

/// Records every call; optionally fails after a number of successful calls
pub struct RecordingDisplay {
    pub ops: Vec<DisplayOp, 512>,
    remaining: Option<usize>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            remaining: None,
        }
    }

    /// Fail every call after `successes` more calls succeed
    pub fn fail_after(&mut self, successes: usize) {
        self.remaining = Some(successes);
    }

    pub fn recover(&mut self) {
        self.remaining = None;
    }

    /// Characters written as `(col, row, code)`, following the cursor
    pub fn cells(&self) -> Vec<(u8, u8, u8), 128> {
        let mut cells = Vec::new();
        let mut cursor = (0u8, 0u8);
        for op in &self.ops {
            match *op {
                DisplayOp::Clear => cursor = (0, 0),
                DisplayOp::Cursor(col, row) => cursor = (col, row),
                DisplayOp::Char(code) => {
                    cells.push((cursor.0, cursor.1, code)).unwrap();
                    cursor.0 += 1;
                }
                DisplayOp::Control(_) => {}
            }
        }
        cells
    }

    pub fn controls(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DisplayOp::Control(_)))
            .count()
    }

    fn record(&mut self, op: DisplayOp) -> Result<(), DisplayError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Err(DisplayError::Communication);
            }
            *remaining -= 1;
        }
        self.ops.push(op).expect("op log full");
        Ok(())
    }
}

impl CharacterDisplay for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayOp::Clear)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.record(DisplayOp::Cursor(col, row))
    }

    fn write_char(&mut self, code: u8) -> Result<(), DisplayError> {
        self.record(DisplayOp::Char(code))
    }

    fn control(&mut self, control: DisplayControl) -> Result<(), DisplayError> {
        self.record(DisplayOp::Control(control))
    }
}
