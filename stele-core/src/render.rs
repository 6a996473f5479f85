//! Frame renderer
//!
//! Turns the frame-buffer registers into cell writes. Rendering is gated
//! on the dirty set: nothing dirty means no display I/O at all, anything
//! dirty means a full pass over the frame buffer.

use crate::change::DirtySet;
use crate::charset;
use crate::registers::{cell_position, unpack, RegisterBank, KEEP_CELL};
use crate::traits::{CharacterDisplay, DisplayError};

/// Frame-buffer to display renderer
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    passes: u32,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render passes run so far (wrapping)
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Redraw the frame buffer if anything in it changed
    ///
    /// Returns the number of cells written. The dirty set is cleared after
    /// a pass, including one aborted by a display failure.
    pub fn render<D: CharacterDisplay + ?Sized>(
        &mut self,
        bank: &RegisterBank,
        dirty: &mut DirtySet,
        display: &mut D,
    ) -> Result<usize, DisplayError> {
        if !dirty.any() {
            return Ok(0);
        }

        let result = draw(bank, display);
        dirty.clear_all();
        self.passes = self.passes.wrapping_add(1);
        result
    }
}

fn draw<D: CharacterDisplay + ?Sized>(
    bank: &RegisterBank,
    display: &mut D,
) -> Result<usize, DisplayError> {
    let mut written = 0;

    for (index, &value) in bank.frame().iter().enumerate() {
        let (first, second) = unpack(value);
        for (cell, code) in [(index * 2, first), (index * 2 + 1, second)] {
            let Some((col, row)) = cell_position(cell) else {
                continue;
            };
            if code == KEEP_CELL {
                continue;
            }

            display.set_cursor(col, row)?;
            display.write_char(charset::to_display_code(code))?;
            written += 1;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{DisplayOp, RecordingDisplay};
    use crate::registers::{pack, DISPLAY_CELLS, FRAME_REGISTERS};

    #[test]
    fn test_clean_frame_skips_io() {
        let bank = RegisterBank::new();
        let mut dirty = DirtySet::new();
        let mut display = RecordingDisplay::new();
        let mut renderer = FrameRenderer::new();

        assert_eq!(renderer.render(&bank, &mut dirty, &mut display), Ok(0));
        assert!(display.ops.is_empty());
        assert_eq!(renderer.passes(), 0);
    }

    #[test]
    fn test_first_register_renders_two_cells() {
        let mut bank = RegisterBank::new();
        let mut dirty = DirtySet::new();
        let mut display = RecordingDisplay::new();
        let mut renderer = FrameRenderer::new();

        bank.write(0, pack(b'A', b'B'));
        dirty.mark(0);

        // Full rescan: every cell is rewritten
        assert_eq!(
            renderer.render(&bank, &mut dirty, &mut display),
            Ok(DISPLAY_CELLS)
        );
        assert_eq!(
            &display.ops[..4],
            &[
                DisplayOp::Cursor(0, 0),
                DisplayOp::Char(b'A'),
                DisplayOp::Cursor(1, 0),
                DisplayOp::Char(b'B'),
            ]
        );
        assert!(!dirty.any());
        assert_eq!(renderer.passes(), 1);
    }

    #[test]
    fn test_raster_order_wraps_rows() {
        let mut bank = RegisterBank::new();
        let mut dirty = DirtySet::new();
        let mut display = RecordingDisplay::new();

        // Register 10 holds cells 20 and 21: start of row 1
        bank.write(10, pack(b'x', b'y'));
        // Last register holds cells 78 and 79
        bank.write(FRAME_REGISTERS - 1, pack(b'!', b'?'));
        dirty.mark(10);

        FrameRenderer::new()
            .render(&bank, &mut dirty, &mut display)
            .unwrap();

        let cells = display.cells();
        assert!(cells.contains(&(0, 1, b'x')));
        assert!(cells.contains(&(1, 1, b'y')));
        assert!(cells.contains(&(18, 3, b'!')));
        assert!(cells.contains(&(19, 3, b'?')));
    }

    #[test]
    fn test_sentinel_leaves_cell_alone() {
        let mut bank = RegisterBank::new();
        let mut dirty = DirtySet::new();
        let mut display = RecordingDisplay::new();

        bank.write(0, pack(KEEP_CELL, b'Z'));
        dirty.mark(0);

        assert_eq!(
            FrameRenderer::new().render(&bank, &mut dirty, &mut display),
            Ok(DISPLAY_CELLS - 1)
        );

        let cells = display.cells();
        assert!(!cells.iter().any(|&(col, row, _)| (col, row) == (0, 0)));
        assert!(cells.contains(&(1, 0, b'Z')));
        assert!(!cells.iter().any(|&(_, _, code)| code == KEEP_CELL));
    }

    #[test]
    fn test_failure_aborts_pass_and_clears_dirty() {
        let mut bank = RegisterBank::new();
        let mut dirty = DirtySet::new();
        let mut display = RecordingDisplay::new();
        let mut renderer = FrameRenderer::new();

        bank.write(0, pack(b'A', b'B'));
        dirty.mark(0);
        dirty.mark(5);
        display.fail_after(3);

        assert_eq!(
            renderer.render(&bank, &mut dirty, &mut display),
            Err(DisplayError::Communication)
        );
        assert_eq!(display.ops.len(), 3);
        assert!(!dirty.any());

        // No retry without a new change
        display.recover();
        assert_eq!(renderer.render(&bank, &mut dirty, &mut display), Ok(0));
        assert_eq!(display.ops.len(), 3);
    }
}
