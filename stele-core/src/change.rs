//! Change detection over the writable region
//!
//! A snapshot of the writable registers is kept from the previous cycle.
//! Comparing against it tells the renderer which frame registers need
//! redrawing and gives a count of registers the bus touched.

use crate::registers::{RegisterBank, FRAME_REGISTERS, WRITABLE_REGISTERS};

/// One flag per frame-buffer register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtySet {
    flags: [bool; FRAME_REGISTERS],
}

impl Default for DirtySet {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtySet {
    /// Create a set with nothing dirty
    pub const fn new() -> Self {
        Self {
            flags: [false; FRAME_REGISTERS],
        }
    }

    /// Mark a frame register as changed
    ///
    /// Indices outside the frame buffer are ignored.
    pub fn mark(&mut self, index: usize) {
        if let Some(flag) = self.flags.get_mut(index) {
            *flag = true;
        }
    }

    /// Whether a frame register is marked
    pub fn is_dirty(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Whether any frame register is marked
    pub fn any(&self) -> bool {
        self.flags.iter().any(|&flag| flag)
    }

    /// Number of marked registers
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// Unmark everything
    pub fn clear_all(&mut self) {
        self.flags = [false; FRAME_REGISTERS];
    }

    /// All flags, indexed by frame register
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }
}

/// Per-cycle comparison of the writable region against the last snapshot
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    previous: [u16; WRITABLE_REGISTERS],
    dirty: DirtySet,
}

impl ChangeDetector {
    /// Create a detector seeded from the bank's current contents
    pub fn new(bank: &RegisterBank) -> Self {
        Self {
            previous: *bank.writable(),
            dirty: DirtySet::new(),
        }
    }

    /// Compare the bank with the snapshot and mark changed frame registers
    ///
    /// Returns how many writable registers changed, in any region. The
    /// snapshot is updated to the bank's current contents.
    pub fn detect_changes(&mut self, bank: &RegisterBank) -> usize {
        let mut changed = 0;
        for (index, (previous, &current)) in self
            .previous
            .iter_mut()
            .zip(bank.writable().iter())
            .enumerate()
        {
            if *previous != current {
                self.dirty.mark(index);
                *previous = current;
                changed += 1;
            }
        }
        changed
    }

    /// Re-seed the snapshot without marking anything
    ///
    /// Used after the core rewrites registers itself.
    pub fn sync(&mut self, bank: &RegisterBank) {
        self.previous = *bank.writable();
    }

    /// Current dirty flags
    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    /// Current dirty flags, mutable
    pub fn dirty_mut(&mut self) -> &mut DirtySet {
        &mut self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{CLEAR_REQUEST, DISPLAY_ENABLE};

    #[test]
    fn test_no_changes_on_fresh_bank() {
        let bank = RegisterBank::new();
        let mut detector = ChangeDetector::new(&bank);

        assert_eq!(detector.detect_changes(&bank), 0);
        assert!(!detector.dirty().any());
    }

    #[test]
    fn test_frame_change_marks_register() {
        let mut bank = RegisterBank::new();
        let mut detector = ChangeDetector::new(&bank);

        bank.write(3, 0x4142);
        assert_eq!(detector.detect_changes(&bank), 1);
        assert!(detector.dirty().is_dirty(3));
        assert_eq!(detector.dirty().count(), 1);

        // Same value again is not a change
        assert_eq!(detector.detect_changes(&bank), 0);
        assert!(detector.dirty().is_dirty(3));
    }

    #[test]
    fn test_non_frame_change_counts_but_stays_clean() {
        let mut bank = RegisterBank::new();
        let mut detector = ChangeDetector::new(&bank);

        bank.write(FRAME_REGISTERS, 7);
        bank.write(CLEAR_REQUEST, 1);
        bank.write(DISPLAY_ENABLE, 0);

        assert_eq!(detector.detect_changes(&bank), 3);
        assert!(!detector.dirty().any());
    }

    #[test]
    fn test_sync_absorbs_core_writes() {
        let mut bank = RegisterBank::new();
        let mut detector = ChangeDetector::new(&bank);

        bank.write(0, 0x4142);
        detector.sync(&bank);

        assert_eq!(detector.detect_changes(&bank), 0);
        assert!(!detector.dirty().any());
    }

    #[test]
    fn test_dirty_set_bounds() {
        let mut dirty = DirtySet::new();
        dirty.mark(FRAME_REGISTERS);
        assert!(!dirty.any());
        assert!(!dirty.is_dirty(FRAME_REGISTERS));
        assert_eq!(dirty.flags().len(), FRAME_REGISTERS);

        dirty.mark(0);
        dirty.mark(39);
        assert_eq!(dirty.count(), 2);
        dirty.clear_all();
        assert!(!dirty.any());
    }
}
