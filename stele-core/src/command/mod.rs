//! Command registers
//!
//! Reserved writable registers that trigger display operations. Both
//! commands are polled once per cycle, after change detection.

pub mod clear;
pub mod enable;

pub use clear::{ClearCommand, ClearState};
pub use enable::DisplayEnableCommand;

use crate::change::DirtySet;
use crate::registers::RegisterBank;
use crate::status::StatusPublisher;
use crate::traits::{CharacterDisplay, DisplayControl, DisplayError};

/// What the command registers did this cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandOutcome {
    /// A clear ran
    pub cleared: bool,
    /// A display on/off control was sent
    pub control: Option<DisplayControl>,
    /// First display failure, if any
    pub fault: Option<DisplayError>,
}

/// Both command state machines
#[derive(Debug, Clone, Default)]
pub struct CommandProcessor {
    clear: ClearCommand,
    enable: DisplayEnableCommand,
}

impl CommandProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear handshake state
    pub fn clear_state(&self) -> ClearState {
        self.clear.state()
    }

    /// Last applied display-enable value
    pub fn applied_enable(&self) -> u16 {
        self.enable.applied()
    }

    /// Poll clear, then display enable
    pub fn process<D: CharacterDisplay + ?Sized>(
        &mut self,
        bank: &mut RegisterBank,
        dirty: &mut DirtySet,
        status: &mut StatusPublisher,
        display: &mut D,
    ) -> CommandOutcome {
        let mut outcome = CommandOutcome::default();

        if let Some(result) = self.clear.poll(bank, dirty, status, display) {
            outcome.cleared = true;
            outcome.fault = result.err();
        }

        if let Some((control, result)) = self.enable.poll(bank, display) {
            outcome.control = Some(control);
            if let Err(e) = result {
                outcome.fault.get_or_insert(e);
            }
        }

        outcome
    }
}
