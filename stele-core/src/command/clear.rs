//! Clear-screen handshake
//!
//! ```text
//!            request != 0               ack == 0
//!   Idle ───────────────► Requested ──► Acknowledged ──────────► Idle
//!                                          │      ▲
//!                                          └──────┘
//!                                        request != 0
//! ```
//!
//! Running a clear resets the frame buffer, drops the error code, writes 0
//! to the request register and 1 to the acknowledge register. The master
//! resets the acknowledge register itself before the next request; a new
//! request while still acknowledged is accepted and clears again.

use crate::change::DirtySet;
use crate::registers::{RegisterBank, CLEAR_ACK, CLEAR_REQUEST};
use crate::status::StatusPublisher;
use crate::traits::{CharacterDisplay, DisplayError};

/// Handshake state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClearState {
    /// Waiting for a request
    Idle,
    /// Request seen, clear in progress
    Requested,
    /// Clear done, waiting for the master to reset the acknowledge
    Acknowledged,
}

/// Clear-screen command state machine
#[derive(Debug, Clone)]
pub struct ClearCommand {
    state: ClearState,
}

impl Default for ClearCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearCommand {
    pub fn new() -> Self {
        Self {
            state: ClearState::Idle,
        }
    }

    pub fn state(&self) -> ClearState {
        self.state
    }

    /// Poll the command registers
    ///
    /// Returns `None` when no clear ran this cycle, otherwise the result of
    /// the display clear. Register effects are applied even when the
    /// display clear fails.
    pub fn poll<D: CharacterDisplay + ?Sized>(
        &mut self,
        bank: &mut RegisterBank,
        dirty: &mut DirtySet,
        status: &mut StatusPublisher,
        display: &mut D,
    ) -> Option<Result<(), DisplayError>> {
        if self.state == ClearState::Acknowledged && bank.read(CLEAR_ACK) == 0 {
            self.state = ClearState::Idle;
        }

        if bank.read(CLEAR_REQUEST) == 0 {
            return None;
        }

        self.state = ClearState::Requested;
        let result = display.clear();

        bank.reset_frame();
        dirty.clear_all();
        status.clear_error(bank);
        bank.write(CLEAR_REQUEST, 0);
        bank.write(CLEAR_ACK, 1);

        self.state = ClearState::Acknowledged;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{DisplayOp, RecordingDisplay};
    use crate::registers::map::status as slot;
    use crate::registers::FRAME_REGISTERS;
    use crate::status::ErrorCode;

    struct Fixture {
        bank: RegisterBank,
        dirty: DirtySet,
        status: StatusPublisher,
        display: RecordingDisplay,
        clear: ClearCommand,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                bank: RegisterBank::new(),
                dirty: DirtySet::new(),
                status: StatusPublisher::new(),
                display: RecordingDisplay::new(),
                clear: ClearCommand::new(),
            }
        }

        fn poll(&mut self) -> Option<Result<(), DisplayError>> {
            self.clear.poll(
                &mut self.bank,
                &mut self.dirty,
                &mut self.status,
                &mut self.display,
            )
        }

        fn assert_cleared(&self) {
            assert!(self.bank.frame().iter().all(|&r| r == 0x2020));
            assert!(!self.dirty.any());
            assert_eq!(self.bank.status(slot::ERROR), 0);
            assert_eq!(self.bank.read(CLEAR_REQUEST), 0);
            assert_eq!(self.bank.read(CLEAR_ACK), 1);
            assert_eq!(self.clear.state(), ClearState::Acknowledged);
        }
    }

    #[test]
    fn test_idle_without_request() {
        let mut f = Fixture::new();
        assert_eq!(f.poll(), None);
        assert_eq!(f.clear.state(), ClearState::Idle);
        assert!(f.display.ops.is_empty());
    }

    #[test]
    fn test_clear_request() {
        let mut f = Fixture::new();
        f.bank.write(0, 0x4142);
        f.bank.write(FRAME_REGISTERS - 1, 0x4344);
        f.dirty.mark(0);
        f.status.set_error(&mut f.bank, ErrorCode::DISPLAY_IO);
        f.bank.write(CLEAR_REQUEST, 1);

        assert_eq!(f.poll(), Some(Ok(())));
        assert_eq!(&f.display.ops[..], &[DisplayOp::Clear]);
        f.assert_cleared();
        assert_eq!(f.status.error(), ErrorCode::NONE);
    }

    #[test]
    fn test_any_nonzero_value_requests() {
        let mut f = Fixture::new();
        f.bank.write(CLEAR_REQUEST, 0xBEEF);
        assert_eq!(f.poll(), Some(Ok(())));
        f.assert_cleared();
    }

    #[test]
    fn test_ack_stays_until_master_resets() {
        let mut f = Fixture::new();
        f.bank.write(CLEAR_REQUEST, 1);
        f.poll();

        for _ in 0..3 {
            assert_eq!(f.poll(), None);
            assert_eq!(f.bank.read(CLEAR_ACK), 1);
            assert_eq!(f.clear.state(), ClearState::Acknowledged);
        }

        f.bank.write(CLEAR_ACK, 0);
        assert_eq!(f.poll(), None);
        assert_eq!(f.clear.state(), ClearState::Idle);
    }

    #[test]
    fn test_repeat_request_without_ack_reset() {
        let mut f = Fixture::new();
        f.bank.write(CLEAR_REQUEST, 1);
        f.poll();
        f.assert_cleared();

        f.bank.write(2, 0x5858);
        f.bank.write(CLEAR_REQUEST, 1);
        assert_eq!(f.poll(), Some(Ok(())));
        f.assert_cleared();
        assert_eq!(&f.display.ops[..], &[DisplayOp::Clear, DisplayOp::Clear]);
    }

    #[test]
    fn test_display_failure_still_acknowledges() {
        let mut f = Fixture::new();
        f.display.fail_after(0);
        f.bank.write(0, 0x4142);
        f.bank.write(CLEAR_REQUEST, 1);

        assert_eq!(f.poll(), Some(Err(DisplayError::Communication)));
        f.assert_cleared();

        // Not retried on the next cycle
        f.display.recover();
        assert_eq!(f.poll(), None);
        assert!(f.display.ops.is_empty());
    }
}
