//! Field-bus transport

use crate::registers::RegisterBank;

/// Trait for the bus side of the register bank
///
/// Called once per cycle before the core runs. Implementations handle
/// every complete request already received, apply it to `bank` and send
/// the replies, then return without waiting for more traffic.
pub trait Transport {
    /// Handle pending bus traffic
    fn service(&mut self, bank: &mut RegisterBank);
}
