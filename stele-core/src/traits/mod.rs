//! Hardware abstraction traits
//!
//! These traits define the interface between the register engine and
//! hardware-specific implementations.

pub mod display;
pub mod transport;

pub use display::{CharacterDisplay, DisplayControl, DisplayError, DisplayExt};
pub use transport::Transport;
