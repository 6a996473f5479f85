//! GPIO inputs

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;

/// Jumper input with the internal pull-up enabled
pub struct JumperInput<'d> {
    input: Input<'d>,
}

impl<'d> JumperInput<'d> {
    /// Configure a pin as a pulled-up jumper input
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }
}

impl stele_hal::InputPin for JumperInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
