//! Configuration jumpers
//!
//! Inputs are pulled up. A fitted jumper shorts its pin to ground, so a
//! low level reads as a set bit.

use stele_core::config::DeviceConfig;
use stele_hal::InputPin;

/// Number of address jumpers
pub const ADDRESS_JUMPERS: usize = 4;

/// Number of line speed jumpers
pub const SPEED_JUMPERS: usize = 2;

/// The board's address and speed jumpers
pub struct JumperBank<P> {
    address: [P; ADDRESS_JUMPERS],
    speed: [P; SPEED_JUMPERS],
}

impl<P: InputPin> JumperBank<P> {
    /// Create a jumper bank
    ///
    /// # Arguments
    /// - `address`: address jumper inputs, bit 0 first
    /// - `speed`: speed jumper inputs, bit 0 first
    pub fn new(address: [P; ADDRESS_JUMPERS], speed: [P; SPEED_JUMPERS]) -> Self {
        Self { address, speed }
    }

    /// Fitted address jumpers as a bit field
    pub fn address_bits(&self) -> u8 {
        fitted_bits(&self.address)
    }

    /// Fitted speed jumpers as a bit field
    pub fn speed_bits(&self) -> u8 {
        fitted_bits(&self.speed)
    }

    /// Sample every jumper and resolve the configuration
    pub fn read_config(&self) -> DeviceConfig {
        DeviceConfig::from_jumpers(self.address_bits(), self.speed_bits())
    }
}

fn fitted_bits<P: InputPin>(pins: &[P]) -> u8 {
    pins.iter()
        .enumerate()
        .filter(|(_, pin)| pin.is_low())
        .fold(0, |bits, (bit, _)| bits | (1 << bit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stele_core::config::BaudRate;

    /// Mock input pin; `fitted` pulls it low
    struct MockPin {
        fitted: bool,
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            !self.fitted
        }
    }

    fn pins<const N: usize>(fitted: [bool; N]) -> [MockPin; N] {
        fitted.map(|fitted| MockPin { fitted })
    }

    #[test]
    fn test_nothing_fitted() {
        let jumpers = JumperBank::new(pins([false; 4]), pins([false; 2]));
        assert_eq!(jumpers.address_bits(), 0);
        assert_eq!(jumpers.speed_bits(), 0);
        assert_eq!(jumpers.read_config(), DeviceConfig::default());
    }

    #[test]
    fn test_bit_order() {
        let jumpers = JumperBank::new(pins([true, false, true, false]), pins([false, true]));
        assert_eq!(jumpers.address_bits(), 0b0101);
        assert_eq!(jumpers.speed_bits(), 0b10);

        let config = jumpers.read_config();
        assert_eq!(config.address, 5);
        assert_eq!(config.baud, BaudRate::B57600);
    }

    #[test]
    fn test_all_fitted() {
        let jumpers = JumperBank::new(pins([true; 4]), pins([true; 2]));
        let config = jumpers.read_config();
        assert_eq!(config.address, 15);
        assert_eq!(config.baud, BaudRate::B115200);
    }
}
