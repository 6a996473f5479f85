//! Device configuration
//!
//! The station address and line speed are set with jumpers on the board
//! and sampled once at startup. Jumper inputs are pulled up; a fitted
//! jumper reads low and counts as a set bit.

/// Address used when no address jumper is fitted
pub const DEFAULT_ADDRESS: u8 = 16;

/// Supported line speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    B9600,
    B19200,
    B57600,
    B115200,
}

impl BaudRate {
    /// Decode the two speed jumper bits
    ///
    /// | bits | baud   |
    /// |------|--------|
    /// | 00   | 9600   |
    /// | 01   | 19200  |
    /// | 10   | 57600  |
    /// | 11   | 115200 |
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => BaudRate::B9600,
            0b01 => BaudRate::B19200,
            0b10 => BaudRate::B57600,
            _ => BaudRate::B115200,
        }
    }

    /// Bits per second
    pub fn bps(self) -> u32 {
        match self {
            BaudRate::B9600 => 9_600,
            BaudRate::B19200 => 19_200,
            BaudRate::B57600 => 57_600,
            BaudRate::B115200 => 115_200,
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Modbus station address (1-15, or 16 when unset)
    pub address: u8,
    /// Serial line speed
    pub baud: BaudRate,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            baud: BaudRate::B9600,
        }
    }
}

impl DeviceConfig {
    /// Resolve configuration from jumper bits
    ///
    /// # Arguments
    /// - `address_bits`: address jumpers, bit 0 in the LSB (4 bits used)
    /// - `speed_bits`: speed jumpers, bit 0 in the LSB (2 bits used)
    pub fn from_jumpers(address_bits: u8, speed_bits: u8) -> Self {
        let address = match address_bits & 0x0F {
            0 => DEFAULT_ADDRESS,
            address => address,
        };

        Self {
            address,
            baud: BaudRate::from_bits(speed_bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_jumpers_fitted() {
        let config = DeviceConfig::from_jumpers(0, 0);
        assert_eq!(config, DeviceConfig::default());
        assert_eq!(config.address, 16);
        assert_eq!(config.baud.bps(), 9_600);
    }

    #[test]
    fn test_address_jumpers() {
        assert_eq!(DeviceConfig::from_jumpers(0b0001, 0).address, 1);
        assert_eq!(DeviceConfig::from_jumpers(0b1010, 0).address, 10);
        assert_eq!(DeviceConfig::from_jumpers(0b1111, 0).address, 15);
        // Upper bits are not wired
        assert_eq!(DeviceConfig::from_jumpers(0xF0, 0).address, 16);
    }

    #[test]
    fn test_speed_jumpers() {
        assert_eq!(DeviceConfig::from_jumpers(0, 0b01).baud, BaudRate::B19200);
        assert_eq!(DeviceConfig::from_jumpers(0, 0b10).baud, BaudRate::B57600);
        assert_eq!(DeviceConfig::from_jumpers(0, 0b11).baud.bps(), 115_200);
    }
}
