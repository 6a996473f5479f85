//! Register code to controller character code translation

/// Translate a register character code into a display controller code
///
/// The controller's ROM matches ASCII for the printable range, so this is
/// the identity mapping.
#[inline]
pub const fn to_display_code(code: u8) -> u8 {
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        for code in 0..=u8::MAX {
            assert_eq!(to_display_code(code), code);
        }
    }
}
