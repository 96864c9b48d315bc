//! The four single-bit status flags.

use std::fmt;

/// Zero, Carry, Sign, and LessThan. `LessThan` is a side channel: it is not a
/// true comparison result of the current op, but a latched inequality `B<C`
/// recomputed on every flag update regardless of which op triggered it. This
/// looks wrong in isolation but is preserved bit-exactly from the source.
#[derive(Debug, Default, Clone, Copy)]
pub struct Flags {
    pub zero: bool,
    pub carry: bool,
    pub sign: bool,
    pub less_than: bool,
}

impl Flags {
    pub fn new() -> Self {
        Flags::default()
    }

    /// Updates Zero and Sign from `result`, and LessThan from the current
    /// values of B and C. Carry is op-specific and must be set by the caller.
    pub fn update(&mut self, result: u8, b: u8, c: u8) {
        self.zero = result == 0;
        self.sign = (result >> 7) == 1;
        self.less_than = b < c;
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z{} C{} S{} L{}",
            self.zero as u8, self.carry as u8, self.sign as u8, self.less_than as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sets_zero_and_sign_from_result() {
        let mut flags = Flags::new();
        flags.update(0x00, 5, 5);
        assert!(flags.zero);
        assert!(!flags.sign);

        flags.update(0x80, 5, 5);
        assert!(!flags.zero);
        assert!(flags.sign);
    }

    #[test]
    fn update_recomputes_less_than_from_b_and_c_every_time() {
        let mut flags = Flags::new();
        flags.update(1, 2, 3);
        assert!(flags.less_than);
        flags.update(1, 3, 2);
        assert!(!flags.less_than);
    }
}
