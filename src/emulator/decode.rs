//! Splitting a raw instruction word into its operand fields.
//!
//! CHIP-8 packs an immediate byte, a 12-bit address, a second register plus a
//! sub-opcode nibble, or nothing at all into the low 12 bits, depending on the
//! first nibble. The family decides both which fields are meaningful and
//! which bits must be kept when looking the opcode up.

/// How the low 12 bits of an opcode are interpreted for a given family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `0x0___`: matched as a whole word, no operands.
    Exact,
    /// `1NNN`, `3XNN`, `DXYN` and friends: operands fill the low 12 bits.
    Operands,
    /// `5XY0`, `8XYN`, `9XY0`: two registers and a sub-opcode nibble.
    RegisterPair,
    /// `EX9E`, `FX65` and friends: one register and a sub-opcode byte.
    SingleRegister,
}

impl Scheme {
    /// The scheme used by a family (the first nibble of an opcode).
    pub fn of(family: u8) -> Scheme {
        match family & 0xF {
            0x0 => Scheme::Exact,
            0x5 | 0x8 | 0x9 => Scheme::RegisterPair,
            0xE | 0xF => Scheme::SingleRegister,
            _ => Scheme::Operands,
        }
    }

    /// The bits that identify the instruction; everything else is an operand.
    pub fn mask(self) -> u16 {
        match self {
            Scheme::Exact => 0xFFFF,
            Scheme::Operands => 0xF000,
            Scheme::RegisterPair => 0xF00F,
            Scheme::SingleRegister => 0xF0FF,
        }
    }
}

/// A 16-bit instruction word as fetched from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combine two bytes, most significant first.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    /// The four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        let Opcode(word) = self;
        (
            (word >> 12) as u8 & 0xF,
            (word >> 8) as u8 & 0xF,
            (word >> 4) as u8 & 0xF,
            word as u8 & 0xF,
        )
    }

    pub fn family(self) -> u8 {
        self.nibbles().0
    }

    pub fn scheme(self) -> Scheme {
        Scheme::of(self.family())
    }

    /// The opcode with its operand bits cleared, used as the dispatch key.
    pub fn masked(self) -> u16 {
        self.0 & self.scheme().mask()
    }

    pub fn x(self) -> u8 {
        self.nibbles().1
    }

    pub fn y(self) -> u8 {
        self.nibbles().2
    }

    pub fn n(self) -> u8 {
        self.nibbles().3
    }

    pub fn nn(self) -> u8 {
        self.0 as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn nibbles_are_most_significant_first() {
        assert_eq!((0xA, 0xB, 0xC, 0xD), Opcode(0xABCD).nibbles());
        assert_eq!((0x0, 0x0, 0xE, 0xE), Opcode(0x00EE).nibbles());
    }

    #[test]
    fn from_bytes_is_big_endian() {
        assert_eq!(Opcode(0x1234), Opcode::from_bytes(0x12, 0x34));
        assert_eq!(Opcode(0xF0F0), Opcode::from_bytes(0xF0, 0xF0));
    }

    #[test]
    fn operand_fields() {
        let opcode = Opcode(0xD123);
        assert_eq!(0x1, opcode.x());
        assert_eq!(0x2, opcode.y());
        assert_eq!(0x3, opcode.n());
        assert_eq!(0x23, opcode.nn());
        assert_eq!(0x123, opcode.nnn());
    }

    #[test_case(0x0, Scheme::Exact, 0xFFFF)]
    #[test_case(0x1, Scheme::Operands, 0xF000)]
    #[test_case(0x4, Scheme::Operands, 0xF000)]
    #[test_case(0x5, Scheme::RegisterPair, 0xF00F)]
    #[test_case(0x7, Scheme::Operands, 0xF000)]
    #[test_case(0x8, Scheme::RegisterPair, 0xF00F)]
    #[test_case(0x9, Scheme::RegisterPair, 0xF00F)]
    #[test_case(0xD, Scheme::Operands, 0xF000)]
    #[test_case(0xE, Scheme::SingleRegister, 0xF0FF)]
    #[test_case(0xF, Scheme::SingleRegister, 0xF0FF)]
    fn family_selects_scheme_and_mask(family: u8, scheme: Scheme, mask: u16) {
        assert_eq!(scheme, Scheme::of(family));
        assert_eq!(mask, scheme.mask());
    }

    #[test_case(0x00E0, 0x00E0)]
    #[test_case(0x1ABC, 0x1000)]
    #[test_case(0x8AB4, 0x8004)]
    #[test_case(0x5AB0, 0x5000)]
    #[test_case(0xEA9E, 0xE09E)]
    #[test_case(0xF265, 0xF065)]
    fn masked_keeps_only_identifying_bits(word: u16, masked: u16) {
        assert_eq!(masked, Opcode(word).masked());
    }
}
