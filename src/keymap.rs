//! The conventional mapping from a QWERTY keyboard to the hexadecimal keypad.
//!
//! ```text
//! 1 2 3 4        1 2 3 C
//! q w e r   ->   4 5 6 D
//! a s d f        7 8 9 E
//! z x c v        A 0 B F
//! ```

/// Host key names and the keypad index each one drives.
pub const KEYMAP: [(&str, u8); 16] = [
    ("1", 0x1),
    ("2", 0x2),
    ("3", 0x3),
    ("4", 0xC),
    ("q", 0x4),
    ("w", 0x5),
    ("e", 0x6),
    ("r", 0xD),
    ("a", 0x7),
    ("s", 0x8),
    ("d", 0x9),
    ("f", 0xE),
    ("z", 0xA),
    ("x", 0x0),
    ("c", 0xB),
    ("v", 0xF),
];

/// Look up the keypad index for a host key name, ignoring case.
pub fn key_index(name: &str) -> Option<u8> {
    KEYMAP
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|&(_, index)| index)
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("1", 0x1)]
    #[test_case("4", 0xC)]
    #[test_case("x", 0x0)]
    #[test_case("V", 0xF)]
    fn known_keys(name: &str, index: u8) {
        assert_eq!(Some(index), key_index(name));
    }

    #[test]
    fn unknown_keys() {
        assert_eq!(None, key_index("p"));
        assert_eq!(None, key_index(""));
    }

    #[test]
    fn every_pad_key_is_mapped_once() {
        let mut indices: Vec<u8> = KEYMAP.iter().map(|&(_, index)| index).collect();
        indices.sort();
        assert_eq!((0..16).collect::<Vec<u8>>(), indices);
    }
}
