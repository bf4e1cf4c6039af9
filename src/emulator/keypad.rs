pub const NUM_KEYS: usize = 16;

/// The 16-key hexadecimal pad, with keys in the range 0..0xF.
///
/// The host feeds key events in; instructions only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad {
            keys: [false; NUM_KEYS],
        }
    }

    /// Set the state of a single key. Returns `false` if there is no such key.
    pub fn set(&mut self, key: u8, pressed: bool) -> bool {
        match self.keys.get_mut(key as usize) {
            Some(state) => {
                *state = pressed;
                true
            }
            None => false,
        }
    }

    /// Whether a key is held down. Values outside the pad are never down.
    pub fn is_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-indexed key that is currently down.
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn press_and_release() {
        let mut keypad = Keypad::new();
        assert!(keypad.set(0xA, true));
        assert!(keypad.is_down(0xA));
        assert!(keypad.set(0xA, false));
        assert!(!keypad.is_down(0xA));
    }

    #[test]
    fn keys_outside_the_pad_are_rejected() {
        let mut keypad = Keypad::new();
        assert!(!keypad.set(0x10, true));
        assert!(!keypad.is_down(0x10));
        assert!(!keypad.is_down(0xFF));
    }

    #[test]
    fn first_down_is_lowest_index() {
        let mut keypad = Keypad::new();
        assert_eq!(None, keypad.first_down());
        keypad.set(0xC, true);
        keypad.set(0x3, true);
        assert_eq!(Some(0x3), keypad.first_down());
        keypad.release_all();
        assert_eq!(None, keypad.first_down());
    }
}
