use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const NUM_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// A row-major copy of the screen, where pixel `(x, y)` is at `x + 64 * y`.
pub type Snapshot = [bool; NUM_PIXELS];

/// The monochrome 64x32 screen.
#[derive(Clone)]
pub struct Framebuffer {
    pixels: Snapshot,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            pixels: [false; NUM_PIXELS],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [false; NUM_PIXELS];
    }

    /// Get a pixel, with coordinates wrapping around the screen edges.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::index(x, y)]
    }

    /// XOR a lit sprite pixel onto the screen at a wrapped position.
    /// Returns `true` if this turned a lit pixel off.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[Self::index(x, y)];
        let erased = *pixel;
        *pixel = !*pixel;
        erased
    }

    /// XOR one 8-pixel sprite row, most significant bit leftmost.
    /// Returns `true` if any lit pixel was turned off.
    pub fn draw_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        let mut collision = false;
        for bit in 0..8 {
            if row & (0x80 >> bit) != 0 {
                collision |= self.flip(x + bit, y);
            }
        }
        collision
    }

    pub fn snapshot(&self) -> Snapshot {
        self.pixels
    }

    fn index(x: usize, y: usize) -> usize {
        x % SCREEN_WIDTH + SCREEN_WIDTH * (y % SCREEN_HEIGHT)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Framebuffer {
    fn eq(&self, other: &Self) -> bool {
        self.pixels[..] == other.pixels[..]
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.pixels.iter().filter(|&&pixel| pixel).count();
        write!(f, "Framebuffer {{ lit: {} }}", lit)
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.chunks(SCREEN_WIDTH) {
            for &pixel in row {
                write!(f, "{}", if pixel { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flip_reports_erased_pixels() {
        let mut screen = Framebuffer::new();
        assert_eq!(false, screen.flip(3, 4));
        assert!(screen.get(3, 4));
        assert_eq!(true, screen.flip(3, 4));
        assert!(!screen.get(3, 4));
    }

    #[test]
    fn coordinates_wrap() {
        let mut screen = Framebuffer::new();
        screen.flip(SCREEN_WIDTH + 1, SCREEN_HEIGHT + 2);
        assert!(screen.get(1, 2));
        assert!(screen.snapshot()[1 + SCREEN_WIDTH * 2]);
    }

    #[test]
    fn draw_row_is_msb_first() {
        let mut screen = Framebuffer::new();
        screen.draw_row(0, 0, 0b1000_0001);
        assert!(screen.get(0, 0));
        assert!(!screen.get(1, 0));
        assert!(screen.get(7, 0));
    }

    #[test]
    fn display_renders_rows() {
        let mut screen = Framebuffer::new();
        screen.flip(0, 0);
        let text = screen.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(SCREEN_HEIGHT, lines.len());
        assert!(lines[0].starts_with("# "));
        assert_eq!(SCREEN_WIDTH, lines[1].len());
    }
}
