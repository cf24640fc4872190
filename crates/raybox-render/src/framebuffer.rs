//! In-memory image the renderer writes into.

use raybox_shade::Color;

/// A dense row-major grid of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// A black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// A framebuffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Color at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the framebuffer.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite the color at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the framebuffer.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixels quantized to 8-bit RGB, row by row.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_row_major() {
        let mut fb = Framebuffer::new(3, 2);
        fb.set(2, 1, Color::WHITE);
        assert_eq!(fb.get(2, 1), Color::WHITE);
        assert_eq!(fb.get(1, 1), Color::BLACK);
        assert_eq!(fb.pixels()[5], Color::WHITE);
    }

    #[test]
    fn test_to_rgb8_clamps_out_of_range() {
        let fb = Framebuffer::filled(2, 1, Color::new(2.0, -1.0, 0.5));
        assert_eq!(fb.to_rgb8(), vec![255, 0, 128, 255, 0, 128]);
    }
}
