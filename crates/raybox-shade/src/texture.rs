//! Procedural and bitmap textures, sampled by surface (u, v).

use std::path::Path;

use crate::{Color, TextureError};

/// Two-color checkerboard over the (u, v) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checker {
    /// Color of squares whose integer coordinates sum to an even number.
    pub col1: Color,
    /// Color of the other squares.
    pub col2: Color,
    /// Side length of one square in (u, v) units.
    pub size: f64,
}

impl Checker {
    /// Create a checker texture.
    pub fn new(col1: Color, col2: Color, size: f64) -> Self {
        Self { col1, col2, size }
    }

    /// Sample the checker at (u, v).
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let x = (u / self.size).floor() as i64;
        let y = (v / self.size).floor() as i64;
        if (x + y).rem_euclid(2) == 0 {
            self.col1
        } else {
            self.col2
        }
    }
}

/// A decoded image held as a dense row-major grid of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Build a bitmap from row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if pixels.len() != width as usize * height as usize {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file (BMP or PNG).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TextureError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Color::from_rgb8(p.0)).collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at pixel (x, y). Coordinates are clamped to the image.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

/// A bitmap tiled over the (u, v) plane.
///
/// One copy of the image covers `scaling` units in both u and v. A texture
/// whose image failed to load samples black.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapTexture {
    /// The image, or `None` if loading failed.
    pub bitmap: Option<Bitmap>,
    /// Size of one tile in (u, v) units.
    pub scaling: f64,
}

impl BitmapTexture {
    /// Wrap an already decoded bitmap.
    pub fn new(bitmap: Bitmap, scaling: f64) -> Self {
        Self {
            bitmap: Some(bitmap),
            scaling,
        }
    }

    /// Load the image at `path`. Failure is logged and yields a black texture.
    pub fn open(path: impl AsRef<Path>, scaling: f64) -> Self {
        let bitmap = match Bitmap::load(path) {
            Ok(bitmap) => Some(bitmap),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        };
        Self { bitmap, scaling }
    }

    /// Sample the texture at (u, v).
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let Some(bitmap) = &self.bitmap else {
            return Color::BLACK;
        };

        let u = u / self.scaling;
        let v = v / self.scaling;
        let fu = u - u.floor();
        let fv = v - v.floor();
        // fractions can round up to exactly 1.0; Bitmap::pixel clamps
        bitmap.pixel(
            (fu * bitmap.width() as f64) as u32,
            (fv * bitmap.height() as f64) as u32,
        )
    }
}

/// A texture that maps surface (u, v) to a color.
#[derive(Debug, Clone, PartialEq)]
pub enum Texture {
    /// Checkerboard pattern.
    Checker(Checker),
    /// Tiled image.
    Bitmap(BitmapTexture),
}

impl Texture {
    /// Sample the texture at (u, v).
    pub fn sample(&self, u: f64, v: f64) -> Color {
        match self {
            Texture::Checker(t) => t.sample(u, v),
            Texture::Bitmap(t) => t.sample(u, v),
        }
    }
}

impl From<Checker> for Texture {
    fn from(value: Checker) -> Self {
        Texture::Checker(value)
    }
}

impl From<BitmapTexture> for Texture {
    fn from(value: BitmapTexture) -> Self {
        Texture::Bitmap(value)
    }
}
