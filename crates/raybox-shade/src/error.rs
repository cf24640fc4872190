//! Error types for texture construction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The image file could not be opened or decoded.
    #[error("could not load `{}`: {source}", path.display())]
    Load {
        /// Path of the image file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Pixel data does not match the stated dimensions.
    #[error("bitmap is {width}x{height} but {actual} pixels were supplied")]
    SizeMismatch {
        /// Bitmap width.
        width: u32,
        /// Bitmap height.
        height: u32,
        /// Number of pixels supplied.
        actual: usize,
    },

    /// A bitmap with zero width or height.
    #[error("bitmap has no pixels")]
    Empty,
}
