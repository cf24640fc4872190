#![warn(missing_docs)]

//! Surface shading for the raybox renderer.
//!
//! A [`Shader`] turns an intersection into a [`Color`] using the scene's
//! [`Lighting`]: a single point light with inverse-square falloff and an
//! ambient term. Material color comes either from the shader itself or from
//! a [`Texture`] sampled at the hit's (u, v). Shadows are hard and are
//! answered by whatever implements [`Occlusion`].

mod color;
mod error;
mod light;
mod shader;
mod texture;

pub use color::Color;
pub use error::TextureError;
pub use light::{Lighting, Occlusion, PointLight};
pub use shader::{Lambert, Phong, Shader, ShadingContext, TextureId};
pub use texture::{Bitmap, BitmapTexture, Checker, Texture};
