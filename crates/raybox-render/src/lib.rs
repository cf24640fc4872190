#![warn(missing_docs)]

//! Camera, scene and render driver for the raybox renderer.
//!
//! A [`Scene`] owns every geometry, shader and texture in slot-map arenas
//! and keeps an ordered list of [`Node`]s pairing a geometry with a shader.
//! The [`Renderer`] asks the [`Camera`] for a ray per pixel, shades the
//! nearest hit, then resamples high-contrast pixels (adaptive
//! antialiasing).
//!
//! # Example
//!
//! ```
//! use raybox_geom::Plane;
//! use raybox_math::Point3;
//! use raybox_render::{Camera, Renderer, Scene};
//! use raybox_shade::{Color, Lambert, Lighting};
//!
//! let mut scene = Scene::new(Lighting::new(
//!     Point3::new(0.0, 1000.0, 1600.0),
//!     Color::splat(1.5e6),
//! ));
//! scene.add(Plane::horizontal(0.0), Lambert::new(Color::new(0.0, 0.9, 0.0)));
//!
//! let mut camera = Camera::new(Point3::new(-10.0, 100.0, 0.0), 4.0 / 3.0)
//!     .with_orientation(-10.0, -25.0, 0.0);
//! camera.begin_render(32, 24);
//!
//! let (frame, stats) = Renderer::default().render(&scene, &camera);
//! assert_eq!(frame.width(), 32);
//! assert!(stats.primary_rays >= 32 * 24);
//! ```

mod camera;
mod framebuffer;
mod renderer;
mod scene;

pub use camera::Camera;
pub use framebuffer::Framebuffer;
pub use renderer::{antialias_mask, RenderSettings, RenderStats, Renderer, AA_OFFSETS};
pub use scene::{GeometryId, Node, Scene, SceneHit, ShaderId};
