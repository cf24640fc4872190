//! Scene lighting: one point light plus ambient.

use raybox_math::Point3;

use crate::Color;

/// An omnidirectional light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World-space position.
    pub position: Point3,
    /// Emitted intensity per channel, before attenuation.
    pub intensity: Color,
}

/// The lighting environment every shader sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// The single point light.
    pub light: PointLight,
    /// Light added everywhere regardless of shadowing.
    pub ambient: Color,
}

impl Lighting {
    /// Default ambient term.
    pub const DEFAULT_AMBIENT: Color = Color::splat(0.1);

    /// A point light at `position` with the default ambient term.
    pub fn new(position: Point3, intensity: Color) -> Self {
        Self {
            light: PointLight {
                position,
                intensity,
            },
            ambient: Self::DEFAULT_AMBIENT,
        }
    }

    /// Replace the ambient term.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Light reaching a point at `distance` from the light: ambient, plus
    /// the attenuated light intensity when the point is lit.
    pub fn irradiance(&self, distance: f64, visible: bool) -> Color {
        if visible {
            self.ambient + self.light.intensity / (distance * distance) as f32
        } else {
            self.ambient
        }
    }
}

/// Answers hard shadow queries against a scene.
pub trait Occlusion {
    /// Whether the segment from `light` to `point` is unobstructed.
    fn light_is_visible(&self, point: &Point3, light: &Point3) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irradiance() {
        let lighting = Lighting::new(Point3::origin(), Color::splat(400.0));
        assert_eq!(lighting.ambient, Color::splat(0.1));

        let lit = lighting.irradiance(10.0, true);
        assert!((lit.r - 4.1).abs() < 1e-5);
        assert_eq!(lighting.irradiance(10.0, false), Color::splat(0.1));
    }
}
