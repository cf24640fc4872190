//! Lambert and Phong surface shaders.

use raybox_geom::IntersectionInfo;
use raybox_math::{faceforward, reflect, Ray};
use slotmap::{new_key_type, SlotMap};

use crate::{Color, Lighting, Occlusion, Texture};

new_key_type! {
    /// Handle of a texture in a scene's texture arena.
    pub struct TextureId;
}

/// Everything a shader reads besides the ray and the hit.
#[derive(Clone, Copy)]
pub struct ShadingContext<'a> {
    /// The light and ambient term.
    pub lighting: &'a Lighting,
    /// Textures that shaders refer to by [`TextureId`].
    pub textures: &'a SlotMap<TextureId, Texture>,
    /// Shadow test.
    pub occlusion: &'a dyn Occlusion,
}

impl ShadingContext<'_> {
    /// Color of the surface itself: the bound texture's sample at the hit's
    /// (u, v), or `color` when no texture is bound.
    fn material(
        &self,
        color: Color,
        texture: Option<TextureId>,
        info: &IntersectionInfo<'_>,
    ) -> Color {
        texture
            .and_then(|id| self.textures.get(id))
            .map_or(color, |t| t.sample(info.u, info.v))
    }
}

/// Diffuse-only shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambert {
    /// Surface color when no texture is bound.
    pub color: Color,
    /// Optional texture replacing `color`.
    pub texture: Option<TextureId>,
}

impl Lambert {
    /// A solid-colored Lambert shader.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            texture: None,
        }
    }

    /// Bind a texture.
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Shade a hit.
    pub fn shade(&self, info: &IntersectionInfo<'_>, ctx: &ShadingContext<'_>) -> Color {
        let material = ctx.material(self.color, self.texture, info);
        let light = &ctx.lighting.light;

        let to_light = light.position - info.point;
        let distance = to_light.norm();
        let visible = ctx.occlusion.light_is_visible(&info.point, &light.position);
        let irradiance = ctx.lighting.irradiance(distance, visible);

        let n_dot_l = (to_light / distance).dot(&info.normal).max(0.0);
        material * irradiance * n_dot_l as f32
    }
}

/// Diffuse plus specular highlight shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    /// Surface color when no texture is bound.
    pub color: Color,
    /// Optional texture replacing `color`.
    pub texture: Option<TextureId>,
    /// Specular exponent. Larger values give tighter highlights.
    pub exponent: f64,
}

impl Phong {
    /// A solid-colored Phong shader.
    pub fn new(color: Color, exponent: f64) -> Self {
        Self {
            color,
            texture: None,
            exponent,
        }
    }

    /// Bind a texture.
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Shade a hit seen along `ray`.
    ///
    /// The normal is turned to face the viewer first, so back faces shade
    /// like front faces.
    pub fn shade(
        &self,
        ray: &Ray,
        info: &IntersectionInfo<'_>,
        ctx: &ShadingContext<'_>,
    ) -> Color {
        let material = ctx.material(self.color, self.texture, info);
        let light = &ctx.lighting.light;
        let normal = faceforward(&info.normal, &ray.direction);

        let to_light = light.position - info.point;
        let distance = to_light.norm();
        let visible = ctx.occlusion.light_is_visible(&info.point, &light.position);
        let irradiance = ctx.lighting.irradiance(distance, visible);

        let n_dot_l = (to_light / distance).dot(&normal).max(0.0);
        let diffuse = material * irradiance * n_dot_l as f32;
        if !visible {
            return diffuse;
        }

        let from_light = -to_light / distance;
        let reflected = reflect(&from_light, &normal);
        let to_camera = (ray.origin - info.point).normalize();
        let cos_gamma = to_camera.dot(&reflected).max(0.0);
        let specular = cos_gamma.powf(self.exponent) / (distance * distance);

        diffuse + light.intensity * specular as f32
    }
}

/// A surface shading model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shader {
    /// Diffuse only.
    Lambert(Lambert),
    /// Diffuse plus specular.
    Phong(Phong),
}

impl Shader {
    /// Compute the color leaving the hit point toward the ray origin.
    pub fn shade(
        &self,
        ray: &Ray,
        info: &IntersectionInfo<'_>,
        ctx: &ShadingContext<'_>,
    ) -> Color {
        let color = match self {
            Shader::Lambert(s) => s.shade(info, ctx),
            Shader::Phong(s) => s.shade(ray, info, ctx),
        };
        if ray.debug {
            log::debug!("      {} shaded {:?}", self.name(), color);
        }
        color
    }

    /// Short name of the shading model, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Shader::Lambert(_) => "Lambert",
            Shader::Phong(_) => "Phong",
        }
    }
}

impl From<Lambert> for Shader {
    fn from(value: Lambert) -> Self {
        Shader::Lambert(value)
    }
}

impl From<Phong> for Shader {
    fn from(value: Phong) -> Self {
        Shader::Phong(value)
    }
}
