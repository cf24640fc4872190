//! Render driver: primary rays plus adaptive antialiasing.

use std::time::{Duration, Instant};

use raybox_math::Ray;
use raybox_shade::Color;
use serde::{Deserialize, Serialize};

use crate::{Camera, Framebuffer, Scene};

/// Sub-pixel sample positions used when a pixel is antialiased.
///
/// The first sample is the pixel's own primary-ray position.
pub const AA_OFFSETS: [(f64, f64); 5] = [(0.0, 0.0), (0.3, 0.3), (0.6, 0.0), (0.0, 0.6), (0.6, 0.6)];

/// Render options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Resample high-contrast pixels.
    pub antialiasing: bool,
    /// Per-neighbor color difference (sum over channels) above which a
    /// pixel is resampled.
    pub aa_threshold: f32,
    /// Color of rays that hit nothing.
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            antialiasing: true,
            aa_threshold: 0.1,
            background: Color::BLACK,
        }
    }
}

/// Counters collected during one render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Camera rays traced, including antialiasing samples.
    pub primary_rays: u64,
    /// Pixels that were resampled.
    pub antialiased_pixels: u64,
    /// Wall-clock time of the whole render.
    pub elapsed: Duration,
}

/// Renders scenes into framebuffers.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    /// Options used by every render.
    pub settings: RenderSettings,
}

impl Renderer {
    /// Create a renderer.
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Color seen along `ray`: the nearest node's shading, or the
    /// background.
    pub fn trace(&self, scene: &Scene, ray: &Ray) -> Color {
        if ray.debug {
            log::debug!(
                "  raytrace[start = {:?}, dir = {:?}]",
                ray.origin,
                ray.direction
            );
        }

        match scene.closest_hit(ray) {
            Some(hit) => hit.shader.shade(ray, &hit.info, &scene.shading_context()),
            None => self.settings.background,
        }
    }

    /// Render the frame `camera` was prepared for with
    /// [`Camera::begin_render`].
    ///
    /// Every pixel is traced once. With antialiasing enabled, pixels that
    /// differ too much from their neighborhood are then replaced by the
    /// average of the [`AA_OFFSETS`] samples.
    pub fn render(&self, scene: &Scene, camera: &Camera) -> (Framebuffer, RenderStats) {
        let start = Instant::now();
        let (width, height) = (camera.width(), camera.height());
        let mut fb = Framebuffer::new(width, height);
        let mut stats = RenderStats::default();

        for y in 0..height {
            for x in 0..width {
                let ray = camera.screen_ray(x as f64, y as f64);
                fb.set(x, y, self.trace(scene, &ray));
                stats.primary_rays += 1;
            }
        }

        if self.settings.antialiasing {
            let mask = antialias_mask(&fb, self.settings.aa_threshold);
            for y in 0..height {
                for x in 0..width {
                    if mask[y as usize * width as usize + x as usize] {
                        fb.set(x, y, self.supersample(scene, camera, x, y));
                        stats.antialiased_pixels += 1;
                        stats.primary_rays += AA_OFFSETS.len() as u64;
                    }
                }
            }
        }

        stats.elapsed = start.elapsed();
        log::debug!(
            "rendered {}x{}: {} rays, {} pixels antialiased",
            width,
            height,
            stats.primary_rays,
            stats.antialiased_pixels
        );
        (fb, stats)
    }

    /// Average of the [`AA_OFFSETS`] samples around pixel (x, y).
    pub fn supersample(&self, scene: &Scene, camera: &Camera, x: u32, y: u32) -> Color {
        let total: Color = AA_OFFSETS
            .iter()
            .map(|&(dx, dy)| {
                let ray = camera.screen_ray(x as f64 + dx, y as f64 + dy);
                self.trace(scene, &ray)
            })
            .sum();
        total / AA_OFFSETS.len() as f32
    }

    /// Trace one debug-flagged primary ray through (x, y), logging every
    /// step at debug level.
    pub fn trace_pixel(&self, scene: &Scene, camera: &Camera, x: f64, y: f64) -> Color {
        log::debug!("tracing pixel ({x}, {y})");
        let ray = camera.screen_ray(x, y).debug();
        let color = self.trace(scene, &ray);
        log::debug!("  result = {:?}", color);
        color
    }
}

/// Mark pixels that need antialiasing.
///
/// A pixel is marked when any of its four neighbors differs from the
/// neighborhood mean (pixel plus neighbors) by more than `threshold`. At
/// the border a missing neighbor is replaced by the pixel itself. The
/// result is row-major, like the framebuffer.
pub fn antialias_mask(fb: &Framebuffer, threshold: f32) -> Vec<bool> {
    let (width, height) = (fb.width(), fb.height());
    let mut mask = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height {
        for x in 0..width {
            let center = fb.get(x, y);
            let neighbors = [
                if y > 0 { fb.get(x, y - 1) } else { center },
                if y + 1 < height { fb.get(x, y + 1) } else { center },
                if x > 0 { fb.get(x - 1, y) } else { center },
                if x + 1 < width { fb.get(x + 1, y) } else { center },
            ];
            let mean = (center + neighbors.iter().copied().sum::<Color>()) / 5.0;
            mask.push(neighbors.iter().any(|n| n.difference(&mean) > threshold));
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use raybox_geom::{Plane, Sphere};
    use raybox_math::{Point3, Vec3};
    use raybox_shade::{Lambert, Lighting};

    fn floor_scene() -> Scene {
        let mut scene = Scene::new(
            Lighting::new(Point3::new(0.0, 50.0, 0.0), Color::splat(5000.0))
                .with_ambient(Color::BLACK),
        );
        scene.add(Plane::horizontal(0.0), Lambert::new(Color::new(0.0, 0.9, 0.0)));
        scene
    }

    fn ball_scene() -> (Scene, Camera) {
        let mut scene = Scene::new(Lighting::new(Point3::new(0.0, 0.0, -50.0), Color::splat(2500.0)));
        scene.add(
            Sphere::new(Point3::new(0.0, 0.0, 10.0), 3.0),
            Lambert::new(Color::WHITE),
        );
        let mut camera = Camera::new(Point3::origin(), 1.0);
        camera.begin_render(16, 16);
        (scene, camera)
    }

    #[test]
    fn test_mask_marks_discontinuity() {
        let mut fb = Framebuffer::new(3, 3);
        fb.set(1, 1, Color::WHITE);
        let mask = antialias_mask(&fb, 0.1);

        // the bright pixel and its four neighbors, not the corners
        #[rustfmt::skip]
        let expected = vec![
            false, true, false,
            true,  true, true,
            false, true, false,
        ];
        assert_eq!(mask, expected);
    }

    #[test]
    fn test_mask_ignores_smooth_gradient() {
        let mut fb = Framebuffer::new(4, 1);
        for x in 0..4 {
            fb.set(x, 0, Color::splat(x as f32 * 0.01));
        }
        assert!(antialias_mask(&fb, 0.1).iter().all(|m| !m));
    }

    #[test]
    fn test_marked_pixels_average_five_samples() {
        let (scene, camera) = ball_scene();
        let plain = Renderer::new(RenderSettings {
            antialiasing: false,
            ..Default::default()
        });
        let aa = Renderer::default();

        let (first_pass, _) = plain.render(&scene, &camera);
        let (fb, stats) = aa.render(&scene, &camera);
        let mask = antialias_mask(&first_pass, aa.settings.aa_threshold);
        assert!(mask.iter().any(|&m| m));
        assert_eq!(
            stats.antialiased_pixels,
            mask.iter().filter(|&&m| m).count() as u64
        );

        for y in 0..16 {
            for x in 0..16 {
                let got = fb.get(x, y);
                if !mask[(y * 16 + x) as usize] {
                    assert_eq!(got, first_pass.get(x, y));
                    continue;
                }
                let mut sum = Color::BLACK;
                for (dx, dy) in AA_OFFSETS {
                    sum += aa.trace(&scene, &camera.screen_ray(x as f64 + dx, y as f64 + dy));
                }
                let expected = sum / 5.0;
                assert!(got.difference(&expected) < 1e-6, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_background_for_misses() {
        let (scene, camera) = ball_scene();
        let renderer = Renderer::new(RenderSettings {
            antialiasing: false,
            background: Color::new(0.2, 0.3, 0.4),
            ..Default::default()
        });
        let (fb, stats) = renderer.render(&scene, &camera);
        assert_eq!(fb.get(0, 0), Color::new(0.2, 0.3, 0.4));
        assert_ne!(fb.get(8, 8), Color::new(0.2, 0.3, 0.4));
        assert_eq!(stats.primary_rays, 256);
    }

    #[test]
    fn test_debug_trace_matches_render() {
        let (scene, camera) = ball_scene();
        let renderer = Renderer::new(RenderSettings {
            antialiasing: false,
            ..Default::default()
        });
        let (fb, _) = renderer.render(&scene, &camera);
        assert_eq!(renderer.trace_pixel(&scene, &camera, 8.0, 8.0), fb.get(8, 8));
    }

    #[test]
    fn test_floor_brightness_falls_off_from_light() {
        let scene = floor_scene();
        let mut camera = Camera::new(Point3::new(0.0, 10.0, -30.0), 4.0 / 3.0)
            .with_orientation(0.0, -15.0, 0.0);
        camera.begin_render(40, 30);
        let renderer = Renderer::new(RenderSettings {
            antialiasing: false,
            ..Default::default()
        });
        let (fb, _) = renderer.render(&scene, &camera);

        // pair each visible floor pixel with its distance from the point
        // below the light
        let mut samples = Vec::new();
        for y in 0..30 {
            for x in 0..40 {
                let ray = camera.screen_ray(x as f64, y as f64);
                if let Some(hit) = scene.closest_hit(&ray) {
                    let r = hit.info.point.x.hypot(hit.info.point.z);
                    samples.push((r, fb.get(x, y).g));
                }
            }
        }
        assert!(samples.len() > 100);
        assert!(samples.iter().any(|&(_, g)| g > 0.0));

        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in samples.windows(2) {
            assert!(pair[1].1 <= pair[0].1 + 1e-6, "{:?}", pair);
        }
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: RenderSettings = toml::from_str(
            r#"
            antialiasing = false

            [background]
            r = 0.5
            g = 0.25
            b = 0.0
            "#,
        )
        .unwrap();
        assert!(!settings.antialiasing);
        assert!((settings.aa_threshold - 0.1).abs() < 1e-6);
        assert_eq!(settings.background, Color::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_trace_along_floor_normal() {
        let scene = floor_scene();
        let renderer = Renderer::default();
        let straight_down = Ray::new(Point3::new(0.0, 5.0, 0.0), -Vec3::y());
        let c = renderer.trace(&scene, &straight_down);
        // 0.9 * 5000 / 50^2
        assert!((c.g - 1.8).abs() < 1e-4);
    }
}
