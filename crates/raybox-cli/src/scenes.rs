//! Built-in demo scenes.

use raybox_geom::{Csg, Cube, Plane, Sphere};
use raybox_math::Point3;
use raybox_render::{Camera, Scene};
use raybox_shade::{BitmapTexture, Checker, Color, Lambert, Lighting, Phong};

use crate::config::{Config, ConfigError};

/// Names and one-line descriptions of the built-in scenes.
pub const SCENES: &[(&str, &str)] = &[
    ("plane", "green floor under a distant light"),
    ("checker", "checkered floor with a glossy ball"),
    ("csg", "hollowed cube and a lens built from boolean solids"),
    ("textured", "floor tiled with the configured bitmap"),
];

fn lighting() -> Lighting {
    Lighting::new(Point3::new(0.0, 1000.0, 1600.0), Color::splat(10_000.0 * 150.0))
}

fn camera(config: &Config) -> Camera {
    Camera::new(Point3::new(-10.0, 100.0, 0.0), config.aspect()).with_orientation(-10.0, -25.0, 0.0)
}

fn checker_floor(scene: &mut Scene) {
    let tiles = scene.add_texture(Checker::new(
        Color::new(0.5, 0.5, 0.25),
        Color::new(0.25, 0.25, 0.25),
        50.0,
    ));
    scene.add(
        Plane::horizontal(0.0),
        Lambert::new(Color::WHITE).with_texture(tiles),
    );
}

/// Build the named scene and its camera.
///
/// The camera still has to be prepared with
/// [`Camera::begin_render`](raybox_render::Camera::begin_render).
pub fn build(config: &Config) -> Result<(Scene, Camera), ConfigError> {
    let mut scene = Scene::new(lighting());

    match config.scene.as_str() {
        "plane" => {
            scene.add(Plane::horizontal(0.0), Lambert::new(Color::new(0.0, 0.9, 0.0)));
        }
        "checker" => {
            checker_floor(&mut scene);
            scene.add(
                Sphere::new(Point3::new(30.0, 40.0, 200.0), 40.0),
                Phong::new(Color::new(0.6, 0.1, 0.1), 40.0),
            );
        }
        "csg" => {
            checker_floor(&mut scene);
            let hollow = Csg::difference(
                Cube::new(Point3::new(-20.0, 30.0, 200.0), 60.0),
                Sphere::new(Point3::new(-20.0, 30.0, 200.0), 38.0),
            );
            scene.add(hollow, Phong::new(Color::new(0.2, 0.3, 0.8), 25.0));

            let lens = Csg::intersection(
                Sphere::new(Point3::new(50.0, 30.0, 170.0), 35.0),
                Sphere::new(Point3::new(80.0, 30.0, 170.0), 35.0),
            );
            scene.add(lens, Phong::new(Color::new(0.9, 0.7, 0.1), 60.0));
        }
        "textured" => {
            let path = config
                .texture
                .as_ref()
                .ok_or_else(|| ConfigError::MissingTexture(config.scene.clone()))?;
            let bitmap = scene.add_texture(BitmapTexture::open(path, 100.0));
            scene.add(
                Plane::horizontal(0.0),
                Lambert::new(Color::WHITE).with_texture(bitmap),
            );
        }
        other => return Err(ConfigError::UnknownScene(other.to_string())),
    }

    Ok((scene, camera(config)))
}
