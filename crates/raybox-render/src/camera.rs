//! Pinhole camera producing primary rays.

use raybox_math::{Point3, Ray, Transform, Vec3};

/// Corners of the view plane in world space, one unit in front of the
/// camera before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewPlane {
    up_left: Point3,
    up_right: Point3,
    down_left: Point3,
}

/// A perspective camera.
///
/// The unrotated camera looks along +Z with +Y up. Orientation is given in
/// degrees: `yaw` turns about Y (positive turns toward -X), `pitch` about X
/// (positive looks up), `roll` about the view axis.
///
/// Changing any parameter has no effect on generated rays until
/// [`Camera::begin_render`] is called again.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Point3,
    /// Rotation about the vertical axis, in degrees.
    pub yaw: f64,
    /// Rotation about the horizontal axis, in degrees.
    pub pitch: f64,
    /// Rotation about the view axis, in degrees.
    pub roll: f64,
    /// Field of view across the view-plane diagonal, in degrees.
    pub fov: f64,
    /// Width over height of the view plane.
    pub aspect: f64,
    width: u32,
    height: u32,
    view: ViewPlane,
}

impl Camera {
    /// A camera at `position` looking along +Z with a 90 degree field of view.
    ///
    /// The view is prepared for a 1x1 frame; call [`Camera::begin_render`]
    /// with the real resolution before generating rays.
    pub fn new(position: Point3, aspect: f64) -> Self {
        let mut camera = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov: 90.0,
            aspect,
            width: 1,
            height: 1,
            view: ViewPlane {
                up_left: position,
                up_right: position,
                down_left: position,
            },
        };
        camera.begin_render(1, 1);
        camera
    }

    /// Set yaw, pitch and roll (degrees).
    pub fn with_orientation(mut self, yaw: f64, pitch: f64, roll: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    /// Set the field of view (degrees).
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Recompute the view plane from the current parameters for a frame of
    /// `width` x `height` pixels.
    pub fn begin_render(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        // scale (aspect, 1) so the half-diagonal spans tan(fov / 2)
        let half_diagonal = (self.fov / 2.0).to_radians().tan();
        let scale = half_diagonal / self.aspect.hypot(1.0);
        let x = -self.aspect * scale;
        let y = scale;

        let to_world = Transform::translation(self.position.x, self.position.y, self.position.z)
            .then(&Transform::rotation_y(-self.yaw.to_radians()))
            .then(&Transform::rotation_x(-self.pitch.to_radians()))
            .then(&Transform::rotation_z(-self.roll.to_radians()));

        self.view = ViewPlane {
            up_left: to_world.apply_point(&Point3::new(x, y, 1.0)),
            up_right: to_world.apply_point(&Point3::new(-x, y, 1.0)),
            down_left: to_world.apply_point(&Point3::new(x, -y, 1.0)),
        };
    }

    /// Frame width the view was prepared for.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height the view was prepared for.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Primary ray through the (possibly fractional) pixel position (x, y).
    ///
    /// (0, 0) is the upper-left corner of the view plane and
    /// (width, height) the lower-right one.
    pub fn screen_ray(&self, x: f64, y: f64) -> Ray {
        let v = &self.view;
        let across: Vec3 = (v.up_right - v.up_left) * (x / self.width as f64);
        let down: Vec3 = (v.down_left - v.up_left) * (y / self.height as f64);
        let target = v.up_left + across + down;
        Ray::new(self.position, target - self.position)
    }
}
