//! Orbit camera, its mirror image below the water plane, and projection.
//!
//! The camera never moves through the world: the terrain is rotated and
//! scaled in front of it. The position handed to the shaders is recovered by
//! inverting the view matrix.

use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector2, Vector3, Vector4, perspective};

/// Converts OpenGL-style clip space (z in -1..1) to WGPU's (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const MIN_VIEW_SCALE: f32 = 0.002;
const MAX_VIEW_SCALE: f32 = 0.05;

/// Map the widget scale (1..200 percent as a fraction) onto a view scale.
pub fn view_scale_for(scale: f32) -> f32 {
    let a = (MAX_VIEW_SCALE - MIN_VIEW_SCALE) / 1.99;
    let b = MIN_VIEW_SCALE - (MAX_VIEW_SCALE - MIN_VIEW_SCALE) / 199.0;
    a * scale + b
}

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Pitch and yaw in degrees.
    rotation: Vector2<f32>,
    scale: f32,
    view_scale: f32,
    water_height: f32,
}

impl OrbitCamera {
    pub fn new(rotate_x: i32, rotate_y: i32, scale_percent: i32, water_height: f32) -> Self {
        let scale = scale_percent as f32 / 100.0;
        Self {
            rotation: Vector2::new(rotate_x as f32, rotate_y as f32),
            scale,
            view_scale: view_scale_for(scale),
            water_height,
        }
    }

    pub fn set_rotation(&mut self, rotate_x: i32, rotate_y: i32) {
        self.rotation = Vector2::new(rotate_x as f32, rotate_y as f32);
    }

    pub fn set_scale(&mut self, scale_percent: i32) {
        self.scale = scale_percent as f32 / 100.0;
        self.view_scale = view_scale_for(self.scale);
    }

    pub fn rotation(&self) -> Vector2<f32> {
        self.rotation
    }

    pub fn view_scale(&self) -> f32 {
        self.view_scale
    }

    pub fn water_height(&self) -> f32 {
        self.water_height
    }

    fn base(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(0.0, 0.0, -1.0)) * Matrix4::from_scale(self.view_scale)
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.base()
            * Matrix4::from_axis_angle(-Vector3::unit_x(), Deg(self.rotation.x))
            * Matrix4::from_axis_angle(Vector3::unit_y(), Deg(self.rotation.y))
    }

    /// World-space eye position of the main camera.
    pub fn position(&self) -> Point3<f32> {
        let eye = self
            .view_matrix()
            .invert()
            .map(|inv| inv * Vector4::new(0.0, 0.0, 0.0, 1.0))
            .unwrap_or_else(|| Vector4::new(0.0, 0.0, 0.0, 1.0));
        Point3::new(eye.x, eye.y, eye.z)
    }

    /// View of the camera mirrored about the water plane.
    ///
    /// The pitch flips sign and the world is shifted so that the plane at
    /// `water_height` maps onto itself.
    pub fn reflected_view_matrix(&self) -> Matrix4<f32> {
        self.base()
            * Matrix4::from_axis_angle(Vector3::unit_x(), Deg(self.rotation.x))
            * Matrix4::from_axis_angle(Vector3::unit_y(), Deg(self.rotation.y))
            * Matrix4::from_translation(Vector3::new(0.0, -2.0 * self.water_height, 0.0))
    }

    pub fn reflected_position(&self) -> Point3<f32> {
        let eye = self.position();
        Point3::new(eye.x, -eye.y + 2.0 * self.water_height, eye.z)
    }
}

/// Perspective projection that follows the viewport size.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Deg<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}
