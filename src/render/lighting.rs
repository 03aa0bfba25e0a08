//! Day cycle: sun direction, sun colour and sky tint as functions of time.

use cgmath::Vector3;

/// Time units per radian of the sun's orbit.
pub const LIGHT_PERIOD: f32 = 15.0;

const LIGHT_DISTANCE: f32 = 10000.0;
const SKY_COLOUR: [f32; 4] = [0.2, 0.5, 0.7, 1.0];

#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
    /// Clear colour of every pass.
    pub sky: [f32; 4],
}

impl Lighting {
    /// Sun and sky at animation time `t`.
    ///
    /// The sun circles in the XY plane; its colour reddens near the horizon
    /// (high powers of the cosine) and the sky fades out through a sigmoid of
    /// the sun's height.
    pub fn at(t: f32) -> Self {
        let cosl = (t / LIGHT_PERIOD).cos();
        let sinl = (t / LIGHT_PERIOD).sin();
        let position = Vector3::new(LIGHT_DISTANCE * cosl, LIGHT_DISTANCE * sinl, -LIGHT_DISTANCE);
        let color = Vector3::new(1.0, 1.0 - 0.5 * cosl.powi(20), 1.0 - cosl.powi(20));

        let dim = 1.0 + (-20.0 * sinl).exp();
        let sky = SKY_COLOUR.map(|c| c / dim);

        Self {
            position,
            color,
            sky,
        }
    }

    pub fn clear_colour(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.sky[0] as f64,
            g: self.sky[1] as f64,
            b: self.sky[2] as f64,
            a: self.sky[3] as f64,
        }
    }
}
