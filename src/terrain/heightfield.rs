//! Fractal heightfield synthesis.
//!
//! A [`Heightfield`] is a square grid of `2^N + 1` by `2^N + 1` elevation
//! samples. Features are layered on top of each other additively: each
//! feature is first described on a coarse control grid and then eased up to
//! full resolution with a smoothstep interpolation.

use instant::SystemTime;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Square grid of elevation samples stored in one flat buffer.
///
/// Samples are addressed with `(x, z)` and stored at `x * size + z`.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    levels: u32,
    size: usize,
    samples: Vec<f32>,
}

/// Cubic ease between `left` and `right`.
///
/// `t` is remapped with `3t² - 2t³` before the linear blend, so the curve has
/// zero slope at both control points.
pub fn smoothstep_interpolate(left: f32, right: f32, t: f32) -> f32 {
    let t = t * t * (3.0 - 2.0 * t);
    right * t + left * (1.0 - t)
}

impl Heightfield {
    /// Create a zeroed heightfield of `2^levels + 1` samples per side.
    pub fn new(levels: u32) -> Self {
        let size = (1usize << levels) + 1;
        Self {
            levels,
            size,
            samples: vec![0.0; size * size],
        }
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Samples per side. Always odd.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Elevation at `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the grid.
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.samples[self.index(x, z)]
    }

    pub fn set(&mut self, x: usize, z: usize, value: f32) {
        let idx = self.index(x, z);
        self.samples[idx] = value;
    }

    fn index(&self, x: usize, z: usize) -> usize {
        assert!(
            x < self.size && z < self.size,
            "sample ({}, {}) is outside of a {}x{} heightfield",
            x,
            z,
            self.size,
            self.size
        );
        x * self.size + z
    }

    /// Distance between two control points at coarseness `n`.
    ///
    /// # Panics
    ///
    /// `n` must not exceed the number of levels of this heightfield. Larger
    /// values would produce a zero stride, which is a caller error.
    fn stride(&self, n: u32) -> usize {
        assert!(
            n <= self.levels,
            "coarseness {} exceeds the {} levels of this heightfield",
            n,
            self.levels
        );
        (self.size - 1) >> n
    }

    /// Add a single peak (or pit) in the center of the grid.
    ///
    /// Every control point at stride `(size - 1) >> n` is set to `min`
    /// except the exact center which is set to `max`. The control grid is
    /// eased to full resolution and added to the existing samples.
    pub fn add_spike(&mut self, min: f32, max: f32, n: u32) {
        let stride = self.stride(n);
        let center = self.size / 2;
        let mut control = ControlGrid::new(self.size);
        for x in (0..self.size).step_by(stride) {
            for z in (0..self.size).step_by(stride) {
                let value = if x == center && z == center { max } else { min };
                control.set(x, z, value);
            }
        }
        self.add_interpolated(&control, stride);
    }

    /// Layer `octaves` octaves of value noise starting at `amplitude` and
    /// coarseness `n`.
    ///
    /// The random source is seeded from the system clock, so two calls never
    /// produce the same terrain. Use [`Self::add_octaves_with_rng`] to supply
    /// a generator.
    pub fn add_octaves(&mut self, octaves: u32, amplitude: f32, n: u32) {
        let mut rng = StdRng::seed_from_u64(clock_seed());
        self.add_octaves_with_rng(octaves, amplitude, n, &mut rng);
    }

    /// Same as [`Self::add_octaves`] but draws control values from `rng`.
    ///
    /// Each octave samples its control points uniformly from
    /// `[0, amplitude)`; afterwards the amplitude is halved and the stride
    /// halved (`n + 1`) for the next octave.
    pub fn add_octaves_with_rng<R: Rng + ?Sized>(
        &mut self,
        octaves: u32,
        amplitude: f32,
        n: u32,
        rng: &mut R,
    ) {
        let mut amplitude = amplitude;
        let mut n = n;
        let mut control = ControlGrid::new(self.size);
        for _ in 0..octaves {
            let stride = self.stride(n);
            control.clear();
            for x in (0..self.size).step_by(stride) {
                for z in (0..self.size).step_by(stride) {
                    control.set(x, z, rng.gen_range(0.0f32..1.0) * amplitude);
                }
            }
            self.add_interpolated(&control, stride);

            amplitude /= 2.0;
            n += 1;
        }
    }

    /// Ease a control grid up to full resolution and add it to the samples.
    ///
    /// The last row and column have no control point beyond them, so they
    /// are interpolated along one axis only (or copied at the far corner).
    fn add_interpolated(&mut self, control: &ControlGrid, stride: usize) {
        let last = self.size - 1;
        let stride_f = stride as f32;
        for x in 0..self.size {
            for z in 0..self.size {
                let xneg = (x / stride) * stride;
                let zneg = (z / stride) * stride;
                let xpos = xneg + stride;
                let zpos = zneg + stride;
                let xt = (x - xneg) as f32 / stride_f;
                let zt = (z - zneg) as f32 / stride_f;

                let value = match (x >= last, z >= last) {
                    (true, true) => control.get(x, z),
                    (true, false) => {
                        smoothstep_interpolate(control.get(x, zneg), control.get(x, zpos), zt)
                    }
                    (false, true) => {
                        smoothstep_interpolate(control.get(xneg, z), control.get(xpos, z), xt)
                    }
                    (false, false) => {
                        let near = smoothstep_interpolate(
                            control.get(xneg, zneg),
                            control.get(xpos, zneg),
                            xt,
                        );
                        let far = smoothstep_interpolate(
                            control.get(xneg, zpos),
                            control.get(xpos, zpos),
                            xt,
                        );
                        smoothstep_interpolate(near, far, zt)
                    }
                };
                let idx = x * self.size + z;
                self.samples[idx] += value;
            }
        }
    }
}

/// Scratch grid holding the control points of one feature layer.
struct ControlGrid {
    size: usize,
    values: Vec<f32>,
}

impl ControlGrid {
    fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    fn get(&self, x: usize, z: usize) -> f32 {
        self.values[x * self.size + z]
    }

    fn set(&mut self, x: usize, z: usize, value: f32) {
        self.values[x * self.size + z] = value;
    }
}

fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    nanos.wrapping_mul(nanos)
}
