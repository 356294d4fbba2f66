//! Value noise and fractal accumulation for wave-line turbulence.
//!
//! The lattice table is derived from a sine hash rather than a seeded RNG, so
//! every instance produces identical values. Both generators implement
//! [`noise::NoiseFn`] and can be fed to the `noise` crate's combinators.

use noise::NoiseFn;

/// Number of precomputed lattice values
pub const NOISE_TABLE_SIZE: usize = 512;

/// Octave count used for wave-line turbulence
pub const DEFAULT_OCTAVES: u32 = 4;

/// Frequency multiplier between octaves
const LACUNARITY: f64 = 2.1;

/// Amplitude multiplier between octaves
const PERSISTENCE: f64 = 0.5;

/// Band-limited 2D value noise over a fixed pseudo-random lattice
#[derive(Clone)]
pub struct ValueNoise {
    table: [f64; NOISE_TABLE_SIZE],
}

impl Default for ValueNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueNoise {
    /// Build the lattice table: `fract(sin(i * 127.1 + 311.7) * 43758.5453)`
    pub fn new() -> Self {
        let mut table = [0.0; NOISE_TABLE_SIZE];
        for (i, value) in table.iter_mut().enumerate() {
            let x = (i as f64 * 127.1 + 311.7).sin() * 43758.5453;
            *value = x - x.floor();
        }
        Self { table }
    }

    /// Raw lattice values
    pub fn table(&self) -> &[f64] {
        &self.table
    }

    fn lattice(&self, xi: i64, yi: i64) -> f64 {
        self.table[((xi + yi * 57) & (NOISE_TABLE_SIZE as i64 - 1)) as usize]
    }

    /// Sample smoothed noise at a real-valued point
    ///
    /// Returns value in range [0, 1)
    pub fn smooth(&self, x: f64, y: f64) -> f64 {
        let (x0, y0) = (x.floor(), y.floor());
        let xi = x0 as i64 & 255;
        let yi = y0 as i64 & 255;

        let u = fade(x - x0);
        let v = fade(y - y0);

        let n00 = self.lattice(xi, yi);
        let n10 = self.lattice(xi + 1, yi);
        let n01 = self.lattice(xi, yi + 1);
        let n11 = self.lattice(xi + 1, yi + 1);

        n00 * (1.0 - u) * (1.0 - v) + n10 * u * (1.0 - v) + n01 * (1.0 - u) * v + n11 * u * v
    }
}

impl NoiseFn<f64, 2> for ValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.smooth(point[0], point[1])
    }
}

/// Quintic fade curve, zero first and second derivative at 0 and 1
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Fractal Brownian motion over any 2D noise source
///
/// Octave amplitudes are normalized, so a [0, 1) source yields [0, 1).
pub fn fbm<N: NoiseFn<f64, 2>>(source: &N, x: f64, y: f64, octaves: u32) -> f64 {
    let mut value = 0.0;
    let mut amplitude = PERSISTENCE;
    let mut frequency = 1.0;
    let mut total = 0.0;

    for _ in 0..octaves {
        value += source.get([x * frequency, y * frequency]) * amplitude;
        total += amplitude;
        amplitude *= PERSISTENCE;
        frequency *= LACUNARITY;
    }

    if total == 0.0 {
        0.0
    } else {
        value / total
    }
}

/// Fractal accumulator bundled with its source and octave count
#[derive(Clone)]
pub struct Fbm<N> {
    pub source: N,
    pub octaves: u32,
}

impl Fbm<ValueNoise> {
    pub fn new(octaves: u32) -> Self {
        Self {
            source: ValueNoise::new(),
            octaves,
        }
    }
}

impl Default for Fbm<ValueNoise> {
    fn default() -> Self {
        Self::new(DEFAULT_OCTAVES)
    }
}

impl<N: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Fbm<N> {
    fn get(&self, point: [f64; 2]) -> f64 {
        fbm(&self.source, point[0], point[1], self.octaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_range() {
        let noise = ValueNoise::new();
        assert_eq!(noise.table().len(), NOISE_TABLE_SIZE);
        assert!(noise.table().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_lattice_points_in_range_and_deterministic() {
        let a = ValueNoise::new();
        let b = ValueNoise::new();
        for y in -40..40 {
            for x in -40..40 {
                let (xf, yf) = (x as f64, y as f64);
                let value = a.smooth(xf, yf);
                assert!((0.0..1.0).contains(&value), "{} at ({}, {})", value, x, y);
                assert_eq!(value, a.smooth(xf, yf));
                assert_eq!(value, b.smooth(xf, yf));
            }
        }
    }

    #[test]
    fn test_lattice_point_hits_table_entry() {
        let noise = ValueNoise::new();
        // (3, 2) -> index 3 + 2 * 57
        assert_eq!(noise.smooth(3.0, 2.0), noise.table()[117]);
    }

    #[test]
    fn test_smooth_is_continuous_across_cells() {
        let noise = ValueNoise::new();
        let eps = 1e-7;
        // The lattice wraps every 256 cells, so stay inside one period
        for i in 1..10 {
            let edge = i as f64;
            let left = noise.smooth(edge - eps, 0.37);
            let right = noise.smooth(edge + eps, 0.37);
            assert!((left - right).abs() < 1e-4);
        }
    }

    #[test]
    fn test_noise_fn_matches_smooth() {
        let noise = ValueNoise::new();
        assert_eq!(noise.get([1.25, -7.5]), noise.smooth(1.25, -7.5));
    }

    #[test]
    fn test_fbm_range() {
        let noise = ValueNoise::new();
        for octaves in 1..=8 {
            for i in 0..200 {
                let x = i as f64 * 0.731 - 60.0;
                let y = i as f64 * -0.417 + 13.0;
                let value = fbm(&noise, x, y, octaves);
                assert!((0.0..=1.0).contains(&value), "octaves {}: {}", octaves, value);
            }
        }
    }

    #[test]
    fn test_fbm_single_octave_is_source() {
        let noise = ValueNoise::new();
        assert!((fbm(&noise, 2.3, 4.1, 1) - noise.smooth(2.3, 4.1)).abs() < 1e-12);
    }

    #[test]
    fn test_fbm_zero_octaves() {
        let noise = ValueNoise::new();
        assert_eq!(fbm(&noise, 1.0, 1.0, 0), 0.0);
    }

    #[test]
    fn test_fbm_struct_uses_octaves() {
        let fractal = Fbm::default();
        assert_eq!(fractal.octaves, DEFAULT_OCTAVES);
        assert_eq!(
            fractal.get([0.5, 0.25]),
            fbm(&fractal.source, 0.5, 0.25, DEFAULT_OCTAVES)
        );
    }
}
