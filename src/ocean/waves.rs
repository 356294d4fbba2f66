//! Superposed sinusoidal wave layers.

use std::f64::consts::TAU;

use crate::params::WAVE_LAYERS;

/// Vertical displacement of the sea surface
///
/// # Arguments
/// * `nx` - Horizontal coordinate (normalized, unbounded)
/// * `t` - Elapsed time in seconds
pub fn wave_height(nx: f64, t: f64) -> f64 {
    WAVE_LAYERS
        .iter()
        .map(|w| (nx * w.frequency * TAU + t * w.speed + w.phase).sin() * w.amplitude)
        .sum()
}

/// Largest possible |wave_height|: the sum of layer amplitudes
pub fn wave_height_bound() -> f64 {
    WAVE_LAYERS.iter().map(|w| w.amplitude.abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_is_amplitude_sum() {
        assert!((wave_height_bound() - 0.069).abs() < 1e-12);
    }

    #[test]
    fn test_wave_height_bounded() {
        let bound = wave_height_bound();
        for i in 0..2000 {
            let nx = i as f64 * 0.0137 - 10.0;
            let t = i as f64 * 0.731;
            assert!(wave_height(nx, t).abs() <= bound + 1e-12);
        }
    }

    #[test]
    fn test_wave_height_continuous() {
        let step = 1e-6;
        for i in 0..100 {
            let nx = i as f64 * 0.05;
            let delta = (wave_height(nx + step, 3.0) - wave_height(nx, 3.0)).abs();
            // Lipschitz bound: sum of amp * freq * 2pi is well under 1
            assert!(delta < step);
        }
    }

    #[test]
    fn test_wave_height_at_origin() {
        let expected: f64 = WAVE_LAYERS.iter().map(|w| w.phase.sin() * w.amplitude).sum();
        assert_eq!(wave_height(0.0, 0.0), expected);
    }
}
