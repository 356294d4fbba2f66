//! Sea-surface model constants and particle generation ranges.

use std::ops::Range;

/// Opaque colour as 8-bit sRGB channels
pub type Rgb = [u8; 3];

/// Deepest water, top of the screen
pub const COL_DEEP: Rgb = [1, 11, 40];
pub const COL_MID: Rgb = [0, 50, 110];
pub const COL_SHALLOW: Rgb = [0, 90, 160];
/// Near-surface water, bottom of the screen
pub const COL_SURF: Rgb = [0, 140, 200];

/// Depth colour stops as (offset along screen height, colour)
pub const DEPTH_STOPS: [(f32, Rgb); 4] = [
    (0.00, COL_DEEP),
    (0.35, COL_MID),
    (0.70, COL_SHALLOW),
    (1.00, COL_SURF),
];

/// One sinusoidal component of the sea surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveLayer {
    /// Height contribution (fraction of screen height before scaling)
    pub amplitude: f64,

    /// Spatial frequency (cycles per normalized unit)
    pub frequency: f64,

    /// Temporal speed (radians per second)
    pub speed: f64,

    /// Phase offset (radians)
    pub phase: f64,
}

/// Superposed wave layers; amplitudes sum to 0.069
#[rustfmt::skip]
pub const WAVE_LAYERS: [WaveLayer; 5] = [
    WaveLayer { amplitude: 0.022, frequency: 0.6, speed: 0.40, phase: 0.0 },
    WaveLayer { amplitude: 0.014, frequency: 1.1, speed: 0.65, phase: 1.3 },
    WaveLayer { amplitude: 0.009, frequency: 2.3, speed: 0.90, phase: 2.7 },
    WaveLayer { amplitude: 0.006, frequency: 3.8, speed: 1.20, phase: 0.8 },
    WaveLayer { amplitude: 0.018, frequency: 0.38, speed: 0.28, phase: 4.1 },
];

/// Static image drawn over the fish layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayAsset {
    /// Image file, relative to the working directory
    pub path: &'static str,

    /// Centre as fractions of surface width/height
    pub x: f32,
    pub y: f32,

    /// Edge length of the square destination (pixels)
    pub size_px: f32,
}

/// Overlays are disabled: the list is intentionally empty.
pub const STATIC_OVERLAYS: &[OverlayAsset] = &[];

/// Particle counts and per-particle random ranges
#[derive(Debug, Clone)]
pub struct ParticleParams {
    pub bubble_count: usize,

    /// Bubble radius (pixels)
    pub bubble_size_px: Range<f32>,

    /// Bubble rise speed (screen heights per second)
    pub bubble_speed: Range<f32>,

    pub fish_count: usize,

    /// Fish swim depth (fraction of screen height)
    pub fish_depth: Range<f32>,

    /// Fish swim speed (screen widths per second)
    pub fish_speed: Range<f32>,

    /// Fish body scale (dimensionless)
    pub fish_scale: Range<f32>,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            bubble_count: 30,
            bubble_size_px: 0.5..2.5,
            bubble_speed: 0.02..0.05,
            fish_count: 4,
            fish_depth: 0.4..0.8,
            fish_speed: 0.05..0.15,
            fish_scale: 0.3..0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_stops_are_ordered() {
        for pair in DEPTH_STOPS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        assert_eq!(DEPTH_STOPS[0].0, 0.0);
        assert_eq!(DEPTH_STOPS[3].0, 1.0);
    }

    #[test]
    fn test_wave_amplitude_sum() {
        let total: f64 = WAVE_LAYERS.iter().map(|w| w.amplitude).sum();
        assert!((total - 0.069).abs() < 1e-12);
    }
}
