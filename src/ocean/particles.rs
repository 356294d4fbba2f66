//! Bubble and fish particle sets.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::params::ParticleParams;

/// Horizontal margin fish swim into beyond each screen edge (pixels)
const FISH_MARGIN_PX: f64 = 100.0;

/// Bubble rising from the sea floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    /// Start position as fractions of surface width/height
    pub x: f32,
    pub y: f32,

    /// Radius (pixels)
    pub size: f32,

    /// Rise speed (surface heights per second)
    pub speed: f32,

    /// Drift phase (radians)
    pub phase: f32,
}

impl Bubble {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &ParticleParams) -> Self {
        Self {
            x: rng.gen(),
            y: rng.gen(),
            size: rng.gen_range(params.bubble_size_px.clone()),
            speed: rng.gen_range(params.bubble_speed.clone()),
            phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Vertical travel before wrapping, in pixels (unwrapped)
    pub fn rise(&self, t: f64, height: f64) -> f64 {
        t * self.speed as f64 * height
    }

    /// Screen position; wraps to the bottom after leaving the top
    pub fn position(&self, t: f64, width: f64, height: f64) -> Vec2 {
        let drift = (t * 0.5 + self.phase as f64).sin() * 20.0;
        let x = wrap(self.x as f64 * width + drift, width);
        let y = wrap(self.y as f64 * height - self.rise(t, height), height);
        Vec2::new(x as f32, y as f32)
    }
}

/// Fish silhouette crossing the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fish {
    /// Swim depth (fraction of surface height)
    pub y: f32,

    /// Swim speed (surface widths per second)
    pub speed: f32,

    /// Body scale (dimensionless)
    pub scale: f32,

    /// Start offset and bob phase (radians)
    pub phase: f32,
}

impl Fish {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &ParticleParams) -> Self {
        Self {
            y: rng.gen_range(params.fish_depth.clone()),
            speed: rng.gen_range(params.fish_speed.clone()),
            scale: rng.gen_range(params.fish_scale.clone()),
            phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Screen position; loops across `width + 200` pixels
    pub fn position(&self, t: f64, width: f64, height: f64) -> Vec2 {
        let (speed, phase) = (self.speed as f64, self.phase as f64);
        let lap = width + 2.0 * FISH_MARGIN_PX;
        let x = (t * speed * width + phase * width).rem_euclid(lap) - FISH_MARGIN_PX;
        let y = self.y as f64 * height + (t * 1.2 + phase).sin() * 15.0;
        Vec2::new(x as f32, y as f32)
    }
}

/// Euclidean wrap into [0, extent); zero extent maps to 0
fn wrap(value: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        value.rem_euclid(extent)
    } else {
        0.0
    }
}

/// Particle sets owned by one backdrop instance
#[derive(Debug, Clone, Default)]
pub struct Particles {
    pub bubbles: Vec<Bubble>,
    pub fish: Vec<Fish>,
}

impl Particles {
    /// Generate all particles once from the given random source
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &ParticleParams) -> Self {
        let bubbles = (0..params.bubble_count)
            .map(|_| Bubble::random(&mut *rng, params))
            .collect();
        let fish = (0..params.fish_count)
            .map(|_| Fish::random(&mut *rng, params))
            .collect();
        Self { bubbles, fish }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particles(seed: u64) -> Particles {
        Particles::generate(&mut StdRng::seed_from_u64(seed), &ParticleParams::default())
    }

    #[test]
    fn test_counts_and_ranges() {
        let params = ParticleParams::default();
        let p = particles(7);
        assert_eq!(p.bubbles.len(), 30);
        assert_eq!(p.fish.len(), 4);
        for b in &p.bubbles {
            assert!((0.0..1.0).contains(&b.x) && (0.0..1.0).contains(&b.y));
            assert!(params.bubble_size_px.contains(&b.size));
            assert!(params.bubble_speed.contains(&b.speed));
            assert!((0.0..TAU).contains(&b.phase));
        }
        for f in &p.fish {
            assert!(params.fish_depth.contains(&f.y));
            assert!(params.fish_speed.contains(&f.speed));
            assert!(params.fish_scale.contains(&f.scale));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        assert_eq!(particles(42).bubbles, particles(42).bubbles);
        assert_eq!(particles(42).fish, particles(42).fish);
        assert_ne!(particles(42).bubbles, particles(43).bubbles);
    }

    #[test]
    fn test_bubble_positions_stay_on_surface() {
        let p = particles(1);
        for b in &p.bubbles {
            for step in 0..50 {
                let pos = b.position(step as f64 * 0.77, 800.0, 600.0);
                assert!((0.0..800.0).contains(&pos.x));
                assert!((0.0..600.0).contains(&pos.y));
            }
        }
    }

    #[test]
    fn test_bubble_wraps_after_full_rise() {
        let (w, h) = (800.0, 600.0);
        let mut p = particles(3);
        // Default speeds are too slow to wrap in 10 s; speed one up
        p.bubbles[0].speed = 0.15;
        for b in p.bubbles.iter().filter(|b| b.rise(10.0, h) > h) {
            let unwrapped = b.y as f64 * h - b.rise(10.0, h);
            // Off the top by more than a screen, so it wrapped at least once
            assert!(unwrapped < 0.0);
            let pos = b.position(10.0, w, h);
            assert!((pos.y as f64 - unwrapped.rem_euclid(h)).abs() < 1e-3);
        }
        assert!(p.bubbles[0].rise(10.0, h) > h);
    }

    #[test]
    fn test_position_is_pure() {
        let p = particles(9);
        let b = p.bubbles[5];
        assert_eq!(b.position(3.25, 640.0, 480.0), b.position(3.25, 640.0, 480.0));
        let f = p.fish[2];
        assert_eq!(f.position(3.25, 640.0, 480.0), f.position(3.25, 640.0, 480.0));
    }

    #[test]
    fn test_fish_loop_span() {
        let p = particles(11);
        for f in &p.fish {
            for step in 0..100 {
                let pos = f.position(step as f64 * 0.4, 1000.0, 500.0);
                assert!(pos.x >= -100.0 && pos.x < 1100.0);
                assert!((pos.y - f.y * 500.0).abs() <= 15.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_zero_surface_does_not_panic() {
        let p = particles(5);
        let pos = p.bubbles[0].position(1.0, 0.0, 0.0);
        assert_eq!(pos, Vec2::ZERO);
    }
}
