//! Animated backdrops.
//!
//! A [`Backdrop`] owns everything one ocean needs to draw itself: particles,
//! noise generators and any decoded overlay images. It draws a frame onto
//! a main surface plus an offscreen scratch surface for a given elapsed time.

mod compositor;
mod tiles;

pub use compositor::{caustic_count, depth_gradient, load_overlays, OceanCompositor, Overlay};
pub use tiles::{seeded_rand, TileOcean, TILE_PX};

use clap::ValueEnum;
use rand::Rng;

use crate::canvas::Canvas;
use crate::ocean::Particles;
use crate::params::{ParticleParams, STATIC_OVERLAYS};

/// Which backdrop to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SceneKind {
    /// Layered underwater scene with caustics and surface lines
    #[default]
    Realistic,
    /// Pixel-art tile ocean
    Pixel,
}

#[derive(Clone)]
pub enum Backdrop {
    Realistic(OceanCompositor),
    Pixel(TileOcean),
}

impl Backdrop {
    /// Build a backdrop, drawing any randomness from `rng`
    pub fn build<R: Rng + ?Sized>(kind: SceneKind, rng: &mut R, params: &ParticleParams) -> Self {
        match kind {
            SceneKind::Realistic => {
                let particles = Particles::generate(rng, params);
                let overlays = load_overlays(STATIC_OVERLAYS);
                Backdrop::Realistic(OceanCompositor::new(particles).with_overlays(overlays))
            }
            SceneKind::Pixel => Backdrop::Pixel(TileOcean::new()),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Backdrop::Realistic(_) => SceneKind::Realistic,
            Backdrop::Pixel(_) => SceneKind::Pixel,
        }
    }

    /// Draw the frame at elapsed time `t` (seconds)
    pub fn draw<C: Canvas>(&self, main: &mut C, offscreen: &mut C, t: f64) {
        match self {
            Backdrop::Realistic(ocean) => ocean.draw(main, offscreen, t),
            Backdrop::Pixel(tiles) => tiles.draw(main, t),
        }
    }
}
