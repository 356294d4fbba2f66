//! Pixel-art ocean drawn as a grid of flat-coloured tiles.

use crate::canvas::{Canvas, Paint, Rect, Rgba};
use crate::params::Rgb;

/// Tile edge length (screen pixels)
pub const TILE_PX: u32 = 8;

const NOISE_SIZE: usize = 128;

#[rustfmt::skip]
const DEEP: [Rgb; 4] = [[0x03, 0x04, 0x5e], [0x02, 0x3e, 0x8a], [0x03, 0x53, 0xa4], [0x00, 0x77, 0xb6]];
#[rustfmt::skip]
const MID: [Rgb; 4] = [[0x00, 0x96, 0xc7], [0x00, 0xb4, 0xd8], [0x00, 0x77, 0xb6], [0x00, 0x96, 0xc7]];
#[rustfmt::skip]
const SHALLOW: [Rgb; 4] = [[0x48, 0xca, 0xe4], [0x90, 0xe0, 0xef], [0x00, 0xb4, 0xd8], [0x48, 0xca, 0xe4]];
#[rustfmt::skip]
const BRIGHT: [Rgb; 4] = [[0x90, 0xe0, 0xef], [0xad, 0xe8, 0xf4], [0xca, 0xf0, 0xf8], [0x48, 0xca, 0xe4]];
#[rustfmt::skip]
const FOAM: [Rgb; 4] = [[0xff, 0xff, 0xff], [0xca, 0xf0, 0xf8], [0xe0, 0xf7, 0xff], [0xad, 0xe8, 0xf4]];
#[rustfmt::skip]
const SPARKLE: [Rgb; 3] = [[0xff, 0xff, 0xff], [0xad, 0xe8, 0xf4], [0x90, 0xe0, 0xef]];

/// Deterministic hash in [0, 1) so static tiles never flicker
pub fn seeded_rand(seed: f64) -> f64 {
    let x = (seed + 1.0).sin() * 43758.5453123;
    x - x.floor()
}

fn pick(palette: &[Rgb], seed: f64) -> Rgb {
    let i = (seeded_rand(seed) * palette.len() as f64).floor() as usize;
    palette[i.min(palette.len() - 1)]
}

/// Tiled ocean with depth bands, crest ribbons, foam and sun sparkles
#[derive(Debug, Clone)]
pub struct TileOcean {
    noise: Vec<f64>,
}

impl Default for TileOcean {
    fn default() -> Self {
        Self::new()
    }
}

impl TileOcean {
    pub fn new() -> Self {
        let noise = (0..NOISE_SIZE * NOISE_SIZE)
            .map(|i| seeded_rand(i as f64 * 7919.0))
            .collect();
        Self { noise }
    }

    fn sample_noise(&self, gx: usize, gy: usize) -> f64 {
        self.noise[(gy % NOISE_SIZE) * NOISE_SIZE + gx % NOISE_SIZE]
    }

    /// Tile grid (columns, rows) covering a surface
    pub fn grid(width: u32, height: u32) -> (usize, usize) {
        (
            width.div_ceil(TILE_PX) as usize,
            height.div_ceil(TILE_PX) as usize,
        )
    }

    /// Colour of tile (gx, gy) at time `t` (seconds) in a grid of `rows` rows
    pub fn tile_color(&self, gx: usize, gy: usize, rows: usize, t: f64) -> Rgb {
        let depth = gy as f64 / rows as f64;
        let seed = (gy * 2000 + gx) as f64;
        let (x, y) = (gx as f64, gy as f64);

        let wave = (x * 0.15 + t * 1.2).sin() * 0.06 + (x * 0.07 - t * 0.8).sin() * 0.04;
        let d = (depth + wave + self.sample_noise(gx, gy) * 0.06).clamp(0.0, 1.0);

        let mut color = if d < 0.20 {
            pick(&DEEP, seed)
        } else if d < 0.42 {
            pick(&MID, seed)
        } else if d < 0.66 {
            pick(&SHALLOW, seed)
        } else {
            pick(&BRIGHT, seed)
        };

        let crest = ((x * 0.18 + t * 2.0 + y * 0.05).sin()
            + (x * 0.09 - t * 1.5 + y * 0.03).sin())
            * 0.5;
        if crest > 0.82 && seeded_rand(seed + (t * 3.0).floor()) > 0.35 {
            color = pick(&SHALLOW, seed + 1.0);
        }

        let foam_band = (x * 0.12 + t * 1.8 - y * 0.08).sin();
        if foam_band > 0.78
            && d > 0.25
            && d < 0.72
            && seeded_rand(seed + (t * 4.0).floor()) > 0.55
        {
            color = pick(&FOAM, seed + 3.0);
        }

        let sparkle = (x * 0.35 + t * 3.5).sin() * (y * 0.25 - t * 2.8).cos();
        if sparkle > 0.80 && d < 0.55 && seeded_rand(seed + (t * 6.0).floor()) > 0.70 {
            color = pick(&SPARKLE, seed + 5.0);
        }

        color
    }

    /// Fill every tile of the main surface for time `t`
    pub fn draw<C: Canvas>(&self, main: &mut C, t: f64) {
        let (w, h) = main.size();
        let (cols, rows) = Self::grid(w, h);
        let px = TILE_PX as f32;

        for gy in 0..rows {
            for gx in 0..cols {
                let color = Rgba::rgb(self.tile_color(gx, gy, rows, t), 1.0);
                let rect = Rect::new(gx as f32 * px, gy as f32 * px, px, px);
                main.fill_rect(rect, &Paint::Solid(color));
            }
        }
    }
}
