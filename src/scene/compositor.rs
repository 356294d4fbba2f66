//! Layered underwater frame: gradient, light, life, caustics and surface lines.

use image::RgbaImage;
use log::{info, warn};
use noise::NoiseFn;

use crate::canvas::{
    BlendMode, Canvas, GradientStop, LinearGradient, Paint, Path, RadialGradient, Rect, Rgba,
    Stroke, Vec2,
};
use crate::noise::{Fbm, ValueNoise};
use crate::ocean::{wave_height, Particles};
use crate::params::{OverlayAsset, Rgb, COL_DEEP, COL_MID, COL_SHALLOW, COL_SURF, DEPTH_STOPS};

const GOD_RAY_COUNT: usize = 6;
const WAVE_ROWS: usize = 100;
const FOAM_STREAKS: usize = 24;
const FOAM_SAMPLES: usize = 20;

/// Crest highlight threshold on the 10x-scaled wave height
const CREST_THRESHOLD: f64 = 0.4;

/// Overlay image decoded and ready to draw
#[derive(Clone)]
pub struct Overlay {
    pub asset: OverlayAsset,
    pub image: RgbaImage,
}

/// Decode overlay images, skipping any that fail to load
pub fn load_overlays(assets: &[OverlayAsset]) -> Vec<Overlay> {
    assets
        .iter()
        .filter_map(|asset| match image::open(asset.path) {
            Ok(img) => {
                info!("Loaded overlay {}", asset.path);
                Some(Overlay {
                    asset: *asset,
                    image: img.to_rgba8(),
                })
            }
            Err(e) => {
                warn!("Skipping overlay {}: {}", asset.path, e);
                None
            }
        })
        .collect()
}

/// Draws one frame of the realistic ocean onto a main and an offscreen surface
#[derive(Clone)]
pub struct OceanCompositor {
    particles: Particles,
    turbulence: Fbm<ValueNoise>,
    overlays: Vec<Overlay>,
    fish_shape: Path,
}

impl OceanCompositor {
    pub fn new(particles: Particles) -> Self {
        let mut fish_shape = Path::new();
        fish_shape.ellipse(Vec2::ZERO, 20.0, 8.0).polygon(&[
            Vec2::new(-15.0, 0.0),
            Vec2::new(-25.0, -10.0),
            Vec2::new(-25.0, 10.0),
        ]);

        Self {
            particles,
            turbulence: Fbm::default(),
            overlays: Vec::new(),
            fish_shape,
        }
    }

    pub fn with_overlays(mut self, overlays: Vec<Overlay>) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    /// Render the frame at elapsed time `t` (seconds)
    ///
    /// Both surfaces must share the same size. The offscreen surface is
    /// scratch space for the caustics pass.
    pub fn draw<C: Canvas>(&self, main: &mut C, offscreen: &mut C, t: f64) {
        let (w, h) = main.size();
        if w == 0 || h == 0 {
            return;
        }
        let (w, h) = (w as f64, h as f64);

        main.clear();
        self.draw_background(main, w, h);
        self.draw_god_rays(main, t, w, h);
        self.draw_fish(main, t, w, h);
        self.draw_overlays(main, w, h);
        self.draw_bubbles(main, t, w, h);

        self.draw_caustics(offscreen, t, w, h);
        main.composite(offscreen, BlendMode::Screen);

        self.draw_wave_lines(main, t, w, h);
        self.draw_foam(main, t, w, h);
        self.draw_vignette(main, w, h);
    }

    fn draw_background<C: Canvas>(&self, main: &mut C, w: f64, h: f64) {
        let (w, h) = (w as f32, h as f32);
        main.fill_rect(Rect::new(0.0, 0.0, w, h), &depth_gradient(h));
    }

    fn draw_god_rays<C: Canvas>(&self, main: &mut C, t: f64, w: f64, h: f64) {
        for i in 0..GOD_RAY_COUNT {
            let seed = i as f64 * 1.5;
            let x = ((t * 0.05 + seed).rem_euclid(2.0) - 0.5) * w;
            let width = 100.0 + (t * 0.5 + seed).sin() * 40.0;
            let alpha = 0.02 + (t * 0.8 + seed).sin() * 0.01;

            let (x, width, h) = (x as f32, width as f32, h as f32);
            let paint = Paint::Linear(LinearGradient {
                start: Vec2::new(x, 0.0),
                end: Vec2::new(x + 200.0, h),
                stops: vec![
                    GradientStop::new(0.0, Rgba::new(200.0, 240.0, 255.0, alpha as f32)),
                    GradientStop::new(1.0, Rgba::TRANSPARENT),
                ],
            });

            let mut ray = Path::new();
            ray.polygon(&[
                Vec2::new(x, 0.0),
                Vec2::new(x + width, 0.0),
                Vec2::new(x + width + 300.0, h),
                Vec2::new(x + 300.0, h),
            ]);
            main.fill_path(&ray, &paint);
        }
    }

    fn draw_fish<C: Canvas>(&self, main: &mut C, t: f64, w: f64, h: f64) {
        let paint = Paint::Solid(Rgba::new(0.0, 20.0, 50.0, 0.15));
        for fish in &self.particles.fish {
            let pos = fish.position(t, w, h);
            let body = self.fish_shape.transformed(Vec2::splat(fish.scale), pos);
            main.fill_path(&body, &paint);
        }
    }

    fn draw_overlays<C: Canvas>(&self, main: &mut C, w: f64, h: f64) {
        for overlay in &self.overlays {
            let a = &overlay.asset;
            let cx = a.x * w as f32;
            let cy = a.y * h as f32;
            let half = a.size_px / 2.0;
            let dest = Rect::new(cx - half, cy - half, a.size_px, a.size_px);
            main.draw_image(&overlay.image, dest);
        }
    }

    fn draw_bubbles<C: Canvas>(&self, main: &mut C, t: f64, w: f64, h: f64) {
        let paint = Paint::Solid(Rgba::new(255.0, 255.0, 255.0, 0.2));
        for bubble in &self.particles.bubbles {
            let mut dot = Path::new();
            dot.circle(bubble.position(t, w, h), bubble.size);
            main.fill_path(&dot, &paint);
        }
    }

    fn draw_caustics<C: Canvas>(&self, offscreen: &mut C, t: f64, w: f64, h: f64) {
        offscreen.clear();

        let count = caustic_count(w);
        for i in 0..count {
            let seed = i as f64 * 1.618;
            let bx = ((seed * 17.3).sin() * 0.5 + 0.5) * w;
            let by = ((seed * 11.7).sin() * 0.5 + 0.5) * h;
            let phase = seed * 2.31;
            let rx = (20.0 + (seed * 5.1).sin().abs() * 60.0) * (0.8 + 0.4 * (t * 0.9 + phase).sin());
            let ry = rx * (0.3 + 0.2 * (t * 1.1 + phase * 1.3).cos());
            let alpha = (0.03 + 0.04 * (t * 1.3 + phase).sin().abs()) as f32;
            let squash = (ry / rx.max(1.0)) as f32;

            let center = Vec2::new(bx as f32, by as f32);
            let rx = rx as f32;
            let paint = Paint::Radial(RadialGradient {
                center,
                inner_radius: 0.0,
                outer_radius: rx,
                squash,
                stops: vec![
                    GradientStop::new(0.0, Rgba::new(180.0, 230.0, 255.0, alpha)),
                    GradientStop::new(0.5, Rgba::new(100.0, 190.0, 240.0, alpha * 0.4)),
                    GradientStop::new(1.0, Rgba::TRANSPARENT),
                ],
            });

            let mut blob = Path::new();
            blob.ellipse(center, rx, rx * squash);
            offscreen.fill_path(&blob, &paint);
        }
    }

    fn draw_wave_lines<C: Canvas>(&self, main: &mut C, t: f64, w: f64, h: f64) {
        let steps = (w / 4.0).ceil() as usize;

        for row in 0..WAVE_ROWS {
            let frac = row as f64 / WAVE_ROWS as f64;
            let screen_y = frac * h;
            let persp = 0.3 + frac * 0.7;

            let mut line = Path::new();
            for s in 0..=steps {
                let nx = s as f64 / steps as f64;
                let wave = wave_height(nx * persp * 4.0 + frac * 2.1, t);
                let turb = self
                    .turbulence
                    .get([nx * 6.0 + t * 0.12, frac * 3.0 + t * 0.08])
                    * 0.06
                    - 0.03;
                let py = screen_y + (wave + turb) * h * 0.09 * (1.0 - frac * 0.5);
                let p = Vec2::new((s as f64 * (w / steps as f64)) as f32, py as f32);
                if s == 0 {
                    line.move_to(p);
                } else {
                    line.line_to(p);
                }
            }

            let frac = frac as f32;
            let color = row_color(frac).with_alpha(0.2 + frac * 0.3);
            let width = 0.5 + frac * 1.5;
            main.stroke_path(&line, &Stroke::new(color, width));

            let crest = wave_height((row as f64 * 0.37 + t * 0.5).rem_euclid(4.0), t);
            let crest_alpha = (crest * 10.0).max(0.0);
            if crest_alpha > CREST_THRESHOLD {
                let highlight = Rgba::new(200.0, 240.0, 255.0, (crest_alpha * 0.15) as f32);
                main.stroke_path(&line, &Stroke::new(highlight, width * 1.4));
            }
        }
    }

    fn draw_foam<C: Canvas>(&self, main: &mut C, t: f64, w: f64, h: f64) {
        for i in 0..FOAM_STREAKS {
            let seed = i as f64 * 2.4;
            let frac = (seed * 13.1).sin() * 0.5 + 0.5;
            let screen_y = frac * h;
            let phase = seed * 3.7;
            let speed = 0.22 + frac * 0.18;
            let x_off = (t * speed + phase).rem_euclid(1.5) * w;
            let len = 40.0 + frac * 120.0;

            let alpha = (0.10 + 0.15 * frac) * 0.9;
            let stroke = Stroke::new(Rgba::WHITE.with_alpha(alpha as f32), (1.0 + frac * 2.5) as f32);

            let mut streak = Path::new();
            let mut last_x = f64::NEG_INFINITY;
            for s in 0..=FOAM_SAMPLES {
                let sx = (x_off + s as f64 * (len / FOAM_SAMPLES as f64)).rem_euclid(w);
                let sy = screen_y + wave_height(sx / w * 4.0 + frac * 2.0, t) * h * 0.06;
                let p = Vec2::new(sx as f32, sy as f32);
                // Wrapped past the right edge: continue from the left
                if s == 0 || sx < last_x {
                    streak.move_to(p);
                } else {
                    streak.line_to(p);
                }
                last_x = sx;
            }
            main.stroke_path(&streak, &stroke);
        }
    }

    fn draw_vignette<C: Canvas>(&self, main: &mut C, w: f64, h: f64) {
        let (w, h) = (w as f32, h as f32);
        let paint = Paint::Radial(RadialGradient {
            center: Vec2::new(w / 2.0, h / 2.0),
            inner_radius: h * 0.3,
            outer_radius: h * 0.9,
            squash: 1.0,
            stops: vec![
                GradientStop::new(0.0, Rgba::TRANSPARENT),
                GradientStop::new(1.0, Rgba::new(0.0, 5.0, 25.0, 0.4)),
            ],
        });
        main.fill_rect(Rect::new(0.0, 0.0, w, h), &paint);
    }
}

/// Number of caustic blobs for a surface width
pub fn caustic_count(width: f64) -> usize {
    40 + (width / 30.0).floor() as usize
}

/// Vertical deep-to-surface gradient over a surface of the given height
pub fn depth_gradient(height: f32) -> Paint {
    Paint::Linear(LinearGradient {
        start: Vec2::ZERO,
        end: Vec2::new(0.0, height),
        stops: DEPTH_STOPS
            .iter()
            .map(|&(offset, rgb)| GradientStop::new(offset, Rgba::rgb(rgb, 1.0)))
            .collect(),
    })
}

/// Wave-line colour for a row at `frac` of the screen height, channels
/// truncated to whole levels
fn row_color(frac: f32) -> Rgba {
    let lerp = |a: Rgb, b: Rgb, t: f32| {
        let c = Rgba::rgb(a, 1.0).lerp(Rgba::rgb(b, 1.0), t);
        Rgba::new(c.r.trunc(), c.g.trunc(), c.b.trunc(), c.a)
    };
    if frac < 0.35 {
        lerp(COL_DEEP, COL_MID, frac / 0.35)
    } else if frac < 0.70 {
        lerp(COL_MID, COL_SHALLOW, (frac - 0.35) / 0.35)
    } else {
        lerp(COL_SHALLOW, COL_SURF, (frac - 0.70) / 0.30)
    }
}
