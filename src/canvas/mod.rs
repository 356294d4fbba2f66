//! 2D drawing capability used by the backdrops.
//!
//! The compositors only talk to [`Canvas`], so the same frame logic can target
//! the `vello_cpu`-backed [`Pixmap`] or any other backend that provides these
//! primitives: rectangle and path fills, polyline strokes, linear and radial
//! gradients, and surface composition with a blend mode.

mod path;
mod pixmap;
#[cfg(test)]
pub(crate) mod trace;

pub use glam::Vec2;
pub use path::{Path, SubPath};
pub use pixmap::Pixmap;

use image::RgbaImage;

use crate::params::Rgb;

/// Colour with 0-255 colour channels and a 0-1 alpha, like CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::new(255.0, 255.0, 255.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque-palette colour with explicit alpha
    pub fn rgb(rgb: Rgb, a: f32) -> Self {
        Self::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Straight-alpha linear interpolation, `t` clamped to [0, 1]
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole surface of the given size
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Gradient along the line from `start` to `end`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<GradientStop>,
}

/// Concentric radial gradient; `squash` scales it vertically (1.0 = circle)
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub squash: f32,
    pub stops: Vec<GradientStop>,
}

/// Fill source for rectangles and paths
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

/// Stroke style for polylines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// How a composited surface combines with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard source-over alpha blending
    SourceOver,
    /// 1 - (1 - src)(1 - dst): brightens, never darkens
    Screen,
    /// Per-channel maximum
    Lighten,
}

/// Drawing surface capability
pub trait Canvas {
    /// Create a transparent surface; zero dimensions are allowed
    fn allocate(width: u32, height: u32) -> Self
    where
        Self: Sized;

    fn size(&self) -> (u32, u32);

    /// Reset every pixel to fully transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fill all sub-paths with the nonzero winding rule
    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);

    /// Draw another surface of the same size at the origin; finishes
    /// `source` first
    fn composite(&mut self, source: &mut Self, blend: BlendMode)
    where
        Self: Sized;

    /// Draw a straight-alpha image scaled into `dest`
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    /// Complete queued drawing so the pixels can be read back
    fn finish(&mut self) {}
}
