//! Software raster backend on `vello_cpu`.
//!
//! Draw calls are queued on a [`RenderContext`] and rasterized on
//! [`Canvas::finish`], which replaces the readable pixels. Clearing resets the
//! queue, so a surface only ever replays the drawing since its last clear.

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;
use log::warn;
use vello_cpu::kurbo::{self, Affine, Cap, Join, Point};
use vello_cpu::peniko::color::PremulRgba8;
use vello_cpu::peniko::{self, Color, Gradient, ImageSampler, Mix};
use vello_cpu::{Image, ImageSource, RenderContext};

use super::path::point;
use super::{BlendMode, Canvas, GradientStop, Paint, Path, Rect, Rgba, Stroke};

/// Smallest vertical squash handed to the paint transform
const MIN_SQUASH: f64 = 1e-3;

/// Render context plus the pixels from the last finish
struct Raster {
    ctx: RenderContext,
    pixels: Arc<vello_cpu::Pixmap>,
    dirty: bool,
}

impl Raster {
    fn new(width: u16, height: u16) -> Self {
        Self {
            ctx: RenderContext::new(width, height),
            pixels: Arc::new(vello_cpu::Pixmap::new(width, height)),
            dirty: false,
        }
    }

    fn draw(&mut self, f: impl FnOnce(&mut RenderContext)) {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint_transform(Affine::IDENTITY);
        f(&mut self.ctx);
        self.dirty = true;
    }
}

/// RGBA surface implementing [`Canvas`]
pub struct Pixmap {
    width: u32,
    height: u32,
    /// `None` for zero-sized surfaces
    raster: Option<Raster>,
}

/// Clamp a requested dimension to what the rasterizer addresses
fn dimension(requested: u32) -> u16 {
    u16::try_from(requested).unwrap_or_else(|_| {
        warn!("Surface dimension {} clamped to {}", requested, u16::MAX);
        u16::MAX
    })
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (dimension(width), dimension(height));
        Self {
            width: u32::from(w),
            height: u32::from(h),
            raster: (w > 0 && h > 0).then(|| Raster::new(w, h)),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes as of the last finish
    fn bytes(&self) -> &[u8] {
        match &self.raster {
            Some(raster) => raster.pixels.data_as_u8_slice(),
            None => &[],
        }
    }

    /// Straight-alpha colour of a pixel as of the last finish
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let [r, g, b, a] = unpremultiply(self.bytes().get(i..i + 4)?);
        Some(Rgba::new(r as f32, g as f32, b as f32, a as f32 / 255.0))
    }

    /// True when every pixel had zero alpha at the last finish
    pub fn is_clear(&self) -> bool {
        self.bytes().chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Export as an 8-bit straight-alpha image
    pub fn to_rgba_image(&self) -> RgbaImage {
        let bytes = self.bytes().chunks_exact(4).flat_map(unpremultiply).collect();
        RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

fn unpremultiply(px: &[u8]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let channel = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
    [channel(px[0]), channel(px[1]), channel(px[2]), a]
}

fn color(c: Rgba) -> Color {
    Color::new([
        (c.r / 255.0).clamp(0.0, 1.0),
        (c.g / 255.0).clamp(0.0, 1.0),
        (c.b / 255.0).clamp(0.0, 1.0),
        c.a.clamp(0.0, 1.0),
    ])
}

fn stops(stops: &[GradientStop]) -> Vec<(f32, Color)> {
    stops.iter().map(|s| (s.offset, color(s.color))).collect()
}

/// Set `paint` on the context; false when there is nothing to draw
fn set_paint(ctx: &mut RenderContext, paint: &Paint) -> bool {
    match paint {
        Paint::Solid(c) => {
            if c.a <= 0.0 {
                return false;
            }
            ctx.set_paint(color(*c));
        }
        Paint::Linear(g) => {
            if g.stops.is_empty() {
                return false;
            }
            ctx.set_paint(
                Gradient::new_linear(point(g.start), point(g.end))
                    .with_stops(stops(&g.stops).as_slice()),
            );
        }
        Paint::Radial(g) => {
            if g.stops.is_empty() {
                return false;
            }
            // Gradient around the origin, moved and squashed into place
            let squash = f64::from(g.squash).abs().max(MIN_SQUASH);
            ctx.set_paint_transform(
                Affine::translate(point(g.center).to_vec2()) * Affine::scale_non_uniform(1.0, squash),
            );
            let inner = g.inner_radius.max(0.0);
            let outer = g.outer_radius.max(inner + f32::EPSILON);
            ctx.set_paint(
                Gradient::new_two_point_radial(Point::ORIGIN, inner, Point::ORIGIN, outer)
                    .with_stops(stops(&g.stops).as_slice()),
            );
        }
    }
    true
}

fn mix(blend: BlendMode) -> Mix {
    match blend {
        BlendMode::SourceOver => Mix::Normal,
        BlendMode::Screen => Mix::Screen,
        BlendMode::Lighten => Mix::Lighten,
    }
}

fn kurbo_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.x as f64,
        rect.y as f64,
        rect.right() as f64,
        rect.bottom() as f64,
    )
}

/// Premultiplied image paint from a straight-alpha image
fn image_paint(image: &RgbaImage) -> Option<Image> {
    let (w, h) = image.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(w), u16::try_from(h)) else {
        warn!("Image {}x{} too large to draw", w, h);
        return None;
    };
    let pixels = image
        .pixels()
        .map(|px| {
            let [r, g, b, a] = px.0;
            let premul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
            PremulRgba8::from_u8_array([premul(r), premul(g), premul(b), a])
        })
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Some(Image {
        image: ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: ImageSampler::default(),
    })
}

impl Canvas for Pixmap {
    fn allocate(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        if let Some(raster) = self.raster.as_mut() {
            raster.ctx.reset();
            raster.dirty = true;
        }
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        raster.draw(|ctx| {
            if set_paint(ctx, paint) {
                ctx.fill_rect(&kurbo_rect(rect));
            }
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        if path.is_empty() {
            return;
        }
        raster.draw(|ctx| {
            if set_paint(ctx, paint) {
                ctx.fill_path(&path.to_bezpath());
            }
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        if path.is_empty() || stroke.width <= 0.0 || stroke.color.a <= 0.0 {
            return;
        }
        raster.draw(|ctx| {
            ctx.set_stroke(
                kurbo::Stroke::new(f64::from(stroke.width))
                    .with_caps(Cap::Butt)
                    .with_join(Join::Miter),
            );
            ctx.set_paint(color(stroke.color));
            ctx.stroke_path(&path.to_bezpath());
        });
    }

    fn composite(&mut self, source: &mut Self, blend: BlendMode) {
        source.finish();
        let (Some(raster), Some(src)) = (self.raster.as_mut(), source.raster.as_ref()) else {
            return;
        };
        let area = Rect::from_size(self.width.min(source.width), self.height.min(source.height));
        let paint = Image {
            image: ImageSource::Pixmap(Arc::clone(&src.pixels)),
            sampler: ImageSampler::default(),
        };
        raster.draw(|ctx| {
            ctx.set_paint(paint);
            ctx.set_blend_mode(peniko::BlendMode::new(mix(blend), peniko::Compose::SrcOver));
            ctx.fill_rect(&kurbo_rect(area));
            ctx.set_blend_mode(peniko::BlendMode::default());
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        let (iw, ih) = image.dimensions();
        if iw == 0 || ih == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(paint) = image_paint(image) else {
            return;
        };
        let scale = Vec2::new(dest.width / iw as f32, dest.height / ih as f32);
        raster.draw(|ctx| {
            ctx.set_paint_transform(
                Affine::translate((dest.x as f64, dest.y as f64))
                    * Affine::scale_non_uniform(scale.x as f64, scale.y as f64),
            );
            ctx.set_paint(paint);
            ctx.fill_rect(&kurbo_rect(dest));
        });
    }

    fn finish(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        if !raster.dirty {
            return;
        }
        let mut target = vello_cpu::Pixmap::new(raster.ctx.width(), raster.ctx.height());
        raster.ctx.flush();
        raster.ctx.render_to_pixmap(&mut target);
        raster.pixels = Arc::new(target);
        raster.dirty = false;
    }
}
