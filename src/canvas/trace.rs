//! Recording canvas for inspecting draw calls in tests.

use image::RgbaImage;

use super::{BlendMode, Canvas, Paint, Path, Rect, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect(Rect, Paint),
    FillPath(Path, Paint),
    StrokePath(Path, Stroke),
    /// Blend mode plus the source's operations at the time of compositing
    Composite(BlendMode, Vec<DrawOp>),
    DrawImage(Rect),
}

/// Canvas that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct TraceCanvas {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl TraceCanvas {
    pub fn draw_count(&self) -> usize {
        self.ops.iter().filter(|op| **op != DrawOp::Clear).count()
    }

    pub fn fill_rects(&self) -> impl Iterator<Item = (&Rect, &Paint)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect(rect, paint) => Some((rect, paint)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&Path, &Stroke)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokePath(path, stroke) => Some((path, stroke)),
            _ => None,
        })
    }
}

impl Canvas for TraceCanvas {
    fn allocate(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::FillRect(rect, paint.clone()));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::FillPath(path.clone(), paint.clone()));
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.ops.push(DrawOp::StrokePath(path.clone(), *stroke));
    }

    fn composite(&mut self, source: &mut Self, blend: BlendMode) {
        self.ops.push(DrawOp::Composite(blend, source.ops.clone()));
    }

    fn draw_image(&mut self, _image: &RgbaImage, dest: Rect) {
        self.ops.push(DrawOp::DrawImage(dest));
    }
}
