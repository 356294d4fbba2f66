//! Polyline paths built with canvas-style commands.

use glam::Vec2;
use vello_cpu::kurbo::{self, BezPath, Ellipse, PathEl, Point, Shape};

/// Curve flattening tolerance (pixels)
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Connected run of points; closed sub-paths connect back to the start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPath {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

impl SubPath {
    /// Line segments, including the closing one for closed sub-paths
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if self.points.len() > 2 => Some((last, first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

/// Sequence of sub-paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sub-path at `p`
    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.subpaths.push(SubPath {
            points: vec![p],
            closed: false,
        });
        self
    }

    /// Extend the current sub-path; starts one if there is none
    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        match self.subpaths.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(p),
            _ => {
                self.move_to(p);
            }
        }
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if let Some(sub) = self.subpaths.last_mut() {
            sub.closed = true;
        }
        self
    }

    /// Closed polygon through `points`
    pub fn polygon(&mut self, points: &[Vec2]) -> &mut Self {
        if let Some((&first, rest)) = points.split_first() {
            self.move_to(first);
            for &p in rest {
                self.line_to(p);
            }
            self.close();
        }
        self
    }

    /// Closed axis-aligned ellipse, flattened to a polygon
    pub fn ellipse(&mut self, center: Vec2, rx: f32, ry: f32) -> &mut Self {
        let shape = Ellipse::new(
            point(center),
            (rx.abs() as f64, ry.abs() as f64),
            0.0,
        );
        let mut points = Vec::new();
        kurbo::flatten(shape.path_elements(FLATTEN_TOLERANCE), FLATTEN_TOLERANCE, |el| {
            if let PathEl::MoveTo(p) | PathEl::LineTo(p) = el {
                points.push(Vec2::new(p.x as f32, p.y as f32));
            }
        });
        self.polygon(&points)
    }

    pub fn circle(&mut self, center: Vec2, radius: f32) -> &mut Self {
        self.ellipse(center, radius, radius)
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.points.is_empty())
    }

    /// Scale about the origin, then translate
    pub fn transformed(&self, scale: Vec2, offset: Vec2) -> Path {
        Path {
            subpaths: self
                .subpaths
                .iter()
                .map(|sub| SubPath {
                    points: sub.points.iter().map(|&p| p * scale + offset).collect(),
                    closed: sub.closed,
                })
                .collect(),
        }
    }

    /// Line-segment Bézier path for the raster backend
    pub fn to_bezpath(&self) -> BezPath {
        let mut out = BezPath::new();
        for sub in &self.subpaths {
            let Some((&first, rest)) = sub.points.split_first() else {
                continue;
            };
            out.move_to(point(first));
            for &p in rest {
                out.line_to(point(p));
            }
            if sub.closed {
                out.close_path();
            }
        }
        out
    }
}

pub(crate) fn point(p: Vec2) -> Point {
    Point::new(p.x as f64, p.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_to_without_move_starts_subpath() {
        let mut path = Path::new();
        path.line_to(Vec2::new(1.0, 2.0)).line_to(Vec2::new(3.0, 4.0));
        assert_eq!(path.subpaths().len(), 1);
        assert_eq!(path.subpaths()[0].points.len(), 2);
    }

    #[test]
    fn test_closed_polygon_segments() {
        let mut path = Path::new();
        path.polygon(&[Vec2::ZERO, Vec2::X, Vec2::ONE]);
        let segments: Vec<_> = path.subpaths()[0].segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], (Vec2::ONE, Vec2::ZERO));
    }

    #[test]
    fn test_ellipse_stays_in_its_box() {
        let mut path = Path::new();
        path.ellipse(Vec2::new(50.0, 50.0), 20.0, 8.0);
        let sub = &path.subpaths()[0];
        assert!(sub.closed);
        assert!(sub.points.len() > 8);

        let (lo, hi) = sub
            .points
            .iter()
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });
        assert!((lo.x - 30.0).abs() < 0.2 && (hi.x - 70.0).abs() < 0.2);
        assert!((lo.y - 42.0).abs() < 0.2 && (hi.y - 58.0).abs() < 0.2);
    }

    #[test]
    fn test_transformed() {
        let mut path = Path::new();
        path.move_to(Vec2::new(-15.0, 0.0)).line_to(Vec2::new(-25.0, 10.0));
        let moved = path.transformed(Vec2::splat(0.5), Vec2::new(100.0, 10.0));
        assert_eq!(moved.subpaths()[0].points[1], Vec2::new(87.5, 15.0));
    }

    #[test]
    fn test_to_bezpath_keeps_subpaths() {
        let mut path = Path::new();
        path.polygon(&[Vec2::ZERO, Vec2::X, Vec2::ONE])
            .move_to(Vec2::new(5.0, 5.0))
            .line_to(Vec2::new(6.0, 5.0));
        let elements = path.to_bezpath().elements().to_vec();
        // move, 2 lines, close; move, line
        assert_eq!(elements.len(), 6);
        assert_eq!(elements[3], PathEl::ClosePath);
        assert_eq!(elements[4], PathEl::MoveTo(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_empty_path() {
        let path = Path::new();
        assert!(path.is_empty());
        assert!(path.to_bezpath().elements().is_empty());
    }
}
