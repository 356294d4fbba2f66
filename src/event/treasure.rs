//! Treasure hunt over the map image: a compass pointing at the next hidden
//! decoration, and digs that uncover decorations in order.

use glam::Vec2;
use log::info;

/// A dig within this distance of the target finds it (image pixels)
pub const DIG_RADIUS_PX: f32 = 60.0;

/// Decoration placed on the map at percentage coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub id: &'static str,
    /// Offset from the image top, percent of image height
    pub top_pct: f32,
    /// Offset from the image left, percent of image width
    pub left_pct: f32,
    pub size_px: f32,
}

impl Decoration {
    /// Position inside an image of the given size (pixels)
    pub fn position(&self, image_size: Vec2) -> Vec2 {
        Vec2::new(
            self.left_pct / 100.0 * image_size.x,
            self.top_pct / 100.0 * image_size.y,
        )
    }
}

/// Hunt order
#[rustfmt::skip]
pub const DECORATIONS: [Decoration; 3] = [
    Decoration { id: "d1", top_pct: 20.0, left_pct: 20.0, size_px: 80.0 },
    Decoration { id: "d2", top_pct: 10.0, left_pct: 90.0, size_px: 90.0 },
    Decoration { id: "d3", top_pct: 75.0, left_pct: 48.0, size_px: 50.0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigOutcome {
    /// Hunt inactive or already complete
    Ignored,
    Miss,
    Found(&'static str),
    /// Last decoration found; the hunt ends
    Complete(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct TreasureHunt {
    active: bool,
    found: Vec<&'static str>,
    compass_deg: f32,
}

impl TreasureHunt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn found(&self) -> &[&'static str] {
        &self.found
    }

    pub fn is_complete(&self) -> bool {
        self.found.len() >= DECORATIONS.len()
    }

    /// Decoration the compass points at
    pub fn target(&self) -> Option<&'static Decoration> {
        DECORATIONS.get(self.found.len())
    }

    /// Compass needle rotation in degrees, 0 = up
    pub fn compass(&self) -> f32 {
        self.compass_deg
    }

    fn hunting(&self) -> Option<&'static Decoration> {
        if self.active {
            self.target()
        } else {
            None
        }
    }

    /// Point the compass from `cursor` towards the current target
    ///
    /// `cursor` is relative to the image's top-left corner. Returns the new
    /// bearing, or `None` when not hunting.
    pub fn track(&mut self, cursor: Vec2, image_size: Vec2) -> Option<f32> {
        let target = self.hunting()?;
        let d = target.position(image_size) - cursor;
        self.compass_deg = d.y.atan2(d.x).to_degrees() + 90.0;
        Some(self.compass_deg)
    }

    /// Dig at `cursor` (image-relative)
    pub fn dig(&mut self, cursor: Vec2, image_size: Vec2) -> DigOutcome {
        let Some(target) = self.hunting() else {
            return DigOutcome::Ignored;
        };
        if target.position(image_size).distance(cursor) >= DIG_RADIUS_PX {
            return DigOutcome::Miss;
        }

        self.found.push(target.id);
        if self.is_complete() {
            self.active = false;
            info!("Treasure hunt complete");
            DigOutcome::Complete(target.id)
        } else {
            DigOutcome::Found(target.id)
        }
    }
}
