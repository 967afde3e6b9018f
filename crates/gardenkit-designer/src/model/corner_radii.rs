use lyon::math::point;
use lyon::path::builder::BorderRadii;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::ShapeOutline;

/// Corner of an item's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Tl,
    Tr,
    Br,
    Bl,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Tl, Corner::Tr, Corner::Br, Corner::Bl];

    /// Sign of the local axes pointing from the opposite corner to this one.
    pub fn signs(&self) -> (f64, f64) {
        match self {
            Corner::Br => (1.0, 1.0),
            Corner::Tr => (1.0, -1.0),
            Corner::Bl => (-1.0, 1.0),
            Corner::Tl => (-1.0, -1.0),
        }
    }

    pub fn opposite(&self) -> Corner {
        match self {
            Corner::Tl => Corner::Br,
            Corner::Tr => Corner::Bl,
            Corner::Br => Corner::Tl,
            Corner::Bl => Corner::Tr,
        }
    }

    /// Position of the corner as a fraction of the box (`0` or `1` per axis).
    pub fn unit(&self) -> (f64, f64) {
        match self {
            Corner::Tl => (0.0, 0.0),
            Corner::Tr => (1.0, 0.0),
            Corner::Br => (1.0, 1.0),
            Corner::Bl => (0.0, 1.0),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Corner::Tl => 0,
            Corner::Tr => 1,
            Corner::Br => 2,
            Corner::Bl => 3,
        }
    }
}

/// Rounded rectangle: one shared radius or one per corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum CornerRadii {
    Uniform { radius: f64 },
    PerCorner { tl: f64, tr: f64, br: f64, bl: f64 },
}

impl CornerRadii {
    /// Largest radius that fits a `w × h` box.
    pub fn max_radius(w: f64, h: f64) -> f64 {
        (w.min(h) / 2.0).max(0.0)
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, CornerRadii::Uniform { .. })
    }

    /// Radius of one corner, unclamped.
    pub fn radius(&self, corner: Corner) -> f64 {
        match *self {
            CornerRadii::Uniform { radius } => radius,
            CornerRadii::PerCorner { tl, tr, br, bl } => match corner {
                Corner::Tl => tl,
                Corner::Tr => tr,
                Corner::Br => br,
                Corner::Bl => bl,
            },
        }
    }

    /// Radii clamped to what fits `w × h`, in `tl, tr, br, bl` order.
    pub fn clamped(&self, w: f64, h: f64) -> [f64; 4] {
        let max = Self::max_radius(w, h);
        Corner::ALL.map(|c| {
            let r = self.radius(c);
            if r.is_finite() {
                r.clamp(0.0, max)
            } else {
                0.0
            }
        })
    }

    /// Sets the radius of `corner`, or of all corners when uniform.
    pub fn set_radius(&mut self, corner: Corner, value: f64, w: f64, h: f64) {
        let value = if value.is_finite() {
            value.clamp(0.0, Self::max_radius(w, h))
        } else {
            0.0
        };
        match self {
            CornerRadii::Uniform { radius } => *radius = value,
            CornerRadii::PerCorner { tl, tr, br, bl } => match corner {
                Corner::Tl => *tl = value,
                Corner::Tr => *tr = value,
                Corner::Br => *br = value,
                Corner::Bl => *bl = value,
            },
        }
    }

    /// Switches between uniform and per-corner radii.
    ///
    /// Expanding copies the shared radius to every corner; collapsing uses
    /// the arithmetic mean of the four.
    pub fn toggle_uniform(&self) -> CornerRadii {
        match *self {
            CornerRadii::Uniform { radius } => CornerRadii::PerCorner {
                tl: radius,
                tr: radius,
                br: radius,
                bl: radius,
            },
            CornerRadii::PerCorner { tl, tr, br, bl } => CornerRadii::Uniform {
                radius: (tl + tr + br + bl) / 4.0,
            },
        }
    }
}

impl ShapeOutline for CornerRadii {
    fn render(&self, w: f64, h: f64) -> Path {
        let [tl, tr, br, bl] = self.clamped(w, h);
        let mut builder = Path::builder();
        builder.add_rounded_rectangle(
            &lyon::math::Box2D::new(point(0.0, 0.0), point(w.max(0.0) as f32, h.max(0.0) as f32)),
            &BorderRadii {
                top_left: tl as f32,
                top_right: tr as f32,
                bottom_right: br as f32,
                bottom_left: bl as f32,
            },
            lyon::path::Winding::Positive,
        );
        builder.build()
    }

    fn marker_count(&self) -> usize {
        4
    }
}
