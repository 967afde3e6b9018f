use lyon::path::Path;
use serde::{Deserialize, Serialize};

use gardenkit_core::constants::DEFAULT_TENSION;
use gardenkit_core::{clamp, Point};

use super::polygon::clamp_unit;
use super::shape_path::{denormalize, rect_outline};
use super::ShapeOutline;

/// A spline point; `corner` makes the curve pass through it sharply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub corner: bool,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            corner: false,
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Smooth outline through normalized points using Catmull-Rom derived
/// cubic segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvaturePath {
    pub points: Vec<CurvePoint>,
    #[serde(default = "default_closed")]
    pub closed: bool,
    /// Tangent scale: `0` gives straight edges, `0.5` is classic Catmull-Rom.
    #[serde(default = "default_tension")]
    pub tension: f64,
}

fn default_closed() -> bool {
    true
}

fn default_tension() -> f64 {
    DEFAULT_TENSION
}

impl CurvaturePath {
    /// A rounded blob through the four edge midpoints.
    pub fn unit_box() -> Self {
        Self {
            points: vec![
                CurvePoint::new(0.5, 0.0),
                CurvePoint::new(1.0, 0.5),
                CurvePoint::new(0.5, 1.0),
                CurvePoint::new(0.0, 0.5),
            ],
            closed: true,
            tension: DEFAULT_TENSION,
        }
    }

    pub fn move_point(&mut self, index: usize, to: Point) {
        if let Some(p) = self.points.get_mut(index) {
            let to = clamp_unit(to);
            p.x = to.x;
            p.y = to.y;
        }
    }

    pub fn toggle_corner(&mut self, index: usize) {
        if let Some(p) = self.points.get_mut(index) {
            p.corner = !p.corner;
        }
    }

    pub fn set_tension(&mut self, tension: f64) {
        self.tension = clamp(tension, 0.0, 1.0);
    }

    /// Cubic control points for the segment starting at `index`, in
    /// normalized space. Returns `(c1, c2, end)`.
    pub fn segment_controls(&self, index: usize) -> Option<(Point, Point, Point)> {
        let n = self.points.len();
        let segments = if self.closed { n } else { n.saturating_sub(1) };
        if n < 2 || index >= segments {
            return None;
        }
        let at = |i: isize| -> CurvePoint {
            if self.closed {
                self.points[i.rem_euclid(n as isize) as usize]
            } else {
                self.points[i.clamp(0, n as isize - 1) as usize]
            }
        };
        let i = index as isize;
        let p0 = at(i - 1);
        let p1 = at(i);
        let p2 = at(i + 1);
        let p3 = at(i + 2);

        let t = clamp(self.tension, 0.0, 1.0);
        let c1 = if p1.corner {
            p1.pos()
        } else {
            p1.pos() + (p2.pos() - p0.pos()) * (t / 3.0)
        };
        let c2 = if p2.corner {
            p2.pos()
        } else {
            p2.pos() - (p3.pos() - p1.pos()) * (t / 3.0)
        };
        Some((c1, c2, p2.pos()))
    }
}

impl ShapeOutline for CurvaturePath {
    fn render(&self, w: f64, h: f64) -> Path {
        if self.points.len() < 2 {
            return rect_outline(w, h, 0.0);
        }
        let mut builder = Path::builder();
        builder.begin(denormalize(self.points[0].pos(), w, h));
        let mut index = 0;
        while let Some((c1, c2, to)) = self.segment_controls(index) {
            builder.cubic_bezier_to(
                denormalize(c1, w, h),
                denormalize(c2, w, h),
                denormalize(to, w, h),
            );
            index += 1;
        }
        builder.end(self.closed);
        builder.build()
    }

    fn marker_count(&self) -> usize {
        self.points.len()
    }
}
