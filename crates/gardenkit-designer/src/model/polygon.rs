use lyon::path::Path;
use serde::{Deserialize, Serialize};

use gardenkit_core::{clamp, Point};

use super::shape_path::{denormalize, rect_outline};
use super::ShapeOutline;

/// Straight-edged outline through normalized `[0,1]²` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPath {
    pub points: Vec<Point>,
    #[serde(default = "default_closed")]
    pub closed: bool,
}

fn default_closed() -> bool {
    true
}

impl PolygonPath {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self {
            points: points.into_iter().map(clamp_unit).collect(),
            closed,
        }
    }

    /// The four corners of the box, clockwise from top-left.
    pub fn unit_box() -> Self {
        Self::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            true,
        )
    }

    /// Moves one point; out-of-range indices are ignored.
    pub fn move_point(&mut self, index: usize, to: Point) {
        if let Some(p) = self.points.get_mut(index) {
            *p = clamp_unit(to);
        }
    }

    /// Inserts a point at the midpoint of the edge starting at `index`.
    pub fn split_edge(&mut self, index: usize) {
        let n = self.points.len();
        if n < 2 || index >= n || (!self.closed && index == n - 1) {
            return;
        }
        let a = self.points[index];
        let b = self.points[(index + 1) % n];
        self.points.insert(index + 1, a.lerp(&b, 0.5));
    }

    /// Removes a point, keeping at least three on a closed polygon.
    pub fn remove_point(&mut self, index: usize) {
        let floor = if self.closed { 3 } else { 2 };
        if index < self.points.len() && self.points.len() > floor {
            self.points.remove(index);
        }
    }
}

pub(crate) fn clamp_unit(p: Point) -> Point {
    Point::new(clamp(p.x, 0.0, 1.0), clamp(p.y, 0.0, 1.0))
}

impl ShapeOutline for PolygonPath {
    fn render(&self, w: f64, h: f64) -> Path {
        if self.points.len() < 2 {
            return rect_outline(w, h, 0.0);
        }
        let mut builder = Path::builder();
        builder.begin(denormalize(self.points[0], w, h));
        for p in &self.points[1..] {
            builder.line_to(denormalize(*p, w, h));
        }
        builder.end(self.closed);
        builder.build()
    }

    fn marker_count(&self) -> usize {
        self.points.len()
    }
}
