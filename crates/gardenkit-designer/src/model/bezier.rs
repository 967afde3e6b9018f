use lyon::path::Path;
use serde::{Deserialize, Serialize};

use gardenkit_core::Point;

use super::polygon::clamp_unit;
use super::shape_path::{denormalize, rect_outline};
use super::ShapeOutline;

/// Fraction of the neighbour distance used for default handles.
const DEFAULT_HANDLE_RATIO: f64 = 0.25;

/// A bezier anchor with optional control handles, all normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub handle_in: Option<Point>,
    #[serde(rename = "out", default, skip_serializing_if = "Option::is_none")]
    pub handle_out: Option<Point>,
}

impl BezierPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            handle_in: None,
            handle_out: None,
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn has_handles(&self) -> bool {
        self.handle_in.is_some() || self.handle_out.is_some()
    }
}

/// Which part of a bezier point is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BezierHandle {
    Anchor,
    In,
    Out,
}

/// Explicit cubic outline; segments without handles are straight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierPath {
    pub points: Vec<BezierPoint>,
    #[serde(default = "default_closed")]
    pub closed: bool,
}

fn default_closed() -> bool {
    true
}

impl BezierPath {
    pub fn unit_box() -> Self {
        Self {
            points: vec![
                BezierPoint::new(0.0, 0.0),
                BezierPoint::new(1.0, 0.0),
                BezierPoint::new(1.0, 1.0),
                BezierPoint::new(0.0, 1.0),
            ],
            closed: true,
        }
    }

    /// Drags an anchor (carrying its handles along) or one of its handles.
    pub fn move_part(&mut self, index: usize, part: BezierHandle, to: Point) {
        let Some(p) = self.points.get_mut(index) else {
            return;
        };
        let to = clamp_unit(to);
        match part {
            BezierHandle::Anchor => {
                let delta = to - p.pos();
                p.x = to.x;
                p.y = to.y;
                p.handle_in = p.handle_in.map(|h| clamp_unit(h + delta));
                p.handle_out = p.handle_out.map(|h| clamp_unit(h + delta));
            }
            BezierHandle::In => p.handle_in = Some(to),
            BezierHandle::Out => p.handle_out = Some(to),
        }
    }

    /// Double-click behaviour: removes both handles if any exist, otherwise
    /// adds symmetric handles along the neighbour direction.
    pub fn toggle_handles(&mut self, index: usize) {
        let n = self.points.len();
        if index >= n {
            return;
        }
        if self.points[index].has_handles() {
            self.points[index].handle_in = None;
            self.points[index].handle_out = None;
            return;
        }

        let here = self.points[index].pos();
        let prev = self.neighbour(index, -1).unwrap_or(here);
        let next = self.neighbour(index, 1).unwrap_or(here);
        let mut dir = next - prev;
        if dir.length() < 1e-9 {
            dir = Point::new(1.0, 0.0);
        }
        let span = (here.distance_to(&prev) + here.distance_to(&next)) / 2.0;
        let len = (span * DEFAULT_HANDLE_RATIO).max(0.05);
        let offset = dir * (len / dir.length());

        let p = &mut self.points[index];
        p.handle_in = Some(clamp_unit(here - offset));
        p.handle_out = Some(clamp_unit(here + offset));
    }

    fn neighbour(&self, index: usize, step: isize) -> Option<Point> {
        let n = self.points.len() as isize;
        let i = index as isize + step;
        if self.closed {
            Some(self.points[i.rem_euclid(n) as usize].pos())
        } else if (0..n).contains(&i) {
            Some(self.points[i as usize].pos())
        } else {
            None
        }
    }

    pub fn insert_point(&mut self, index: usize, at: Point) {
        let index = index.min(self.points.len());
        let at = clamp_unit(at);
        self.points.insert(index, BezierPoint::new(at.x, at.y));
    }

    pub fn remove_point(&mut self, index: usize) {
        if index < self.points.len() && self.points.len() > 2 {
            self.points.remove(index);
        }
    }
}

impl ShapeOutline for BezierPath {
    fn render(&self, w: f64, h: f64) -> Path {
        let n = self.points.len();
        if n < 2 {
            return rect_outline(w, h, 0.0);
        }
        let segments = if self.closed { n } else { n - 1 };
        let mut builder = Path::builder();
        builder.begin(denormalize(self.points[0].pos(), w, h));
        for i in 0..segments {
            let from = &self.points[i];
            let to = &self.points[(i + 1) % n];
            if from.handle_out.is_some() || to.handle_in.is_some() {
                let c1 = from.handle_out.unwrap_or(from.pos());
                let c2 = to.handle_in.unwrap_or(to.pos());
                builder.cubic_bezier_to(
                    denormalize(c1, w, h),
                    denormalize(c2, w, h),
                    denormalize(to.pos(), w, h),
                );
            } else if i + 1 < n {
                builder.line_to(denormalize(to.pos(), w, h));
            }
            // a straight closing edge comes from `end(true)`
        }
        builder.end(self.closed);
        builder.build()
    }

    fn marker_count(&self) -> usize {
        self.points.len()
    }
}
