use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use gardenkit_core::Point;

use super::{BezierPath, CornerRadii, CurvaturePath, PolygonPath};

/// Renders a silhouette inside an item's local `[0,w]×[0,h]` box.
pub trait ShapeOutline {
    /// Builds the outline. Encodings with too few points fall back to the
    /// plain box so an item never disappears.
    fn render(&self, w: f64, h: f64) -> Path;

    /// Number of editable markers (points or corners).
    fn marker_count(&self) -> usize;
}

/// Which silhouette encoding an item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeMode {
    Rect,
    CornerRadii,
    Polygon,
    Curvature,
    Bezier,
}

/// The four mutually exclusive silhouette encodings.
///
/// Being an enum, setting one mode necessarily drops the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapePath {
    CornerRadii(CornerRadii),
    Polygon(PolygonPath),
    Curvature(CurvaturePath),
    Bezier(BezierPath),
}

impl ShapePath {
    pub fn mode(&self) -> ShapeMode {
        match self {
            ShapePath::CornerRadii(_) => ShapeMode::CornerRadii,
            ShapePath::Polygon(_) => ShapeMode::Polygon,
            ShapePath::Curvature(_) => ShapeMode::Curvature,
            ShapePath::Bezier(_) => ShapeMode::Bezier,
        }
    }

    /// Starting encoding for a mode switch.
    ///
    /// Point data is not translated between encodings; a fresh mode starts
    /// from the item's box. `uniform_radius` seeds the corner radii mode.
    pub fn default_for(mode: ShapeMode, uniform_radius: f64) -> Option<ShapePath> {
        match mode {
            ShapeMode::Rect => None,
            ShapeMode::CornerRadii => Some(ShapePath::CornerRadii(CornerRadii::Uniform {
                radius: uniform_radius.max(0.0),
            })),
            ShapeMode::Polygon => Some(ShapePath::Polygon(PolygonPath::unit_box())),
            ShapeMode::Curvature => Some(ShapePath::Curvature(CurvaturePath::unit_box())),
            ShapeMode::Bezier => Some(ShapePath::Bezier(BezierPath::unit_box())),
        }
    }

    fn outline(&self) -> &dyn ShapeOutline {
        match self {
            ShapePath::CornerRadii(s) => s,
            ShapePath::Polygon(s) => s,
            ShapePath::Curvature(s) => s,
            ShapePath::Bezier(s) => s,
        }
    }

    pub fn render(&self, w: f64, h: f64) -> Path {
        self.outline().render(w, h)
    }

    pub fn marker_count(&self) -> usize {
        self.outline().marker_count()
    }
}

/// Plain box with a uniform radius, used when no shape path is set.
pub fn rect_outline(w: f64, h: f64, radius: f64) -> Path {
    let w = w.max(0.0);
    let h = h.max(0.0);
    let radius = radius.clamp(0.0, w.min(h) / 2.0);
    let mut builder = Path::builder();
    let rect = lyon::math::Box2D::new(point(0.0, 0.0), point(w as f32, h as f32));
    if radius > 0.0 {
        builder.add_rounded_rectangle(
            &rect,
            &lyon::path::builder::BorderRadii::new(radius as f32),
            lyon::path::Winding::Positive,
        );
    } else {
        builder.add_rectangle(&rect, lyon::path::Winding::Positive);
    }
    builder.build()
}

/// Outline of an optional shape path, falling back to the rounded box.
pub fn outline_for(shape: Option<&ShapePath>, w: f64, h: f64, radius: f64) -> Path {
    match shape {
        Some(shape) => shape.render(w, h),
        None => rect_outline(w, h, radius),
    }
}

/// Flattens a path into polylines, one per sub-path.
pub fn sample_path(path: &Path, tolerance: f32) -> Vec<Vec<Point>> {
    let mut polylines = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for event in path.iter().flattened(tolerance.max(0.001)) {
        match event {
            lyon::path::Event::Begin { at } => {
                current = vec![Point::new(at.x as f64, at.y as f64)];
            }
            lyon::path::Event::Line { to, .. } => {
                current.push(Point::new(to.x as f64, to.y as f64));
            }
            lyon::path::Event::End { first, close, .. } => {
                if close {
                    current.push(Point::new(first.x as f64, first.y as f64));
                }
                if !current.is_empty() {
                    polylines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }
    polylines
}

/// Maps a normalized `[0,1]²` point into the local box.
pub(crate) fn denormalize(p: Point, w: f64, h: f64) -> lyon::math::Point {
    point((p.x * w) as f32, (p.y * h) as f32)
}
