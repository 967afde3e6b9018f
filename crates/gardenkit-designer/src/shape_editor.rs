//! Point, handle and corner-radius editing for one item's shape path.
//!
//! A [`ShapeEditSession`] owns a draft copy of the item's shape. Drags and
//! double-clicks mutate only the draft; [`ShapeEditSession::commit`] hands
//! back the final shape for the store to write as a single patch, and
//! [`ShapeEditSession::cancel`] drops it.

use gardenkit_core::Point;

use crate::model::{BezierHandle, Corner, ItemId, ShapeMode, ShapePath, StudioItem};

/// Something on the edit overlay that can be grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeTarget {
    /// Radius handle near a corner of a rounded rectangle.
    CornerRadius(Corner),
    /// Polygon or curvature point.
    Point(usize),
    /// Bezier anchor or one of its control handles.
    Bezier(usize, BezierHandle),
}

/// One overlay marker in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub target: ShapeTarget,
    pub world: Point,
    /// Edge length in world units; constant on screen at any zoom.
    pub size: f64,
    /// Curvature corner flag, drawn as a square marker.
    pub sharp: bool,
}

/// Marker edge length in world units for a given zoom.
pub fn marker_world_size(marker_px: f64, scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        marker_px / scale
    } else {
        marker_px
    }
}

/// Draft shape edit of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEditSession {
    item: StudioItem,
    draft: Option<ShapePath>,
    drag: Option<ShapeTarget>,
}

impl ShapeEditSession {
    /// Starts editing `item`. Returns `None` for locked items.
    pub fn begin(item: &StudioItem) -> Option<Self> {
        if item.is_locked() {
            return None;
        }
        Some(Self {
            item: item.clone(),
            draft: item.meta.shape.clone(),
            drag: None,
        })
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    pub fn draft(&self) -> Option<&ShapePath> {
        self.draft.as_ref()
    }

    pub fn mode(&self) -> ShapeMode {
        self.draft
            .as_ref()
            .map(ShapePath::mode)
            .unwrap_or(ShapeMode::Rect)
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.item.meta.shape
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Replaces the draft with a fresh encoding of `mode`.
    ///
    /// Point data is not carried across modes. Switching into corner radii
    /// seeds the uniform radius from the item's style.
    pub fn set_mode(&mut self, mode: ShapeMode) {
        if mode == self.mode() {
            return;
        }
        self.drag = None;
        self.draft = ShapePath::default_for(mode, self.item.style.corner_radius);
    }

    /// Overlay markers for the current draft, handles after their anchors.
    pub fn markers(&self, scale: f64, marker_px: f64) -> Vec<Marker> {
        let size = marker_world_size(marker_px, scale);
        let marker = |target, local: Point, sharp| Marker {
            target,
            world: self.item.local_to_world(local),
            size,
            sharp,
        };
        let (w, h) = (self.item.w, self.item.h);

        match &self.draft {
            None => Vec::new(),
            Some(ShapePath::CornerRadii(radii)) => {
                let clamped = radii.clamped(w, h);
                Corner::ALL
                    .iter()
                    .map(|&corner| {
                        let local = radius_handle(corner, clamped[corner.index()], w, h);
                        marker(ShapeTarget::CornerRadius(corner), local, false)
                    })
                    .collect()
            }
            Some(ShapePath::Polygon(polygon)) => polygon
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| marker(ShapeTarget::Point(i), self.to_local(*p), false))
                .collect(),
            Some(ShapePath::Curvature(curve)) => curve
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| marker(ShapeTarget::Point(i), self.to_local(p.pos()), p.corner))
                .collect(),
            Some(ShapePath::Bezier(bezier)) => {
                let mut markers = Vec::new();
                for (i, p) in bezier.points.iter().enumerate() {
                    markers.push(marker(
                        ShapeTarget::Bezier(i, BezierHandle::Anchor),
                        self.to_local(p.pos()),
                        false,
                    ));
                    if let Some(hin) = p.handle_in {
                        markers.push(marker(
                            ShapeTarget::Bezier(i, BezierHandle::In),
                            self.to_local(hin),
                            false,
                        ));
                    }
                    if let Some(hout) = p.handle_out {
                        markers.push(marker(
                            ShapeTarget::Bezier(i, BezierHandle::Out),
                            self.to_local(hout),
                            false,
                        ));
                    }
                }
                markers
            }
        }
    }

    /// Marker under `pointer`; handles drawn last win.
    pub fn hit(&self, pointer: Point, scale: f64, marker_px: f64) -> Option<ShapeTarget> {
        self.markers(scale, marker_px)
            .into_iter()
            .rev()
            .find(|m| m.world.distance_to(&pointer) <= m.size)
            .map(|m| m.target)
    }

    /// Grabs a marker. Refused while another drag is active.
    pub fn begin_drag(&mut self, target: ShapeTarget) -> bool {
        if self.drag.is_some() || self.draft.is_none() {
            return false;
        }
        self.drag = Some(target);
        true
    }

    /// Moves the grabbed marker to `pointer` (world space).
    pub fn drag_to(&mut self, pointer: Point) {
        if !pointer.is_finite() {
            return;
        }
        let Some(target) = self.drag else {
            return;
        };
        let local = self.item.world_to_local(pointer);
        let unit = self.to_unit(local);
        let (w, h) = (self.item.w, self.item.h);

        match (&mut self.draft, target) {
            (Some(ShapePath::CornerRadii(radii)), ShapeTarget::CornerRadius(corner)) => {
                radii.set_radius(corner, radius_from_pointer(corner, local, w, h), w, h);
            }
            (Some(ShapePath::Polygon(polygon)), ShapeTarget::Point(i)) => {
                polygon.move_point(i, unit);
            }
            (Some(ShapePath::Curvature(curve)), ShapeTarget::Point(i)) => {
                curve.move_point(i, unit);
            }
            (Some(ShapePath::Bezier(bezier)), ShapeTarget::Bezier(i, part)) => {
                bezier.move_part(i, part, unit);
            }
            _ => {}
        }
    }

    /// Releases the grabbed marker. The draft keeps the result.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Double-click on a marker.
    ///
    /// Rounded rectangles toggle uniform and per-corner radii, bezier points
    /// toggle their default handles, curvature points toggle their corner
    /// flag and polygon points split the following edge.
    pub fn double_click(&mut self, target: ShapeTarget) {
        match (&mut self.draft, target) {
            (Some(ShapePath::CornerRadii(radii)), ShapeTarget::CornerRadius(_)) => {
                *radii = radii.toggle_uniform();
            }
            (Some(ShapePath::Bezier(bezier)), ShapeTarget::Bezier(i, _)) => {
                bezier.toggle_handles(i);
            }
            (Some(ShapePath::Curvature(curve)), ShapeTarget::Point(i)) => {
                curve.toggle_corner(i);
            }
            (Some(ShapePath::Polygon(polygon)), ShapeTarget::Point(i)) => {
                polygon.split_edge(i);
            }
            _ => {}
        }
    }

    /// Removes a point from a polygon, curvature or bezier draft.
    pub fn remove_point(&mut self, index: usize) {
        match &mut self.draft {
            Some(ShapePath::Polygon(polygon)) => polygon.remove_point(index),
            Some(ShapePath::Curvature(curve)) => {
                if index < curve.points.len() && curve.points.len() > 3 {
                    curve.points.remove(index);
                }
            }
            Some(ShapePath::Bezier(bezier)) => bezier.remove_point(index),
            _ => {}
        }
    }

    pub fn set_tension(&mut self, tension: f64) {
        if let Some(ShapePath::Curvature(curve)) = &mut self.draft {
            curve.set_tension(if tension.is_finite() { tension } else { 0.0 });
        }
    }

    pub fn set_closed(&mut self, closed: bool) {
        match &mut self.draft {
            Some(ShapePath::Polygon(p)) => p.closed = closed,
            Some(ShapePath::Curvature(p)) => p.closed = closed,
            Some(ShapePath::Bezier(p)) => p.closed = closed,
            _ => {}
        }
    }

    /// Finishes the session. Returns the shape to write, or `None` if the
    /// draft equals what the item already has.
    pub fn commit(self) -> Option<Option<ShapePath>> {
        if self.is_dirty() {
            Some(self.draft)
        } else {
            None
        }
    }

    /// Drops the draft. The item is untouched.
    pub fn cancel(self) -> ItemId {
        self.item.id
    }

    fn to_local(&self, unit: Point) -> Point {
        Point::new(unit.x * self.item.w, unit.y * self.item.h)
    }

    fn to_unit(&self, local: Point) -> Point {
        let w = self.item.w.max(f64::EPSILON);
        let h = self.item.h.max(f64::EPSILON);
        Point::new(local.x / w, local.y / h)
    }
}

/// Local position of a radius handle: inset from the corner by the radius
/// along both axes.
fn radius_handle(corner: Corner, radius: f64, w: f64, h: f64) -> Point {
    let (ux, uy) = corner.unit();
    let (sx, sy) = corner.signs();
    Point::new(ux * w - sx * radius, uy * h - sy * radius)
}

/// Radius implied by a pointer in local space: mean inward distance from
/// the corner along both axes.
fn radius_from_pointer(corner: Corner, local: Point, w: f64, h: f64) -> f64 {
    let (ux, uy) = corner.unit();
    let (sx, sy) = corner.signs();
    let dx = (local.x - ux * w) * -sx;
    let dy = (local.y - uy * h) * -sy;
    ((dx + dy) / 2.0).max(0.0)
}

/// Shape of `item` after a mode switch, for use outside an edit session.
pub fn shape_for_mode(item: &StudioItem, mode: ShapeMode) -> Option<ShapePath> {
    match (&item.meta.shape, mode) {
        (Some(current), mode) if current.mode() == mode => Some(current.clone()),
        _ => ShapePath::default_for(mode, item.style.corner_radius),
    }
}
