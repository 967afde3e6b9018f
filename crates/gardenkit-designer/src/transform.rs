//! Corner handles for resize and rotate, and the live-preview sessions
//! that drive them.
//!
//! A session never touches the document. It keeps the items as they were
//! at pointer-down plus a preview copy that follows the pointer; the caller
//! renders the preview and, on pointer-up, commits the session's result as
//! one document patch. Cancelling simply drops the session.

use smallvec::SmallVec;

use gardenkit_core::constants::{
    HANDLE_RESIZE_RADIUS, HANDLE_ROTATE_RING, MIN_ITEM_SIZE, ROTATE_SNAP_DEG,
};
use gardenkit_core::{normalize_degrees, rotate_about, rotate_vector, snap_to_step, Point, Rect};
use gardenkit_settings::EditorConfig;

use crate::model::{Corner, ItemId, StudioItem};

/// Hit radii for corner handles, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    /// Pointer within this distance of a corner resizes.
    pub resize_radius_px: f64,
    /// Pointer beyond the resize radius but within this distance rotates.
    pub rotate_ring_px: f64,
    /// Rotation increment when snapping.
    pub rotate_snap_deg: f64,
}

impl Default for HandleGeometry {
    fn default() -> Self {
        Self {
            resize_radius_px: HANDLE_RESIZE_RADIUS,
            rotate_ring_px: HANDLE_ROTATE_RING,
            rotate_snap_deg: ROTATE_SNAP_DEG,
        }
    }
}

impl From<&EditorConfig> for HandleGeometry {
    fn from(config: &EditorConfig) -> Self {
        Self {
            resize_radius_px: config.handles.resize_radius_px,
            rotate_ring_px: config.handles.rotate_ring_px,
            rotate_snap_deg: config.handles.rotate_snap_deg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Resize,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    pub corner: Corner,
    pub kind: HandleKind,
}

/// The handles shown for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleSet {
    /// One item: handles sit on its rotated corners.
    Single { id: ItemId, corners: [Point; 4], rotatable: bool },
    /// Several items: one combined bounding box; per-item handles are hidden.
    Group { bounds: Rect, rotatable: bool },
}

impl HandleSet {
    /// Builds the handle set for `items`. Locked items get no handles.
    pub fn for_items(items: &[&StudioItem]) -> Option<HandleSet> {
        if items.is_empty() || items.iter().any(|i| i.is_locked()) {
            return None;
        }
        let rotatable = items.iter().all(|i| i.item_type.allows_rotation());
        if let [item] = items {
            return Some(HandleSet::Single {
                id: item.id.clone(),
                corners: item.world_corners(),
                rotatable,
            });
        }
        let rects: SmallVec<[Rect; 8]> = items.iter().map(|i| i.world_bounds()).collect();
        let bounds = gardenkit_core::bounds_of_rects(rects.iter())?;
        Some(HandleSet::Group { bounds, rotatable })
    }

    /// Handle positions in world space, `tl, tr, br, bl`.
    pub fn corners(&self) -> [Point; 4] {
        match self {
            HandleSet::Single { corners, .. } => *corners,
            HandleSet::Group { bounds, .. } => bounds.corners(),
        }
    }

    pub fn rotatable(&self) -> bool {
        match self {
            HandleSet::Single { rotatable, .. } | HandleSet::Group { rotatable, .. } => *rotatable,
        }
    }

    /// Finds the handle under `pointer` (world), measuring in screen pixels.
    pub fn hit(&self, pointer: Point, scale: f64, geometry: &HandleGeometry) -> Option<HandleHit> {
        let (index, distance) = self
            .corners()
            .iter()
            .map(|c| c.distance_to(&pointer) * scale)
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        let corner = Corner::ALL[index];
        if distance <= geometry.resize_radius_px {
            Some(HandleHit {
                corner,
                kind: HandleKind::Resize,
            })
        } else if distance <= geometry.rotate_ring_px && self.rotatable() {
            Some(HandleHit {
                corner,
                kind: HandleKind::Rotate,
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Move {
        start: Point,
    },
    Resize {
        corner: Corner,
        /// Opposite corner in world space; stays put.
        fixed: Point,
    },
    GroupResize {
        corner: Corner,
        fixed: Point,
        start: Rect,
    },
    Rotate {
        center: Point,
        start_angle: f64,
    },
}

/// Modifier state relevant to a transform update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformModifiers {
    /// Snap rotation to the configured increment.
    pub snap_rotation: bool,
}

/// A drag in progress on a handle set (or a body drag for moves).
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSession {
    gesture: Gesture,
    originals: SmallVec<[StudioItem; 1]>,
    preview: SmallVec<[StudioItem; 1]>,
    snap_deg: f64,
}

impl TransformSession {
    /// Starts a handle drag. Returns `None` for an empty or locked selection,
    /// or a rotate hit on items that cannot rotate.
    pub fn begin(
        items: &[&StudioItem],
        hit: HandleHit,
        pointer: Point,
        geometry: &HandleGeometry,
    ) -> Option<TransformSession> {
        let set = HandleSet::for_items(items)?;
        let gesture = match (hit.kind, &set) {
            (HandleKind::Rotate, set) if !set.rotatable() => return None,
            (HandleKind::Rotate, HandleSet::Single { .. }) => {
                let center = items[0].center();
                Gesture::Rotate {
                    center,
                    start_angle: (pointer - center).angle_deg(),
                }
            }
            (HandleKind::Rotate, HandleSet::Group { bounds, .. }) => {
                let center = bounds.center();
                Gesture::Rotate {
                    center,
                    start_angle: (pointer - center).angle_deg(),
                }
            }
            (HandleKind::Resize, HandleSet::Single { corners, .. }) => Gesture::Resize {
                corner: hit.corner,
                fixed: corners[hit.corner.opposite().index()],
            },
            (HandleKind::Resize, HandleSet::Group { bounds, .. }) => Gesture::GroupResize {
                corner: hit.corner,
                fixed: bounds.corners()[hit.corner.opposite().index()],
                start: *bounds,
            },
        };
        Some(Self::with_gesture(items, gesture, geometry))
    }

    /// Starts a body drag that translates every item.
    pub fn begin_move(items: &[&StudioItem], pointer: Point) -> Option<TransformSession> {
        let movable: SmallVec<[&StudioItem; 1]> =
            items.iter().copied().filter(|i| !i.is_locked()).collect();
        if movable.is_empty() {
            return None;
        }
        Some(Self::with_gesture(
            &movable,
            Gesture::Move { start: pointer },
            &HandleGeometry::default(),
        ))
    }

    fn with_gesture(items: &[&StudioItem], gesture: Gesture, geometry: &HandleGeometry) -> Self {
        let originals: SmallVec<[StudioItem; 1]> = items.iter().map(|i| (*i).clone()).collect();
        Self {
            gesture,
            preview: originals.clone(),
            originals,
            snap_deg: geometry.rotate_snap_deg,
        }
    }

    /// Items as they were at pointer-down.
    pub fn originals(&self) -> &[StudioItem] {
        &self.originals
    }

    /// Items as they should currently be drawn.
    pub fn preview(&self) -> &[StudioItem] {
        &self.preview
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self.gesture, Gesture::Rotate { .. })
    }

    /// Recomputes the preview for the current pointer position.
    pub fn update(&mut self, pointer: Point, modifiers: TransformModifiers) -> &[StudioItem] {
        if !pointer.is_finite() {
            return &self.preview;
        }
        match self.gesture.clone() {
            Gesture::Move { start } => {
                let delta = pointer - start;
                for (item, orig) in self.preview.iter_mut().zip(&self.originals) {
                    item.x = orig.x + delta.x;
                    item.y = orig.y + delta.y;
                }
            }
            Gesture::Resize { corner, fixed } => {
                if let (Some(item), Some(orig)) = (self.preview.first_mut(), self.originals.first()) {
                    *item = resize_single(orig, corner, fixed, pointer);
                }
            }
            Gesture::GroupResize {
                corner,
                fixed,
                start,
            } => {
                let target = group_target(corner, fixed, pointer);
                for (item, orig) in self.preview.iter_mut().zip(&self.originals) {
                    *item = scale_into(orig, &start, &target);
                }
            }
            Gesture::Rotate {
                center,
                start_angle,
            } => {
                let mut delta = (pointer - center).angle_deg() - start_angle;
                let single = self.originals.len() == 1;
                for (item, orig) in self.preview.iter_mut().zip(&self.originals) {
                    if single {
                        let mut r = orig.r + delta;
                        if modifiers.snap_rotation && self.snap_deg > 0.0 {
                            r = snap_to_step(r, self.snap_deg);
                        }
                        item.r = normalize_degrees(r);
                    } else {
                        if modifiers.snap_rotation && self.snap_deg > 0.0 {
                            delta = snap_to_step(delta, self.snap_deg);
                        }
                        let c = rotate_about(orig.center(), center, delta);
                        item.x = c.x - orig.w / 2.0;
                        item.y = c.y - orig.h / 2.0;
                        item.r = normalize_degrees(orig.r + delta);
                    }
                }
            }
        }
        &self.preview
    }

    /// Ends the drag, returning the items to write back.
    ///
    /// Sizes are floored at the minimum. With a grid step, moves and
    /// resizes round `x, y, w, h` to the nearest multiple first; rotations
    /// only change the angle and are written as previewed.
    pub fn commit(self, grid_step: Option<f64>) -> Vec<StudioItem> {
        let grid_step = grid_step.filter(|_| !self.is_rotation());
        self.preview
            .into_iter()
            .map(|mut item| {
                if let Some(step) = grid_step {
                    snap_item(&mut item, step);
                }
                item.clamp_size();
                item
            })
            .collect()
    }

    /// Abandons the drag; returns the untouched originals for the caller to
    /// restore its preview.
    pub fn cancel(self) -> Vec<StudioItem> {
        self.originals.into_vec()
    }
}

/// Corner resize of one item around its fixed opposite corner.
pub fn resize_single(orig: &StudioItem, corner: Corner, fixed: Point, pointer: Point) -> StudioItem {
    let (sx, sy) = corner.signs();
    let local = rotate_vector(pointer - fixed, -orig.r);
    let mut w = (sx * local.x).max(MIN_ITEM_SIZE);
    let mut h = (sy * local.y).max(MIN_ITEM_SIZE);
    if orig.item_type.locks_aspect() {
        let side = w.max(h);
        w = side;
        h = side;
    }
    let center = fixed + rotate_vector(Point::new(sx * w / 2.0, sy * h / 2.0), orig.r);
    let mut item = orig.clone();
    item.w = w;
    item.h = h;
    item.x = center.x - w / 2.0;
    item.y = center.y - h / 2.0;
    item
}

fn group_target(corner: Corner, fixed: Point, pointer: Point) -> Rect {
    let (sx, sy) = corner.signs();
    let w = (sx * (pointer.x - fixed.x)).max(MIN_ITEM_SIZE);
    let h = (sy * (pointer.y - fixed.y)).max(MIN_ITEM_SIZE);
    let x = if sx > 0.0 { fixed.x } else { fixed.x - w };
    let y = if sy > 0.0 { fixed.y } else { fixed.y - h };
    Rect::new(x, y, w, h)
}

fn scale_into(orig: &StudioItem, from: &Rect, to: &Rect) -> StudioItem {
    let kx = if from.w > 0.0 { to.w / from.w } else { 1.0 };
    let ky = if from.h > 0.0 { to.h / from.h } else { 1.0 };
    let c = orig.center();
    let center = Point::new(to.x + (c.x - from.x) * kx, to.y + (c.y - from.y) * ky);
    let (kw, kh) = if orig.item_type.locks_aspect() {
        let k = kx.min(ky);
        (k, k)
    } else {
        (kx, ky)
    };
    let mut item = orig.clone();
    item.w = (orig.w * kw).max(MIN_ITEM_SIZE);
    item.h = (orig.h * kh).max(MIN_ITEM_SIZE);
    item.x = center.x - item.w / 2.0;
    item.y = center.y - item.h / 2.0;
    item
}

/// Rounds `x, y, w, h` to the nearest multiple of `step`.
pub fn snap_item(item: &mut StudioItem, step: f64) {
    item.x = snap_to_step(item.x, step);
    item.y = snap_to_step(item.y, step);
    item.w = snap_to_step(item.w, step).max(MIN_ITEM_SIZE);
    item.h = snap_to_step(item.h, step).max(MIN_ITEM_SIZE);
}
