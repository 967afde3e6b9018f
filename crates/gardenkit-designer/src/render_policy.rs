//! Bitmap cache policy for item rendering.
//!
//! The rendering layer owns its caches; this module only answers whether an
//! item is worth caching for the current view.

use crate::model::{ItemId, ShapeMode, StudioItem};

/// Largest cached bitmap, in screen pixels.
pub const MAX_CACHE_PIXELS: f64 = 2048.0 * 2048.0;

/// Below this on-screen area caching costs more than it saves.
pub const MIN_CACHE_PIXELS: f64 = 64.0;

/// Transient view facts the policy depends on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    /// Items under an active transform or shape edit.
    pub active: Vec<ItemId>,
    /// A zoom gesture is in progress; cached bitmaps would be resampled.
    pub zooming: bool,
}

impl ViewState {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|a| a == id)
    }
}

/// Whether `item` should be drawn from a cached bitmap.
///
/// Items that change every frame are never cached. Otherwise only items
/// with curved outlines or shadows are cached, within a bitmap size range.
pub fn should_cache(item: &StudioItem, view: &ViewState) -> bool {
    if view.zooming || view.is_active(&item.id) {
        return false;
    }
    if !(view.scale.is_finite() && view.scale > 0.0) {
        return false;
    }

    let expensive = item.style.shadow.is_some()
        || matches!(
            item.meta.shape.as_ref().map(|s| s.mode()),
            Some(ShapeMode::Curvature | ShapeMode::Bezier)
        );
    if !expensive {
        return false;
    }

    let bounds = item.world_bounds();
    let pixels = bounds.w * bounds.h * view.scale * view.scale;
    (MIN_CACHE_PIXELS..=MAX_CACHE_PIXELS).contains(&pixels)
}
