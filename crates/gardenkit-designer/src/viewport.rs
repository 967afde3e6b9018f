//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between screen coordinates (viewport pixels) and world
//! coordinates (document space). Screen and world share axis directions:
//!
//! ```text
//! world  = (screen - pos) / scale
//! screen = world * scale + pos
//! ```
//!
//! Scale is always finite and within the configured limits; invalid inputs
//! leave the state untouched.

use std::fmt;

use gardenkit_core::constants::{
    EDITOR_MAX_SCALE, EDITOR_MIN_SCALE, FIT_PADDING, VIEWER_MAX_SCALE, ZOOM_STEP,
};
use gardenkit_core::{clamp, Point, Rect};
use gardenkit_settings::EditorConfig;

/// Keeps part of the plot on screen while panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraClamp {
    /// Plot bounds in world units.
    pub plot: Rect,
    /// Screen pixels of plot that must stay visible on each axis.
    pub margin: f64,
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
    clamp: Option<CameraClamp>,
}

impl Viewport {
    /// Creates an editor viewport with the default zoom limits.
    pub fn new(width: f64, height: f64) -> Self {
        let mut viewport = Self {
            scale: 1.0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min_scale: EDITOR_MIN_SCALE,
            max_scale: EDITOR_MAX_SCALE,
            zoom_step: ZOOM_STEP,
            clamp: None,
        };
        viewport.set_size(width, height);
        viewport
    }

    /// Creates an editor viewport using configured limits.
    pub fn from_config(width: f64, height: f64, config: &EditorConfig) -> Self {
        let mut viewport = Self::new(width, height);
        viewport.set_limits(config.zoom.min_scale, config.zoom.max_scale);
        if config.zoom.step.is_finite() && config.zoom.step > 1.0 {
            viewport.zoom_step = config.zoom.step;
        }
        viewport
    }

    /// Creates a read-only viewer viewport.
    ///
    /// The viewer cannot zoom out past the scale that fits `content`, and
    /// zooms in up to 6×.
    pub fn viewer(width: f64, height: f64, content: Rect) -> Self {
        let mut viewport = Self::new(width, height);
        viewport.set_limits(f64::MIN_POSITIVE, VIEWER_MAX_SCALE);
        viewport.fit_to_content(content, FIT_PADDING);
        let fit = viewport.scale;
        viewport.set_limits(fit, VIEWER_MAX_SCALE.max(fit));
        viewport
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Camera position (screen offset of the world origin).
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Sets the viewport size. Zero, negative or non-finite sizes are ignored.
    pub fn set_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
            self.apply_clamp();
        }
    }

    /// Sets the zoom limits and re-clamps the current scale.
    pub fn set_limits(&mut self, min_scale: f64, max_scale: f64) {
        if !(min_scale.is_finite() && max_scale.is_finite()) || min_scale <= 0.0 {
            return;
        }
        if min_scale > max_scale {
            return;
        }
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale = clamp(self.scale, min_scale, max_scale);
    }

    /// Enables or disables camera clamping.
    pub fn set_camera_clamp(&mut self, clamp: Option<CameraClamp>) {
        self.clamp = clamp;
        self.apply_clamp();
    }

    pub fn camera_clamp(&self) -> Option<CameraClamp> {
        self.clamp
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.scale, (screen.y - self.y) / self.scale)
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.x, world.y * self.scale + self.y)
    }

    /// World point at the center of the viewport.
    pub fn world_center(&self) -> Point {
        self.screen_to_world(Point::new(self.width / 2.0, self.height / 2.0))
    }

    /// Converts a screen length to world units.
    pub fn screen_len_to_world(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }

    /// Sets the scale keeping the world point under `anchor` (screen) fixed.
    pub fn zoom_to(&mut self, new_scale: f64, anchor: Point) {
        if !new_scale.is_finite() || !anchor.is_finite() {
            return;
        }
        let new_scale = clamp(new_scale, self.min_scale, self.max_scale);
        let world = self.screen_to_world(anchor);
        self.scale = new_scale;
        self.x = anchor.x - world.x * new_scale;
        self.y = anchor.y - world.y * new_scale;
        self.apply_clamp();
    }

    /// One wheel tick at `anchor`: positive `direction` zooms in.
    pub fn wheel_zoom(&mut self, direction: f64, anchor: Point) {
        if direction == 0.0 || !direction.is_finite() {
            return;
        }
        let factor = if direction > 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        self.zoom_to(self.scale * factor, anchor);
    }

    /// Pans by a screen-space drag delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.x += dx;
        self.y += dy;
        self.apply_clamp();
    }

    /// Sets the camera position directly.
    pub fn set_position(&mut self, position: Point) {
        if position.is_finite() {
            self.x = position.x;
            self.y = position.y;
            self.apply_clamp();
        }
    }

    /// Fits `content` into the viewport minus `padding` screen pixels per
    /// side, then centers it.
    pub fn fit_to_content(&mut self, content: Rect, padding: f64) {
        if !self.has_area() || content.is_empty() {
            return;
        }
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let avail_w = (self.width - 2.0 * padding).max(1.0);
        let avail_h = (self.height - 2.0 * padding).max(1.0);
        let fit = (avail_w / content.w).min(avail_h / content.h);
        if !fit.is_finite() {
            return;
        }
        self.scale = clamp(fit, self.min_scale, self.max_scale);
        self.center_on(content.center());
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world: Point) {
        if !world.is_finite() {
            return;
        }
        self.x = self.width / 2.0 - world.x * self.scale;
        self.y = self.height / 2.0 - world.y * self.scale;
        self.apply_clamp();
    }

    fn apply_clamp(&mut self) {
        let Some(CameraClamp { plot, margin }) = self.clamp else {
            return;
        };
        if !self.has_area() {
            return;
        }
        // At least `margin` px of plot (or all of it, if smaller) stays on screen.
        let keep_w = margin.min(plot.w * self.scale).max(0.0);
        let keep_h = margin.min(plot.h * self.scale).max(0.0);
        let min_x = keep_w - (plot.x + plot.w) * self.scale;
        let max_x = self.width - keep_w - plot.x * self.scale;
        let min_y = keep_h - (plot.y + plot.h) * self.scale;
        let max_y = self.height - keep_h - plot.y * self.scale;
        if min_x <= max_x {
            self.x = clamp(self.x, min_x, max_x);
        }
        if min_y <= max_y {
            self.y = clamp(self.y, min_y, max_y);
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.scale, self.x, self.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
