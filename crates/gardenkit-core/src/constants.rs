//! Editor-wide constants.
//!
//! Values here are the defaults; view preferences that users may change
//! (zoom bounds, grid step, debounce) are also exposed through
//! `gardenkit-settings::EditorConfig`.

/// Minimum width/height of any item after a transform commit (world units).
pub const MIN_ITEM_SIZE: f64 = 24.0;

/// Default grid step used by snap-to-grid.
pub const DEFAULT_GRID_STEP: f64 = 20.0;

/// Maximum number of undo snapshots retained per layout.
pub const HISTORY_LIMIT: usize = 80;

/// Lower zoom bound in the editor.
pub const EDITOR_MIN_SCALE: f64 = 0.35;

/// Upper zoom bound in the editor.
pub const EDITOR_MAX_SCALE: f64 = 2.6;

/// Upper zoom bound in the read-only viewer.
pub const VIEWER_MAX_SCALE: f64 = 6.0;

/// Scale ratio applied per wheel tick.
pub const ZOOM_STEP: f64 = 1.04;

/// Padding (screen pixels) reserved around the plot by fit-to-content.
pub const FIT_PADDING: f64 = 40.0;

/// Margin (screen pixels) kept reachable when the camera is clamped.
pub const CAMERA_CLAMP_MARGIN: f64 = 120.0;

/// Persistence write debounce in milliseconds.
pub const PERSIST_DEBOUNCE_MS: u64 = 250;

/// Rotation snap increment (degrees) while the snap modifier is held.
pub const ROTATE_SNAP_DEG: f64 = 15.0;

/// Hit radius of a corner resize handle (screen pixels).
pub const HANDLE_RESIZE_RADIUS: f64 = 9.0;

/// Width of the rotate ring outside the resize radius (screen pixels).
pub const HANDLE_ROTATE_RING: f64 = 18.0;

/// On-screen size of shape editing markers (screen pixels).
pub const MARKER_SIZE: f64 = 8.0;

/// Default canvas (plot) size for a freshly seeded layout.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1600.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1000.0;

/// Persisted workspace format version. Bump only with a migration path.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Default Catmull-Rom tension for curvature paths.
pub const DEFAULT_TENSION: f64 = 0.5;
