//! GardenKit Settings Crate
//!
//! Editor view preferences: zoom limits, camera clamping, grid snapping,
//! handle hit radii, history and persistence tuning. None of this is
//! document state; it is never written into a layout.

pub mod config;
pub mod error;

pub use config::{CameraSettings, EditorConfig, GridSettings, HandleSettings, ZoomSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
