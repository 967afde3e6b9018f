//! Editor configuration for GardenKit
//!
//! Provides configuration file handling and validation for the editor's
//! view preferences. Supports JSON and TOML file formats stored in the
//! platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Zoom limits and wheel step
//! - Camera clamping
//! - Grid snapping
//! - Transform/shape handle sizes

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use gardenkit_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gardenkit";
const CONFIG_FILE: &str = "editor.toml";

/// Zoom preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Smallest editor scale
    pub min_scale: f64,
    /// Largest editor scale
    pub max_scale: f64,
    /// Scale ratio applied per wheel tick
    pub step: f64,
    /// Largest scale in the read-only viewer
    pub viewer_max_scale: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_scale: constants::EDITOR_MIN_SCALE,
            max_scale: constants::EDITOR_MAX_SCALE,
            step: constants::ZOOM_STEP,
            viewer_max_scale: constants::VIEWER_MAX_SCALE,
        }
    }
}

/// Camera preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Keep the plot reachable while panning
    pub clamp_enabled: bool,
    /// Screen pixels of plot that must stay visible when clamped
    pub clamp_margin: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            clamp_enabled: false,
            clamp_margin: constants::CAMERA_CLAMP_MARGIN,
        }
    }
}

/// Grid preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Snap committed geometry to the grid
    pub snap_enabled: bool,
    /// Grid step in world units
    pub step: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            snap_enabled: false,
            step: constants::DEFAULT_GRID_STEP,
        }
    }
}

/// Handle sizes, in screen pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleSettings {
    pub resize_radius_px: f64,
    /// Outer edge of the rotate ring; must exceed the resize radius
    pub rotate_ring_px: f64,
    pub rotate_snap_deg: f64,
    pub marker_size_px: f64,
}

impl Default for HandleSettings {
    fn default() -> Self {
        Self {
            resize_radius_px: constants::HANDLE_RESIZE_RADIUS,
            rotate_ring_px: constants::HANDLE_ROTATE_RING,
            rotate_snap_deg: constants::ROTATE_SNAP_DEG,
            marker_size_px: constants::MARKER_SIZE,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub zoom: ZoomSettings,
    pub camera: CameraSettings,
    pub grid: GridSettings,
    pub handles: HandleSettings,
    /// Undo depth per layout
    pub history_limit: usize,
    /// Persistence write debounce
    pub persist_debounce_ms: u64,
    /// Storage key for the workspace
    pub tenant: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomSettings::default(),
            camera: CameraSettings::default(),
            grid: GridSettings::default(),
            handles: HandleSettings::default(),
            history_limit: constants::HISTORY_LIMIT,
            persist_debounce_ms: constants::PERSIST_DEBOUNCE_MS,
            tenant: "default".to_string(),
        }
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/gardenkit/editor.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| SettingsError::ConfigDirectory("no platform config dir".to_string()))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::debug!("No editor config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let zoom = &self.zoom;
        if !(zoom.min_scale.is_finite() && zoom.min_scale > 0.0) {
            return Err(ConfigError::out_of_range("zoom.min_scale", zoom.min_scale));
        }
        if !(zoom.max_scale.is_finite() && zoom.max_scale >= zoom.min_scale) {
            return Err(ConfigError::out_of_range("zoom.max_scale", zoom.max_scale));
        }
        if !(zoom.step.is_finite() && zoom.step > 1.0) {
            return Err(ConfigError::out_of_range("zoom.step", zoom.step));
        }
        if !(zoom.viewer_max_scale.is_finite() && zoom.viewer_max_scale > 0.0) {
            return Err(ConfigError::out_of_range(
                "zoom.viewer_max_scale",
                zoom.viewer_max_scale,
            ));
        }

        if !(self.camera.clamp_margin.is_finite() && self.camera.clamp_margin >= 0.0) {
            return Err(ConfigError::out_of_range(
                "camera.clamp_margin",
                self.camera.clamp_margin,
            ));
        }

        if !(self.grid.step.is_finite() && self.grid.step > 0.0) {
            return Err(ConfigError::out_of_range("grid.step", self.grid.step));
        }

        let handles = &self.handles;
        if !(handles.resize_radius_px.is_finite() && handles.resize_radius_px > 0.0) {
            return Err(ConfigError::out_of_range(
                "handles.resize_radius_px",
                handles.resize_radius_px,
            ));
        }
        if !(handles.rotate_ring_px.is_finite()
            && handles.rotate_ring_px > handles.resize_radius_px)
        {
            return Err(ConfigError::out_of_range(
                "handles.rotate_ring_px",
                handles.rotate_ring_px,
            ));
        }
        if !(handles.rotate_snap_deg.is_finite() && handles.rotate_snap_deg > 0.0) {
            return Err(ConfigError::out_of_range(
                "handles.rotate_snap_deg",
                handles.rotate_snap_deg,
            ));
        }
        if !(handles.marker_size_px.is_finite() && handles.marker_size_px > 0.0) {
            return Err(ConfigError::out_of_range(
                "handles.marker_size_px",
                handles.marker_size_px,
            ));
        }

        if self.history_limit == 0 {
            return Err(ConfigError::out_of_range("history_limit", self.history_limit));
        }
        if self.tenant.trim().is_empty() {
            return Err(ConfigError::out_of_range("tenant", "<empty>"));
        }
        Ok(())
    }

    /// Merge another config into this one, taking only sections that
    /// differ from their defaults
    pub fn merge(&mut self, other: &EditorConfig) {
        if other.zoom != ZoomSettings::default() {
            self.zoom = other.zoom.clone();
        }
        if other.camera != CameraSettings::default() {
            self.camera = other.camera.clone();
        }
        if other.grid != GridSettings::default() {
            self.grid = other.grid.clone();
        }
        if other.handles != HandleSettings::default() {
            self.handles = other.handles.clone();
        }
        if other.history_limit != constants::HISTORY_LIMIT {
            self.history_limit = other.history_limit;
        }
        if other.persist_debounce_ms != constants::PERSIST_DEBOUNCE_MS {
            self.persist_debounce_ms = other.persist_debounce_ms;
        }
        if other.tenant != "default" {
            self.tenant = other.tenant.clone();
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
