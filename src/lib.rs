//! # GardenKit
//!
//! An interactive 2D garden layout designer: beds, zones, paths, structures,
//! labels and trees placed on a bounded plot, reshaped with freeform
//! silhouettes, arranged with corner resize/rotate handles, and saved per
//! tenant with undo/redo history.
//!
//! ## Architecture
//!
//! GardenKit is organized as a workspace with multiple crates:
//!
//! 1. **gardenkit-core** - Geometry, constants, errors, store event bus
//! 2. **gardenkit-settings** - Editor view preferences
//! 3. **gardenkit-designer** - Document model, editing engine, workspace store
//! 4. **gardenkit-communication** - Publish, plantings, autosave
//! 5. **gardenkit** - Binary that loads a tenant workspace and wires it up

pub use gardenkit_communication as communication;
pub use gardenkit_designer as designer;
pub use gardenkit_settings as settings;

pub use gardenkit_core::{
    Error, EventBus, EventCategory, EventFilter, PersistenceError, Point, PublishError, Rect,
    Result, StoreError, StoreEvent,
};

pub use gardenkit_designer::{
    map_key, EditorAction, ItemPatch, ItemType, JsonFileProvider, LayoutDoc, MemoryProvider,
    PersistenceProvider, ShapeMode, StudioItem, Viewport, WorkspaceData, WorkspaceStore,
};

pub use gardenkit_communication::{
    spawn_autosave, AutosaveHandle, PlantingSource, PlantingSync, PublishEndpoint, Publisher,
};

pub use gardenkit_settings::EditorConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
