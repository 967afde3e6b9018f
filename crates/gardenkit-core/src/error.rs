//! Error handling for GardenKit
//!
//! Provides error types for every layer that can fail:
//! - Store errors (unknown garden/layout/item lookups)
//! - Persistence errors (storage I/O, corrupt or incompatible data)
//! - Publish errors (publish endpoint failures)
//! - Planting errors (planting data source failures)
//!
//! Geometry and transform code never fails; it clamps instead.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Workspace store error type
///
/// Raised by commands that reference gardens, layouts, or items by id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No garden with this id
    #[error("Unknown garden: {id}")]
    UnknownGarden {
        /// The garden id that was looked up.
        id: String,
    },

    /// No layout with this id
    #[error("Unknown layout: {id}")]
    UnknownLayout {
        /// The layout id that was looked up.
        id: String,
    },

    /// No item with this id in the active document
    #[error("Unknown item: {id}")]
    UnknownItem {
        /// The item id that was looked up.
        id: String,
    },

    /// A garden must keep at least one layout
    #[error("Garden {garden_id} must keep at least one layout")]
    LastLayout {
        /// The garden that would be left empty.
        garden_id: String,
    },

    /// The workspace must keep at least one garden
    #[error("Workspace must keep at least one garden")]
    LastGarden,
}

/// Persistence error type
///
/// Raised by persistence providers. Callers loading a workspace treat
/// any of these as "absent" and fall back to a freshly seeded store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or encode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored format version is not understood
    #[error("Unsupported store version {found} (expected <= {supported})")]
    UnsupportedVersion {
        /// The version found in storage.
        found: u32,
        /// The newest version this build reads.
        supported: u32,
    },

    /// No platform storage directory could be resolved
    #[error("No storage directory available")]
    NoStorageDir,
}

/// Publish error type
///
/// Every variant is recoverable and surfaced to the caller; the
/// in-memory document is never touched on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The endpoint answered with an error payload
    #[error("Publish rejected: {message}")]
    Rejected {
        /// Message returned by the endpoint.
        message: String,
    },

    /// The request never produced a response
    #[error("Publish transport failure: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },

    /// A publish for the same layout is already running
    #[error("Publish already in flight for {key}")]
    InFlight {
        /// The single-flight key.
        key: String,
    },

    /// A newer request replaced this one before it completed
    #[error("Publish superseded for {key}")]
    Superseded {
        /// The single-flight key.
        key: String,
    },
}

/// Planting data source error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlantingError {
    /// The planting source answered with an error
    #[error("Planting request failed: {message}")]
    Request {
        /// Message returned by the source.
        message: String,
    },

    /// A request for the same key is already running
    #[error("Planting request already in flight for {key}")]
    InFlight {
        /// The single-flight key.
        key: String,
    },

    /// A newer request replaced this one before it completed
    #[error("Planting request superseded for {key}")]
    Superseded {
        /// The single-flight key.
        key: String,
    },
}

/// Main error type for GardenKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Publish error
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Planting error
    #[error(transparent)]
    Planting(#[from] PlantingError),
}

/// Result type alias for GardenKit operations.
pub type Result<T> = std::result::Result<T, Error>;
