//! # GardenKit Core
//!
//! Core types and utilities shared by the GardenKit crates:
//! pure geometry helpers, editor-wide constants, the error hierarchy,
//! and the event bus the workspace store uses for subscribe/notify.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod geometry;

pub use error::{Error, PersistenceError, PlantingError, PublishError, Result, StoreError};

pub use event_bus::{EventBus, EventBusConfig, EventCategory, EventFilter, StoreEvent, SubscriptionId};

pub use geometry::{
    bounds_of_rects, clamp, normalize_degrees, rotate_about, rotate_vector, rotated_rect_bounds,
    snap_to_step, Point, Rect,
};
