//! # GardenKit Communication
//!
//! Boundaries between the editing engine and the outside world:
//! the publish endpoint, the planting data source, and the debounced
//! autosave worker that writes settled workspace snapshots to storage.
//! Network calls go through a single-flight guard so a request for a key
//! is never duplicated while one is running.

pub mod autosave;
pub mod plantings;
pub mod publish;
pub mod single_flight;

pub use autosave::{spawn_autosave, AutosaveHandle};
pub use plantings::{filter_to_document, NewPlanting, Planting, PlantingPatch, PlantingSource, PlantingSync};
pub use publish::{PublishEndpoint, PublishReply, PublishRequest, PublishResponse, Publisher};
pub use single_flight::{FlightTicket, SingleFlight};
