//! Per-key in-flight tracking for network calls.
//!
//! A key has at most one current request. [`SingleFlight::try_begin`]
//! refuses a second request while one runs; [`SingleFlight::supersede`]
//! replaces it, leaving the older request's ticket stale so its result can
//! be discarded when it finally arrives.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Flights = Arc<Mutex<HashMap<String, u64>>>;

#[derive(Debug, Default)]
pub struct SingleFlight {
    flights: Flights,
    generation: AtomicU64,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for `key` unless one is already running.
    pub fn try_begin(&self, key: &str) -> Option<FlightTicket> {
        let mut flights = self.flights.lock();
        if flights.contains_key(key) {
            tracing::debug!("Request for '{}' suppressed, one is in flight", key);
            return None;
        }
        let generation = self.next_generation();
        flights.insert(key.to_string(), generation);
        Some(self.ticket(key, generation))
    }

    /// Starts a request for `key`, abandoning any running one.
    pub fn supersede(&self, key: &str) -> FlightTicket {
        let generation = self.next_generation();
        if self
            .flights
            .lock()
            .insert(key.to_string(), generation)
            .is_some()
        {
            tracing::debug!("Request for '{}' superseded", key);
        }
        self.ticket(key, generation)
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.flights.lock().contains_key(key)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn ticket(&self, key: &str, generation: u64) -> FlightTicket {
        FlightTicket {
            key: key.to_string(),
            generation,
            flights: self.flights.clone(),
        }
    }
}

/// Proof of a running request. Dropping it ends the flight, unless a newer
/// request already took the key over.
#[derive(Debug)]
pub struct FlightTicket {
    key: String,
    generation: u64,
    flights: Flights,
}

impl FlightTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// False once a newer request superseded this one.
    pub fn is_current(&self) -> bool {
        self.flights.lock().get(&self.key) == Some(&self.generation)
    }
}

impl Drop for FlightTicket {
    fn drop(&mut self) {
        let mut flights = self.flights.lock();
        if flights.get(&self.key) == Some(&self.generation) {
            flights.remove(&self.key);
        }
    }
}
