//! Planting data source boundary.
//!
//! Plantings live on the server; each row names the bed (or tree) it sits
//! in by canvas item id. The editor never validates rows beyond dropping
//! those whose item is not in the current document.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use gardenkit_core::PlantingError;
use gardenkit_designer::model::{ItemId, ItemType, LayoutDoc};

use crate::single_flight::SingleFlight;

const TEMP_ID_PREFIX: &str = "temp-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planting {
    pub id: String,
    pub bed_id: ItemId,
    pub plant: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub planted_on: Option<NaiveDate>,
}

impl Planting {
    /// Rows created locally and not yet confirmed by the server.
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlanting {
    pub bed_id: ItemId,
    pub plant: String,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub planted_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planted_on: Option<Option<NaiveDate>>,
}

impl PlantingPatch {
    fn apply(&self, row: &mut Planting) {
        if let Some(plant) = &self.plant {
            row.plant = plant.clone();
        }
        if let Some(quantity) = self.quantity {
            row.quantity = quantity;
        }
        if let Some(notes) = &self.notes {
            row.notes = notes.clone();
        }
        if let Some(planted_on) = self.planted_on {
            row.planted_on = planted_on;
        }
    }
}

#[async_trait]
pub trait PlantingSource: Send + Sync {
    async fn list_plantings(&self, layout_id: &str) -> Result<Vec<Planting>, PlantingError>;

    async fn create_planting(
        &self,
        layout_id: &str,
        planting: &NewPlanting,
    ) -> Result<Planting, PlantingError>;

    async fn patch_planting(&self, id: &str, patch: &PlantingPatch)
        -> Result<Planting, PlantingError>;
}

/// Keeps rows whose `bed_id` is an item in `doc`.
pub fn filter_to_document(rows: Vec<Planting>, doc: &LayoutDoc) -> Vec<Planting> {
    rows.into_iter()
        .filter(|row| doc.items.contains(&row.bed_id))
        .collect()
}

/// Items that can hold plantings.
fn can_hold_plantings(item_type: ItemType) -> bool {
    matches!(item_type, ItemType::Bed | ItemType::Tree)
}

/// Local mirror of one layout's plantings, kept in step with the source.
pub struct PlantingSync {
    source: Arc<dyn PlantingSource>,
    flights: SingleFlight,
    rows: Mutex<Vec<Planting>>,
}

impl PlantingSync {
    pub fn new(source: Arc<dyn PlantingSource>) -> Self {
        Self {
            source,
            flights: SingleFlight::new(),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn rows(&self) -> Vec<Planting> {
        self.rows.lock().clone()
    }

    /// Rows for one item.
    pub fn rows_for(&self, item_id: &str) -> Vec<Planting> {
        self.rows
            .lock()
            .iter()
            .filter(|r| r.bed_id == item_id)
            .cloned()
            .collect()
    }

    /// Reloads the rows of `layout_id`. A newer refresh abandons this one,
    /// which then leaves the rows alone.
    pub async fn refresh(&self, layout_id: &str, doc: &LayoutDoc) -> Result<usize, PlantingError> {
        let ticket = self.flights.supersede(&format!("list:{layout_id}"));
        let listed = self.source.list_plantings(layout_id).await;
        if !ticket.is_current() {
            return Err(PlantingError::Superseded {
                key: ticket.key().to_string(),
            });
        }
        let rows = filter_to_document(listed?, doc);
        let count = rows.len();
        let mut local = self.rows.lock();
        // rows still waiting on the server survive a reload
        let pending: Vec<Planting> = local.iter().filter(|r| r.is_pending()).cloned().collect();
        *local = rows;
        local.extend(pending);
        tracing::debug!("Loaded {} plantings for layout {}", count, layout_id);
        Ok(count)
    }

    /// Creates a planting, showing a temporary row until the server
    /// answers. The temporary row is removed if the create fails.
    pub async fn create(
        &self,
        layout_id: &str,
        planting: NewPlanting,
        doc: &LayoutDoc,
    ) -> Result<Planting, PlantingError> {
        let holds = doc
            .item(&planting.bed_id)
            .is_some_and(|item| can_hold_plantings(item.item_type));
        if !holds {
            return Err(PlantingError::Request {
                message: format!("no bed or tree with id {}", planting.bed_id),
            });
        }

        let temp_id = format!("{TEMP_ID_PREFIX}{}", uuid::Uuid::new_v4());
        self.rows.lock().push(Planting {
            id: temp_id.clone(),
            bed_id: planting.bed_id.clone(),
            plant: planting.plant.clone(),
            quantity: planting.quantity,
            notes: planting.notes.clone(),
            planted_on: planting.planted_on,
        });

        let created = self.source.create_planting(layout_id, &planting).await;
        let mut rows = self.rows.lock();
        match created {
            Ok(row) => {
                match rows.iter_mut().find(|r| r.id == temp_id) {
                    Some(slot) => *slot = row.clone(),
                    None => rows.push(row.clone()),
                }
                Ok(row)
            }
            Err(e) => {
                rows.retain(|r| r.id != temp_id);
                tracing::warn!("Failed to create planting: {}", e);
                Err(e)
            }
        }
    }

    /// Patches a row. The local copy changes at once and is kept even if
    /// the server rejects the patch.
    pub async fn patch(&self, id: &str, patch: PlantingPatch) -> Result<Planting, PlantingError> {
        let ticket = self
            .flights
            .try_begin(&format!("patch:{id}"))
            .ok_or_else(|| PlantingError::InFlight {
                key: format!("patch:{id}"),
            })?;
        if let Some(row) = self.rows.lock().iter_mut().find(|r| r.id == id) {
            patch.apply(row);
        }

        let patched = self.source.patch_planting(id, &patch).await;
        drop(ticket);
        match patched {
            Ok(row) => {
                if let Some(slot) = self.rows.lock().iter_mut().find(|r| r.id == id) {
                    *slot = row.clone();
                }
                Ok(row)
            }
            Err(e) => {
                tracing::warn!("Failed to patch planting {}: {}", id, e);
                Err(e)
            }
        }
    }
}
