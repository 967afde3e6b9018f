use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gardenkit_communication::{NewPlanting, Planting, PlantingPatch, PlantingSource, PlantingSync};
use gardenkit_core::{PlantingError, Point};
use gardenkit_designer::commands;
use gardenkit_designer::model::{ItemType, LayoutDoc};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Default)]
struct FakeSource {
    rows: Mutex<Vec<Planting>>,
    fail_writes: AtomicBool,
    create_gate: Option<Arc<Notify>>,
}

#[async_trait]
impl PlantingSource for FakeSource {
    async fn list_plantings(&self, _layout_id: &str) -> Result<Vec<Planting>, PlantingError> {
        Ok(self.rows.lock().clone())
    }

    async fn create_planting(
        &self,
        _layout_id: &str,
        planting: &NewPlanting,
    ) -> Result<Planting, PlantingError> {
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PlantingError::Request {
                message: "server unavailable".into(),
            });
        }
        let mut rows = self.rows.lock();
        let row = Planting {
            id: format!("p{}", rows.len() + 1),
            bed_id: planting.bed_id.clone(),
            plant: planting.plant.clone(),
            quantity: planting.quantity,
            notes: planting.notes.clone(),
            planted_on: planting.planted_on,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn patch_planting(
        &self,
        id: &str,
        patch: &PlantingPatch,
    ) -> Result<Planting, PlantingError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PlantingError::Request {
                message: "server unavailable".into(),
            });
        }
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PlantingError::Request {
                message: format!("no planting {id}"),
            })?;
        if let Some(quantity) = patch.quantity {
            row.quantity = quantity;
        }
        Ok(row.clone())
    }
}

fn doc_with_bed() -> (LayoutDoc, String) {
    let mut doc = LayoutDoc::default();
    let bed = commands::add_item(&mut doc, ItemType::Bed, Point::new(100.0, 100.0));
    commands::add_item(&mut doc, ItemType::Zone, Point::new(400.0, 400.0));
    (doc, bed.id)
}

fn new_planting(bed_id: &str) -> NewPlanting {
    NewPlanting {
        bed_id: bed_id.into(),
        plant: "Garlic".into(),
        quantity: 12,
        notes: String::new(),
        planted_on: None,
    }
}

#[tokio::test]
async fn test_refresh_filters_to_document() {
    let (doc, bed) = doc_with_bed();
    let source = FakeSource::default();
    source.rows.lock().extend([
        Planting {
            id: "a".into(),
            bed_id: bed.clone(),
            plant: "Leek".into(),
            quantity: 3,
            notes: String::new(),
            planted_on: None,
        },
        Planting {
            id: "b".into(),
            bed_id: "deleted-bed".into(),
            plant: "Leek".into(),
            quantity: 3,
            notes: String::new(),
            planted_on: None,
        },
    ]);
    let sync = PlantingSync::new(Arc::new(source));

    assert_eq!(sync.refresh("layout", &doc).await.unwrap(), 1);
    assert_eq!(sync.rows()[0].id, "a");
    assert_eq!(sync.rows_for(&bed).len(), 1);
}

#[tokio::test]
async fn test_create_replaces_temp_row() {
    let (doc, bed) = doc_with_bed();
    let gate = Arc::new(Notify::new());
    let source = FakeSource {
        create_gate: Some(gate.clone()),
        ..FakeSource::default()
    };
    let sync = Arc::new(PlantingSync::new(Arc::new(source)));

    let task = {
        let sync = sync.clone();
        let doc = doc.clone();
        let bed = bed.clone();
        tokio::spawn(async move { sync.create("layout", new_planting(&bed), &doc).await })
    };
    while sync.rows().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(sync.rows()[0].is_pending());

    gate.notify_one();
    let created = task.await.unwrap().unwrap();
    assert_eq!(sync.rows(), vec![created]);
    assert!(!sync.rows()[0].is_pending());
}

#[tokio::test]
async fn test_failed_create_removes_temp_row() {
    let (doc, bed) = doc_with_bed();
    let source = FakeSource {
        fail_writes: AtomicBool::new(true),
        ..FakeSource::default()
    };
    let sync = PlantingSync::new(Arc::new(source));
    assert!(sync.create("layout", new_planting(&bed), &doc).await.is_err());
    assert!(sync.rows().is_empty());
}

#[tokio::test]
async fn test_create_needs_bed_or_tree() {
    let (doc, _) = doc_with_bed();
    let zone = doc
        .items
        .iter()
        .find(|i| i.item_type == ItemType::Zone)
        .map(|i| i.id.clone())
        .unwrap();
    let sync = PlantingSync::new(Arc::new(FakeSource::default()));
    assert!(sync.create("layout", new_planting(&zone), &doc).await.is_err());
    assert!(sync.create("layout", new_planting("nope"), &doc).await.is_err());
}

#[tokio::test]
async fn test_failed_patch_keeps_local_edit() {
    let (doc, bed) = doc_with_bed();
    let source = Arc::new(FakeSource::default());
    let sync = PlantingSync::new(source.clone());
    let created = sync.create("layout", new_planting(&bed), &doc).await.unwrap();

    source.fail_writes.store(true, Ordering::SeqCst);
    let patch = PlantingPatch {
        quantity: Some(20),
        ..PlantingPatch::default()
    };
    assert!(sync.patch(&created.id, patch).await.is_err());
    assert_eq!(sync.rows()[0].quantity, 20);
    assert_eq!(source.rows.lock()[0].quantity, 12);
}
