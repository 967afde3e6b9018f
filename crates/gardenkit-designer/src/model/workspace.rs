use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LayoutDoc;

pub type GardenId = String;
pub type LayoutId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garden {
    pub id: GardenId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: LayoutId,
    pub garden_id: GardenId,
    pub name: String,
    #[serde(default)]
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

/// Everything that is persisted for one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceData {
    pub gardens: Vec<Garden>,
    pub layouts: Vec<Layout>,
    pub docs: HashMap<LayoutId, LayoutDoc>,
    pub active_garden_id: GardenId,
    pub active_layout_id: LayoutId,
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl WorkspaceData {
    /// First-run workspace: one garden holding one empty layout.
    pub fn seed() -> Self {
        let garden = Garden {
            id: new_id(),
            name: "My Garden".to_string(),
        };
        let layout = Layout {
            id: new_id(),
            garden_id: garden.id.clone(),
            name: "Main Layout".to_string(),
            published: false,
            updated_at: Utc::now(),
        };
        let mut docs = HashMap::new();
        docs.insert(layout.id.clone(), LayoutDoc::default());
        Self {
            active_garden_id: garden.id.clone(),
            active_layout_id: layout.id.clone(),
            gardens: vec![garden],
            layouts: vec![layout],
            docs,
        }
    }

    pub fn garden(&self, id: &str) -> Option<&Garden> {
        self.gardens.iter().find(|g| g.id == id)
    }

    pub fn layout(&self, id: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.id == id)
    }

    pub fn layouts_of<'a>(&'a self, garden_id: &'a str) -> impl Iterator<Item = &'a Layout> + 'a {
        self.layouts.iter().filter(move |l| l.garden_id == garden_id)
    }

    /// Repairs references a hand-edited or older file may have broken:
    /// every layout gets a document and the active ids point at real rows.
    /// Returns false when nothing usable is left.
    pub fn normalize(&mut self) -> bool {
        let garden_ids: Vec<GardenId> = self.gardens.iter().map(|g| g.id.clone()).collect();
        self.layouts.retain(|l| garden_ids.contains(&l.garden_id));
        for layout in &self.layouts {
            self.docs.entry(layout.id.clone()).or_default();
        }
        let layout_ids: Vec<&LayoutId> = self.layouts.iter().map(|l| &l.id).collect();
        self.docs.retain(|id, _| layout_ids.contains(&id));

        let Some(first) = self.layouts.first() else {
            return false;
        };
        if self.layout(&self.active_layout_id).is_none() {
            self.active_layout_id = first.id.clone();
        }
        if let Some(garden_id) = self
            .layout(&self.active_layout_id)
            .map(|l| l.garden_id.clone())
        {
            self.active_garden_id = garden_id;
        }
        true
    }
}
