//! Garden and layout management.

use chrono::Utc;
use gardenkit_core::{StoreError, StoreEvent};

use super::WorkspaceStore;
use crate::model::{new_id, Garden, GardenId, Layout, LayoutDoc, LayoutId};
use crate::serialization::LayoutFile;

const DEFAULT_LAYOUT_NAME: &str = "Main Layout";

impl WorkspaceStore {
    /// Creates a garden holding one empty layout. The new layout is not
    /// activated.
    pub fn create_garden(&mut self, name: impl Into<String>) -> GardenId {
        let garden = Garden {
            id: new_id(),
            name: name.into(),
        };
        let id = garden.id.clone();
        tracing::info!("Created garden '{}'", garden.name);
        self.data.gardens.push(garden);
        self.insert_layout(&id, DEFAULT_LAYOUT_NAME.to_string(), LayoutDoc::default());
        self.workspace_changed();
        id
    }

    pub fn rename_garden(&mut self, id: &str, name: impl Into<String>) -> Result<(), StoreError> {
        let garden = self
            .data
            .gardens
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::UnknownGarden { id: id.to_string() })?;
        garden.name = name.into();
        self.workspace_changed();
        Ok(())
    }

    /// Deletes a garden and all of its layouts.
    ///
    /// Deleting the active garden activates the first layout of another one.
    pub fn delete_garden(&mut self, id: &str) -> Result<(), StoreError> {
        if self.data.garden(id).is_none() {
            return Err(StoreError::UnknownGarden { id: id.to_string() });
        }
        if self.data.gardens.len() <= 1 {
            return Err(StoreError::LastGarden);
        }
        if self.data.active_garden_id == id {
            let next = self
                .data
                .layouts
                .iter()
                .find(|l| l.garden_id != id)
                .map(|l| l.id.clone())
                .ok_or(StoreError::LastGarden)?;
            self.set_active_layout(&next)?;
        }

        let removed: Vec<LayoutId> = self.layouts_of(id).map(|l| l.id.clone()).collect();
        self.data.layouts.retain(|l| l.garden_id != id);
        for layout_id in &removed {
            self.data.docs.remove(layout_id);
        }
        self.data.gardens.retain(|g| g.id != id);
        tracing::info!("Deleted garden {} with {} layouts", id, removed.len());
        self.workspace_changed();
        Ok(())
    }

    /// Adds an empty layout to a garden.
    pub fn create_layout(
        &mut self,
        garden_id: &str,
        name: impl Into<String>,
    ) -> Result<LayoutId, StoreError> {
        if self.data.garden(garden_id).is_none() {
            return Err(StoreError::UnknownGarden {
                id: garden_id.to_string(),
            });
        }
        let id = self.insert_layout(garden_id, name.into(), LayoutDoc::default());
        self.workspace_changed();
        Ok(id)
    }

    pub fn rename_layout(&mut self, id: &str, name: impl Into<String>) -> Result<(), StoreError> {
        let layout = self.layout_mut(id)?;
        layout.name = name.into();
        layout.updated_at = Utc::now();
        self.workspace_changed();
        Ok(())
    }

    /// Copies a layout's document into a new unpublished sibling.
    ///
    /// Item ids are regenerated so they stay unique across the workspace;
    /// codes are kept since they only need to be unique per document.
    pub fn duplicate_layout(&mut self, id: &str) -> Result<LayoutId, StoreError> {
        let source = self
            .data
            .layout(id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownLayout { id: id.to_string() })?;
        let doc = self.doc_of(id).map(with_fresh_ids).unwrap_or_default();
        let layout_id = self.insert_layout(&source.garden_id, format!("{} copy", source.name), doc);
        self.workspace_changed();
        Ok(layout_id)
    }

    /// Packages a layout's document for writing to a standalone file.
    pub fn export_layout(&self, id: &str) -> Result<LayoutFile, StoreError> {
        let layout = self
            .data
            .layout(id)
            .ok_or_else(|| StoreError::UnknownLayout { id: id.to_string() })?;
        let garden = self
            .data
            .garden(&layout.garden_id)
            .map(|g| g.name.clone())
            .unwrap_or_default();
        let doc = self.doc_of(id).cloned().unwrap_or_default();
        Ok(LayoutFile::new(layout.name.clone(), garden, doc))
    }

    /// Adds an exported layout to a garden as a new unpublished layout.
    pub fn import_layout(&mut self, garden_id: &str, file: &LayoutFile) -> Result<LayoutId, StoreError> {
        if self.data.garden(garden_id).is_none() {
            return Err(StoreError::UnknownGarden {
                id: garden_id.to_string(),
            });
        }
        let layout_id = self.insert_layout(garden_id, file.metadata.name.clone(), with_fresh_ids(&file.doc));
        tracing::info!("Imported layout '{}'", file.metadata.name);
        self.workspace_changed();
        Ok(layout_id)
    }

    /// Deletes a layout. A garden keeps at least one; deleting the active
    /// layout activates a sibling first.
    pub fn delete_layout(&mut self, id: &str) -> Result<(), StoreError> {
        let garden_id = self
            .data
            .layout(id)
            .map(|l| l.garden_id.clone())
            .ok_or_else(|| StoreError::UnknownLayout { id: id.to_string() })?;
        let sibling = self
            .layouts_of(&garden_id)
            .find(|l| l.id != id)
            .map(|l| l.id.clone());
        let Some(sibling) = sibling else {
            return Err(StoreError::LastLayout { garden_id });
        };
        if self.data.active_layout_id == id {
            self.set_active_layout(&sibling)?;
        }
        self.data.layouts.retain(|l| l.id != id);
        self.data.docs.remove(id);
        tracing::info!("Deleted layout {}", id);
        self.workspace_changed();
        Ok(())
    }

    /// Switches the active layout. History and selection belong to one
    /// layout, so both are reset.
    pub fn set_active_layout(&mut self, id: &str) -> Result<(), StoreError> {
        let garden_id = self
            .data
            .layout(id)
            .map(|l| l.garden_id.clone())
            .ok_or_else(|| StoreError::UnknownLayout { id: id.to_string() })?;
        if self.data.active_layout_id == id {
            return Ok(());
        }

        let incoming = self.data.docs.remove(id).unwrap_or_default();
        let outgoing = std::mem::replace(&mut self.doc, incoming);
        self.data
            .docs
            .insert(self.data.active_layout_id.clone(), outgoing);
        self.data.active_layout_id = id.to_string();
        self.data.active_garden_id = garden_id.clone();

        self.history.clear();
        self.selection.deselect_all();
        tracing::info!("Active layout is now {}", id);
        self.emit(StoreEvent::ActiveLayoutChanged {
            garden_id,
            layout_id: id.to_string(),
        });
        self.settle();
        Ok(())
    }

    /// Records a successful publish: `id` becomes the garden's only
    /// published layout. Call only after the endpoint acknowledged it.
    pub fn mark_published(&mut self, id: &str) -> Result<(), StoreError> {
        let garden_id = self
            .data
            .layout(id)
            .map(|l| l.garden_id.clone())
            .ok_or_else(|| StoreError::UnknownLayout { id: id.to_string() })?;
        for layout in self
            .data
            .layouts
            .iter_mut()
            .filter(|l| l.garden_id == garden_id)
        {
            layout.published = layout.id == id;
        }
        tracing::info!("Layout {} published", id);
        self.workspace_changed();
        Ok(())
    }

    /// Published layout of a garden, if any.
    pub fn published_layout(&self, garden_id: &str) -> Option<&Layout> {
        self.data
            .layouts
            .iter()
            .find(|l| l.garden_id == garden_id && l.published)
    }

    fn insert_layout(&mut self, garden_id: &str, name: String, doc: LayoutDoc) -> LayoutId {
        let layout = Layout {
            id: new_id(),
            garden_id: garden_id.to_string(),
            name,
            published: false,
            updated_at: Utc::now(),
        };
        let id = layout.id.clone();
        self.data.docs.insert(id.clone(), doc);
        self.data.layouts.push(layout);
        id
    }

    fn layout_mut(&mut self, id: &str) -> Result<&mut Layout, StoreError> {
        self.data
            .layouts
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::UnknownLayout { id: id.to_string() })
    }

    fn workspace_changed(&self) {
        self.emit(StoreEvent::WorkspaceChanged);
        self.settle();
    }
}

/// Deep copy of `doc` with regenerated item ids. Codes only need to be
/// unique per document, so they are kept.
fn with_fresh_ids(doc: &LayoutDoc) -> LayoutDoc {
    let mut copy = LayoutDoc::new(doc.canvas);
    for item in doc.items.iter() {
        let mut item = item.clone();
        item.id = new_id();
        copy.items.insert(item);
    }
    copy
}
