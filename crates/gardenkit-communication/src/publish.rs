//! Publish endpoint boundary.
//!
//! Publishing sends one layout's document to the server. The local
//! `published` flags change only after the endpoint acknowledges the
//! write; every failure is reported to the caller and leaves the document
//! untouched.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use gardenkit_core::{Error, PublishError, StoreError, StoreEvent};
use gardenkit_designer::model::LayoutDoc;
use gardenkit_designer::WorkspaceStore;

use crate::single_flight::SingleFlight;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub workplace_slug: String,
    /// Garden name as the server knows it.
    pub area_name: String,
    pub layout_name: String,
    pub doc: LayoutDoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub items_written: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
}

/// Body returned by the endpoint: a success payload or `{ "error": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublishReply {
    Success(PublishResponse),
    Failure { error: String },
}

#[async_trait]
pub trait PublishEndpoint: Send + Sync {
    /// Sends the request. `Err` means no reply was received at all.
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReply, PublishError>;
}

/// Publishes layouts for one workplace, one request per layout at a time.
pub struct Publisher {
    endpoint: Arc<dyn PublishEndpoint>,
    workplace_slug: String,
    flights: SingleFlight,
}

impl Publisher {
    pub fn new(endpoint: Arc<dyn PublishEndpoint>, workplace_slug: impl Into<String>) -> Self {
        Self {
            endpoint,
            workplace_slug: workplace_slug.into(),
            flights: SingleFlight::new(),
        }
    }

    pub fn is_publishing(&self, layout_id: &str) -> bool {
        self.flights.is_in_flight(layout_id)
    }

    /// Builds the request for a layout from the store's current state.
    pub fn request_for(
        &self,
        store: &WorkspaceStore,
        layout_id: &str,
    ) -> Result<PublishRequest, StoreError> {
        let layout = store
            .layouts()
            .iter()
            .find(|l| l.id == layout_id)
            .ok_or_else(|| StoreError::UnknownLayout {
                id: layout_id.to_string(),
            })?;
        let area_name = store
            .gardens()
            .iter()
            .find(|g| g.id == layout.garden_id)
            .map(|g| g.name.clone())
            .unwrap_or_default();
        Ok(PublishRequest {
            workplace_slug: self.workplace_slug.clone(),
            area_name,
            layout_name: layout.name.clone(),
            doc: store.doc_of(layout_id).cloned().unwrap_or_default(),
        })
    }

    /// Publishes `layout_id` and, once acknowledged, marks it as the
    /// garden's published layout.
    ///
    /// A second call for the same layout while one is running fails with
    /// [`PublishError::InFlight`].
    pub async fn publish_layout(
        &self,
        store: &Mutex<WorkspaceStore>,
        layout_id: &str,
    ) -> Result<PublishResponse, Error> {
        let ticket = self
            .flights
            .try_begin(layout_id)
            .ok_or_else(|| PublishError::InFlight {
                key: layout_id.to_string(),
            })?;

        let request = {
            let store = store.lock();
            self.request_for(&store, layout_id)?
        };
        tracing::info!(
            "Publishing layout '{}' ({} items)",
            request.layout_name,
            request.doc.items.len()
        );

        let reply = self.endpoint.publish(&request).await;
        if !ticket.is_current() {
            return Err(PublishError::Superseded {
                key: layout_id.to_string(),
            }
            .into());
        }

        let response = match reply {
            Ok(PublishReply::Success(response)) => response,
            Ok(PublishReply::Failure { error }) => {
                return Err(self.fail(store, PublishError::Rejected { message: error }))
            }
            Err(e) => return Err(self.fail(store, e)),
        };

        store.lock().mark_published(layout_id)?;
        tracing::info!(
            "Layout '{}' published: {} items written",
            request.layout_name,
            response.items_written
        );
        Ok(response)
    }

    fn fail(&self, store: &Mutex<WorkspaceStore>, error: PublishError) -> Error {
        tracing::warn!("Publish failed: {}", error);
        let events = store.lock().events().clone();
        // nobody listening is fine
        let _ = events.publish(StoreEvent::Failure {
            message: error.to_string(),
        });
        error.into()
    }
}
