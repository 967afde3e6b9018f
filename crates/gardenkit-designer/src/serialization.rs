//! Stored JSON formats.
//!
//! The workspace is stored as one JSON object per tenant with a top-level
//! `version`. A single layout can also be exported to a standalone file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use gardenkit_core::constants::STORE_FORMAT_VERSION;
use gardenkit_core::PersistenceError;

use crate::model::{LayoutDoc, WorkspaceData};

fn default_version() -> u32 {
    1
}

/// Versioned envelope around the workspace data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWorkspace {
    /// Absent in the earliest stored data, which is version 1.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(flatten)]
    pub data: WorkspaceData,
}

impl StoredWorkspace {
    pub fn new(data: WorkspaceData) -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            data,
        }
    }
}

/// Encodes a workspace for storage.
pub fn encode_workspace(data: &WorkspaceData) -> std::result::Result<String, PersistenceError> {
    #[derive(Serialize)]
    struct Envelope<'a> {
        version: u32,
        #[serde(flatten)]
        data: &'a WorkspaceData,
    }
    Ok(serde_json::to_string(&Envelope {
        version: STORE_FORMAT_VERSION,
        data,
    })?)
}

/// Decodes stored workspace JSON.
///
/// The version is checked before the body so data written by a newer
/// build is reported as such rather than as a parse failure. Dangling
/// active ids and missing documents are repaired.
pub fn decode_workspace(json: &str) -> std::result::Result<WorkspaceData, PersistenceError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(1);
    if version > STORE_FORMAT_VERSION as u64 {
        return Err(PersistenceError::UnsupportedVersion {
            found: u32::try_from(version).unwrap_or(u32::MAX),
            supported: STORE_FORMAT_VERSION,
        });
    }

    let stored: StoredWorkspace = serde_json::from_value(value)?;
    let mut data = stored.data;
    if !data.normalize() {
        return Err(PersistenceError::Json(serde::de::Error::custom(
            "workspace has no layouts",
        )));
    }
    Ok(data)
}

/// Decodes stored JSON, falling back to a fresh seed on any failure.
pub fn decode_or_seed(json: &str) -> WorkspaceData {
    match decode_workspace(json) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Discarding stored workspace: {}", e);
            WorkspaceData::seed()
        }
    }
}

/// Standalone export of one layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub metadata: LayoutFileMetadata,
    pub doc: LayoutDoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFileMetadata {
    pub name: String,
    #[serde(default)]
    pub garden: String,
    pub exported: DateTime<Utc>,
}

impl LayoutFile {
    pub fn new(name: impl Into<String>, garden: impl Into<String>, doc: LayoutDoc) -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            metadata: LayoutFileMetadata {
                name: name.into(),
                garden: garden.into(),
                exported: Utc::now(),
            },
            doc,
        }
    }

    /// Save layout to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize layout")?;
        std::fs::write(path.as_ref(), json).context("Failed to write layout file")?;
        tracing::info!("Exported layout '{}' to {:?}", self.metadata.name, path.as_ref());
        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read layout file")?;
        let file: LayoutFile =
            serde_json::from_str(&content).context("Failed to parse layout file")?;
        if file.version > STORE_FORMAT_VERSION {
            anyhow::bail!(
                "Layout file version {} is newer than supported version {}",
                file.version,
                STORE_FORMAT_VERSION
            );
        }
        Ok(file)
    }
}
