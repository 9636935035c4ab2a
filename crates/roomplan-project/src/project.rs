//! The persisted design project record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use roomplan_core::services::AssetRef;

/// Identifier of a stored project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a design project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// A stored design project.
///
/// The `room`, `camera`, and `furniture` fields are opaque JSON strings
/// from the store's point of view; the engine owns their schema and each
/// must independently round-trip through the corresponding in-memory
/// model. A record with a missing or malformed payload is rejected at
/// load, never partially applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignProject {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub thumbnail_ref: Option<AssetRef>,
    /// Serialized `RoomModel`.
    pub room: String,
    /// Serialized `CameraState`.
    pub camera: String,
    /// Serialized `Vec<FurnitureInstance>`.
    pub furniture: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a stored project. `None` fields are left unchanged
/// by the store; `thumbnail_ref` uses a nested option so it can be
/// cleared explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub thumbnail_ref: Option<Option<AssetRef>>,
    pub room: Option<String>,
    pub camera: Option<String>,
    pub furniture: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectPatch {
    /// Applies this patch to a record (the in-memory mirror of what the
    /// store does server-side).
    pub fn apply_to(&self, project: &mut DesignProject) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(thumbnail) = &self.thumbnail_ref {
            project.thumbnail_ref = thumbnail.clone();
        }
        if let Some(room) = &self.room {
            project.room = room.clone();
        }
        if let Some(camera) = &self.camera {
            project.camera = camera.clone();
        }
        if let Some(furniture) = &self.furniture {
            project.furniture = furniture.clone();
        }
        if let Some(updated_at) = self.updated_at {
            project.updated_at = updated_at;
        }
    }
}
