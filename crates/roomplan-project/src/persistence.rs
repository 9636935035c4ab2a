//! Project save/load orchestration.
//!
//! Save is the only multi-step side effect in the engine: thumbnail
//! upload, then document write. A failed thumbnail upload downgrades to
//! keeping the previous thumbnail reference — losing a thumbnail update
//! is acceptable, losing layout data is not. A failed document write
//! surfaces as a store error and mutates nothing in memory, so the editor
//! stays consistent and the save retryable.
//!
//! Load parses all three serialized payloads into temporaries before
//! anything is returned: a record with a missing or malformed field is
//! rejected whole, and that rejection is distinguishable from a store
//! failure so the user knows the project, not the connection, is the
//! problem.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use roomplan_core::services::{AssetRef, AssetStore};
use roomplan_core::{DocumentError, Error, Result};
use roomplan_scene::{CameraState, FurnitureInstance, LayoutEditor, RoomModel};

use crate::project::{DesignProject, ProjectId, ProjectPatch, ProjectStatus};
use crate::store::ProjectStore;

/// Everything a project snapshot captures from a live editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub room: RoomModel,
    pub camera: CameraState,
    pub furniture: Vec<FurnitureInstance>,
}

impl SceneSnapshot {
    /// Captures the editor's current room and furniture plus the given
    /// camera state.
    pub fn capture(editor: &LayoutEditor, camera: CameraState) -> Self {
        Self {
            room: editor.room().clone(),
            camera,
            furniture: editor.scene().instances().to_vec(),
        }
    }
}

/// A successfully loaded project, parsed and ready to rehydrate the
/// editor and camera.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProject {
    pub project: DesignProject,
    pub room: RoomModel,
    pub camera: CameraState,
    pub furniture: Vec<FurnitureInstance>,
}

/// Persistence layer bridging the live engine state and the external
/// project/asset stores.
pub struct ProjectPersistence {
    projects: Arc<dyn ProjectStore>,
    assets: Arc<dyn AssetStore>,
}

impl ProjectPersistence {
    pub fn new(projects: Arc<dyn ProjectStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { projects, assets }
    }

    /// Creates and persists a new project from a snapshot.
    pub async fn create(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        owner_id: impl Into<String>,
        snapshot: &SceneSnapshot,
    ) -> Result<DesignProject> {
        let now = Utc::now();
        let project = DesignProject {
            id: ProjectId::random(),
            name: name.into(),
            description: description.into(),
            owner_id: owner_id.into(),
            status: ProjectStatus::Draft,
            thumbnail_ref: None,
            room: encode("room", &snapshot.room)?,
            camera: encode("camera", &snapshot.camera)?,
            furniture: encode("furniture", &snapshot.furniture)?,
            created_at: now,
            updated_at: now,
        };
        self.projects.create_project(&project).await?;
        info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    /// Saves the current snapshot into an existing project.
    ///
    /// When `thumbnail_png` is supplied, the new image is uploaded first
    /// and the previous reference deleted only after the upload succeeds;
    /// an upload failure keeps the prior reference and the save proceeds.
    /// Returns the record as stored.
    pub async fn save(
        &self,
        project: &DesignProject,
        snapshot: &SceneSnapshot,
        thumbnail_png: Option<Vec<u8>>,
    ) -> Result<DesignProject> {
        let room = encode("room", &snapshot.room)?;
        let camera = encode("camera", &snapshot.camera)?;
        let furniture = encode("furniture", &snapshot.furniture)?;

        let thumbnail_ref = match thumbnail_png {
            Some(bytes) => match self.assets.upload_image(bytes).await {
                Ok(new_ref) => {
                    if let Some(previous) = &project.thumbnail_ref {
                        if let Err(err) = self.assets.delete_image(previous).await {
                            warn!("Could not delete old thumbnail {}: {}", previous, err);
                        }
                    }
                    Some(Some(new_ref))
                }
                Err(err) => {
                    // Layout data still gets saved below.
                    warn!(
                        "Thumbnail upload for {} failed, keeping previous: {}",
                        project.id, err
                    );
                    None
                }
            },
            None => None,
        };

        let patch = ProjectPatch {
            room: Some(room),
            camera: Some(camera),
            furniture: Some(furniture),
            thumbnail_ref,
            updated_at: Some(Utc::now()),
            ..Default::default()
        };

        let stored = self.projects.update_project(&project.id, patch).await?;
        info!(
            "Saved project {} ({} instance(s))",
            stored.id,
            snapshot.furniture.len()
        );
        Ok(stored)
    }

    /// Updates project metadata (name/description/status) without
    /// touching the layout payloads.
    pub async fn update_metadata(
        &self,
        id: &ProjectId,
        name: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatus>,
    ) -> Result<DesignProject> {
        let patch = ProjectPatch {
            name,
            description,
            status,
            updated_at: Some(Utc::now()),
            ..Default::default()
        };
        Ok(self.projects.update_project(id, patch).await?)
    }

    /// Fetches and fully parses a project.
    ///
    /// All three payloads decode into temporaries before this returns;
    /// the first missing or malformed field fails the whole load with a
    /// [`DocumentError`].
    pub async fn load(&self, id: &ProjectId) -> Result<LoadedProject> {
        let project = self.projects.get_project(id).await?;

        let room: RoomModel = decode("room", &project.room)?;
        let camera: CameraState = decode("camera", &project.camera)?;
        let furniture: Vec<FurnitureInstance> = decode("furniture", &project.furniture)?;

        debug!(
            "Loaded project {}: {} instance(s)",
            project.id,
            furniture.len()
        );
        Ok(LoadedProject {
            project,
            room,
            camera,
            furniture,
        })
    }

    /// Deletes a project and its thumbnail image, if any.
    pub async fn delete(&self, id: &ProjectId) -> Result<()> {
        let project = self.projects.get_project(id).await?;
        self.projects.delete_project(id).await?;
        if let Some(thumbnail) = &project.thumbnail_ref {
            if let Err(err) = self.assets.delete_image(thumbnail).await {
                warn!("Could not delete thumbnail {}: {}", thumbnail, err);
            }
        }
        info!("Deleted project {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ProjectPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectPersistence").finish_non_exhaustive()
    }
}

fn encode<T: Serialize>(field: &'static str, value: &T) -> Result<String> {
    serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize project field '{}'", field))
        .map_err(Error::from)
}

fn decode<T: DeserializeOwned>(field: &'static str, payload: &str) -> Result<T> {
    if payload.trim().is_empty() {
        return Err(DocumentError::MissingField { field }.into());
    }
    serde_json::from_str(payload)
        .map_err(|source| DocumentError::MalformedField { field, source }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_distinguishes_missing_from_malformed() {
        let missing = decode::<CameraState>("camera", "   ").unwrap_err();
        assert!(matches!(
            missing,
            Error::Document(DocumentError::MissingField { field: "camera" })
        ));

        let malformed = decode::<CameraState>("camera", "{not json").unwrap_err();
        assert!(matches!(
            malformed,
            Error::Document(DocumentError::MalformedField { field: "camera", .. })
        ));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let camera = CameraState::default();
        let payload = encode("camera", &camera).unwrap();
        let back: CameraState = decode("camera", &payload).unwrap();
        assert_eq!(back, camera);
    }
}
