//! The external project document store interface.

use async_trait::async_trait;

use roomplan_core::StoreError;

use crate::project::{DesignProject, ProjectId, ProjectPatch};

/// Project CRUD as exposed by the backend document store.
///
/// The store treats the record's serialized payload fields as opaque
/// strings; all schema knowledge stays on this side of the trait.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persists a new project record.
    async fn create_project(&self, project: &DesignProject) -> Result<(), StoreError>;

    /// Fetches a project record by id.
    async fn get_project(&self, id: &ProjectId) -> Result<DesignProject, StoreError>;

    /// Applies a partial update, returning the record as stored.
    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<DesignProject, StoreError>;

    /// Deletes a project record.
    async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError>;
}
