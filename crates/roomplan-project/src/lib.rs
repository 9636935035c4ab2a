//! # Roomplan Project
//!
//! Design project records and their persistence: serializing the room,
//! camera, and furniture of an editing session into a storable document
//! and restoring them, with all-or-nothing rehydration and thumbnail
//! handling that can lose a thumbnail update but never layout data.

pub mod persistence;
pub mod project;
pub mod store;

pub use persistence::{LoadedProject, ProjectPersistence, SceneSnapshot};
pub use project::{DesignProject, ProjectId, ProjectPatch, ProjectStatus};
pub use store::ProjectStore;
