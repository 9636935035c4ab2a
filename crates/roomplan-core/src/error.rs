//! Error handling for the Roomplan engine
//!
//! Provides error types for the layers that can actually fail:
//! - Catalog errors (furniture catalog fetch)
//! - Asset errors (model/texture/image store access)
//! - Store errors (project document persistence)
//! - Document errors (malformed persisted payloads)
//!
//! Placement outcomes (out-of-bounds, collision, oversized item) are not
//! errors; they are resolved by clamping or rejecting the move and the
//! engine stays in its previous valid state.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Furniture catalog error type
///
/// Represents failures while fetching or refreshing the furniture catalog
/// from the external product service.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// The catalog service could not be reached
    #[error("Catalog unavailable: {reason}")]
    Unavailable {
        /// Why the catalog could not be reached.
        reason: String,
    },

    /// The catalog returned a definition the engine cannot use
    #[error("Invalid furniture definition '{definition_id}': {reason}")]
    InvalidDefinition {
        /// The offending definition id.
        definition_id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// No definition with the requested id exists
    #[error("Unknown furniture definition: {definition_id}")]
    UnknownDefinition {
        /// The requested definition id.
        definition_id: String,
    },
}

/// Asset store error type
///
/// Represents failures while loading or storing binary assets
/// (3D models, textures, thumbnail images).
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    /// The asset could not be found in the store
    #[error("Asset not found: {asset_ref}")]
    NotFound {
        /// The reference that failed to resolve.
        asset_ref: String,
    },

    /// The asset exists but could not be decoded
    #[error("Failed to decode asset {asset_ref}: {reason}")]
    Decode {
        /// The reference that failed to decode.
        asset_ref: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// Upload was rejected or interrupted
    #[error("Upload failed: {reason}")]
    UploadFailed {
        /// Why the upload failed.
        reason: String,
    },

    /// Generic transport failure talking to the asset store
    #[error("Asset store I/O error: {reason}")]
    Io {
        /// Transport diagnostic.
        reason: String,
    },
}

/// Project store error type
///
/// Represents failures of the external project document store
/// (create/get/update/delete). These are connection-level problems,
/// distinct from [`DocumentError`] which means the stored data itself
/// is unusable.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// No project with the requested id exists
    #[error("Project not found: {project_id}")]
    NotFound {
        /// The requested project id.
        project_id: String,
    },

    /// The store rejected the write
    #[error("Write rejected: {reason}")]
    WriteRejected {
        /// Why the write was rejected.
        reason: String,
    },

    /// Transport failure talking to the project store
    #[error("Project store unavailable: {reason}")]
    Unavailable {
        /// Transport diagnostic.
        reason: String,
    },
}

/// Persisted document error type
///
/// A project record was fetched successfully but one of its serialized
/// payload fields is missing or does not parse. Surfaced distinctly from
/// [`StoreError`] so callers can tell the user the project, not the
/// connection, is the problem.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A required serialized field is absent from the record
    #[error("Project field '{field}' is missing")]
    MissingField {
        /// The absent field name.
        field: &'static str,
    },

    /// A serialized field is present but does not parse
    #[error("Project field '{field}' is malformed: {source}")]
    MalformedField {
        /// The unparseable field name.
        field: &'static str,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type for the Roomplan engine
#[derive(Error, Debug)]
pub enum Error {
    /// Furniture catalog failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Asset store failure.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Project store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed persisted project data.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience result alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
