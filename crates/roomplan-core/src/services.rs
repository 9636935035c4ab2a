//! Service interfaces consumed by the engine.
//!
//! The engine is client-local; its only network interactions are fetching
//! the furniture catalog and moving assets/projects through external
//! stores. Those collaborators are modeled as narrow async traits so the
//! engine can be exercised against in-memory fakes in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AssetError, CatalogError};

/// Opaque reference to a stored asset (model, texture, or image).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
}

/// Wrap/repeat/offset settings attached to a loaded texture.
///
/// Preserved across re-texture operations where present so a material's
/// tiling survives a texture swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureSettings {
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
    pub repeat: (f64, f64),
    pub offset: (f64, f64),
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            wrap_u: WrapMode::Clamp,
            wrap_v: WrapMode::Clamp,
            repeat: (1.0, 1.0),
            offset: (0.0, 0.0),
        }
    }
}

/// A decoded texture as returned by the asset store.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// The reference this texture was loaded from.
    pub asset: AssetRef,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
    /// Optional tiling settings stored with the asset.
    pub settings: Option<TextureSettings>,
}

/// A loaded 3D model as returned by the asset store.
///
/// Carries only what the scene graph needs: the model's natural bounding
/// box (model-local units), from which per-axis scale factors to the
/// instance's target meters are derived. The geometry itself stays with
/// the render backend behind the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    /// The reference this model was loaded from.
    pub asset: AssetRef,
    /// Minimum corner of the natural bounding box.
    pub bounds_min: [f64; 3],
    /// Maximum corner of the natural bounding box.
    pub bounds_max: [f64; 3],
}

/// Optional filters for a catalog listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring match on the furniture name.
    pub name_contains: Option<String>,
    /// Restrict to these definition ids.
    pub definition_ids: Option<Vec<String>>,
}

/// Furniture catalog service (the product backend, read-only).
///
/// The definition type lives in the scene crate; the provider returns raw
/// JSON values so this trait stays free of a dependency cycle and the
/// adapter owns the (lenient) decoding.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Lists available furniture definitions as raw catalog records.
    async fn list_furniture(
        &self,
        filter: Option<&CatalogFilter>,
    ) -> std::result::Result<Vec<serde_json::Value>, CatalogError>;
}

/// Binary asset store (models, textures, thumbnail images).
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Uploads an encoded image, returning its reference.
    async fn upload_image(&self, bytes: Vec<u8>) -> std::result::Result<AssetRef, AssetError>;

    /// Deletes a stored image. Deleting an unknown reference is a no-op.
    async fn delete_image(&self, asset_ref: &AssetRef) -> std::result::Result<(), AssetError>;

    /// Loads and decodes a texture.
    async fn load_texture(&self, asset_ref: &AssetRef)
        -> std::result::Result<TextureData, AssetError>;

    /// Loads a 3D model, returning its natural bounding box.
    async fn load_model(&self, asset_ref: &AssetRef)
        -> std::result::Result<ModelData, AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_ref_serde_is_transparent() {
        let asset = AssetRef::new("textures/oak.jpg");
        let json = serde_json::to_string(&asset).unwrap();
        assert_eq!(json, "\"textures/oak.jpg\"");
        let back: AssetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, asset);
    }

    #[test]
    fn test_texture_settings_default() {
        let settings = TextureSettings::default();
        assert_eq!(settings.repeat, (1.0, 1.0));
        assert_eq!(settings.wrap_u, WrapMode::Clamp);
    }
}
