//! Furniture catalog types and the session-cached adapter.
//!
//! Definitions come from the external product service and are read-only
//! to the engine. The adapter decodes raw catalog records leniently: a
//! record with an unknown dimension unit still decodes (the unit falls
//! back to meters), and a record that does not decode at all is skipped
//! with a warning rather than failing the listing.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use roomplan_core::services::{AssetRef, CatalogFilter, CatalogProvider};
use roomplan_core::units::{self, lenient_unit};
use roomplan_core::{CatalogError, Color, Footprint, Size3, Unit};

/// A selectable variant of a furniture definition (finish/texture/price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureVariant {
    pub name: String,
    pub color_code: Color,
    #[serde(default)]
    pub texture_asset: Option<AssetRef>,
    #[serde(default)]
    pub price: f64,
}

/// The catalog's template record for a furniture type (not itself placed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureDefinition {
    /// Stable catalog identifier.
    pub id: String,
    pub name: String,
    /// Reference to the 3D model asset.
    pub model_asset: AssetRef,
    /// Default dimensions in `dimension_unit`.
    pub dimensions: Size3,
    /// Unit the dimensions were entered in; unknown tags decode as meters.
    #[serde(default, deserialize_with = "lenient_unit")]
    pub dimension_unit: Unit,
    #[serde(default)]
    pub variants: Vec<FurnitureVariant>,
}

impl FurnitureDefinition {
    /// Dimensions converted to meters, at the given uniform scale.
    pub fn size_meters(&self, scale: f64) -> Size3 {
        Size3::new(
            units::to_meters(self.dimensions.width, self.dimension_unit) * scale,
            units::to_meters(self.dimensions.height, self.dimension_unit) * scale,
            units::to_meters(self.dimensions.depth, self.dimension_unit) * scale,
        )
    }

    /// Floor footprint half-extents in meters, at the given uniform scale.
    pub fn footprint(&self, scale: f64) -> Footprint {
        let size = self.size_meters(scale);
        Footprint::new(size.width / 2.0, size.depth / 2.0)
    }

    /// The variant preselected when an instance is created.
    pub fn default_variant(&self) -> Option<&FurnitureVariant> {
        self.variants.first()
    }
}

/// Session-cached view over the catalog service.
///
/// The first listing populates the cache; subsequent lookups are served
/// from memory until [`CatalogAdapter::refresh`] re-fetches.
pub struct CatalogAdapter {
    provider: Arc<dyn CatalogProvider>,
    cache: RwLock<Option<Vec<FurnitureDefinition>>>,
}

impl CatalogAdapter {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            cache: RwLock::new(None),
        }
    }

    /// Lists furniture definitions, fetching on first use.
    pub async fn definitions(&self) -> Result<Vec<FurnitureDefinition>, CatalogError> {
        if let Some(cached) = self.cache.read().as_ref() {
            return Ok(cached.clone());
        }
        self.refresh().await
    }

    /// Re-fetches the catalog, replacing the session cache.
    pub async fn refresh(&self) -> Result<Vec<FurnitureDefinition>, CatalogError> {
        let records = self.provider.list_furniture(None).await?;
        let total = records.len();
        let definitions: Vec<FurnitureDefinition> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(definition) => Some(definition),
                Err(err) => {
                    warn!("Skipping undecodable catalog record: {}", err);
                    None
                }
            })
            .collect();
        debug!("Catalog fetched: {}/{} records usable", definitions.len(), total);
        *self.cache.write() = Some(definitions.clone());
        Ok(definitions)
    }

    /// Looks up a cached definition by id, fetching the catalog if needed.
    pub async fn get(&self, definition_id: &str) -> Result<FurnitureDefinition, CatalogError> {
        self.definitions()
            .await?
            .into_iter()
            .find(|d| d.id == definition_id)
            .ok_or_else(|| CatalogError::UnknownDefinition {
                definition_id: definition_id.to_string(),
            })
    }

    /// Case-insensitive name search over the cached listing.
    pub async fn search(&self, query: &str) -> Result<Vec<FurnitureDefinition>, CatalogError> {
        let needle = query.to_lowercase();
        Ok(self
            .definitions()
            .await?
            .into_iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Passes a filter straight through to the provider, bypassing the
    /// session cache (used by browse UIs that page server-side).
    pub async fn query(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Vec<FurnitureDefinition>, CatalogError> {
        let records = self.provider.list_furniture(Some(filter)).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect())
    }
}

impl std::fmt::Debug for CatalogAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.cache.read().as_ref().map(|c| c.len());
        f.debug_struct("CatalogAdapter")
            .field("cached_definitions", &cached)
            .finish()
    }
}
