//! Placed furniture instances.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use roomplan_core::services::AssetRef;
use roomplan_core::units::{self, lenient_unit};
use roomplan_core::{EulerRotation, Footprint, Point3, Rect2, Size3, Unit};

use crate::catalog::FurnitureDefinition;

/// Identifier of a placed instance: the catalog definition id plus a
/// per-definition placement index.
///
/// Serialized as `"<definition>#<placement>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId {
    pub definition_id: String,
    pub placement: u32,
}

impl InstanceId {
    pub fn new(definition_id: impl Into<String>, placement: u32) -> Self {
        Self {
            definition_id: definition_id.into(),
            placement,
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.definition_id, self.placement)
    }
}

impl FromStr for InstanceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (definition_id, placement) = s
            .rsplit_once('#')
            .ok_or_else(|| format!("Instance id missing '#': {}", s))?;
        let placement = placement
            .parse()
            .map_err(|_| format!("Invalid placement index in instance id: {}", s))?;
        Ok(Self::new(definition_id, placement))
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for InstanceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn default_scale() -> f64 {
    1.0
}

/// A single placed copy of a catalog furniture definition.
///
/// Instances copy the definition's dimensions, unit, and model reference
/// at creation so a persisted scene rehydrates without a catalog fetch.
/// Position is room-local meters with `y` as the height offset; rotation
/// is Euler radians; scale is a uniform multiplier floored elsewhere at
/// the engine's minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureInstance {
    pub id: InstanceId,
    /// Reference to the definition's 3D model asset.
    pub model_asset: AssetRef,
    /// Dimensions as entered in the catalog, in `dimension_unit`.
    pub dimensions: Size3,
    #[serde(default, deserialize_with = "lenient_unit")]
    pub dimension_unit: Unit,
    #[serde(default)]
    pub position: Point3,
    #[serde(default)]
    pub rotation: EulerRotation,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub active_texture: Option<AssetRef>,
}

impl FurnitureInstance {
    /// Creates an instance of `definition` at the room origin with the
    /// definition's first variant texture preselected.
    pub fn from_definition(definition: &FurnitureDefinition, placement: u32) -> Self {
        Self {
            id: InstanceId::new(definition.id.clone(), placement),
            model_asset: definition.model_asset.clone(),
            dimensions: definition.dimensions,
            dimension_unit: definition.dimension_unit,
            position: Point3::ZERO,
            rotation: EulerRotation::default(),
            scale: 1.0,
            active_texture: definition
                .default_variant()
                .and_then(|v| v.texture_asset.clone()),
        }
    }

    /// Dimensions in meters, including the instance's uniform scale.
    pub fn size_meters(&self) -> Size3 {
        Size3::new(
            units::to_meters(self.dimensions.width, self.dimension_unit) * self.scale,
            units::to_meters(self.dimensions.height, self.dimension_unit) * self.scale,
            units::to_meters(self.dimensions.depth, self.dimension_unit) * self.scale,
        )
    }

    /// Floor footprint half-extents in meters.
    ///
    /// Rotation does not enter the footprint; collision treats every
    /// instance as axis-aligned by width/depth.
    pub fn footprint(&self) -> Footprint {
        let size = self.size_meters();
        Footprint::new(size.width / 2.0, size.depth / 2.0)
    }

    /// Axis-aligned bounding rectangle at the current position.
    pub fn bounding_rect(&self) -> Rect2 {
        self.footprint().rect_at(self.position.x, self.position.z)
    }
}
