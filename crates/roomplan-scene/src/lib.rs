//! # Roomplan Scene
//!
//! The data model and mutation engine for room layouts: the parametric
//! room, the furniture catalog adapter, placed furniture instances, the
//! scene state they live in, and the placement engine that turns raw drag
//! positions into legal, collision-checked placements.
//!
//! All mutation flows through [`LayoutEditor`]; the view projections in
//! `roomplan-view` subscribe to its event bus and only ever read.

pub mod camera;
pub mod catalog;
pub mod editor;
pub mod instance;
pub mod placement;
pub mod room;
pub mod scene;

pub use camera::{CameraPreset, CameraState};
pub use catalog::{CatalogAdapter, FurnitureDefinition, FurnitureVariant};
pub use editor::LayoutEditor;
pub use instance::{FurnitureInstance, InstanceId};
pub use placement::{PlacementDecision, RotationAxis, MIN_SCALE};
pub use room::RoomModel;
pub use scene::SceneState;
