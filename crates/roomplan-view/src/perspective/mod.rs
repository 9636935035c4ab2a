//! The 3D perspective projection.

mod camera;
mod picking;
mod quality;
mod scene_graph;

pub use camera::{Camera, CameraController};
pub use picking::{DragSession3D, Ray};
pub use quality::{detect_tier, DeviceCapabilities, QualitySettings, QualityTier};
pub use scene_graph::{
    AssetState, FurnitureNode, MeshSource, SceneGraph, Surface, SurfaceKind, TextureBinding,
};
