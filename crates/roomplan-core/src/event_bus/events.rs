//! Scene event definitions.

use serde::{Deserialize, Serialize};

/// Category of a scene event, used for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    /// Furniture instance lifecycle and transforms.
    Furniture,
    /// Selection changes.
    Selection,
    /// Room dimension or color changes.
    Room,
    /// Whole-scene swaps (project load, reset).
    Scene,
    /// Camera movement or preset application.
    Camera,
}

/// A mutation of the shared scene state.
///
/// Indices refer to the scene's instance list at the time the event was
/// published. `FurnitureRemoved` carries the removed index; subscribers
/// holding per-instance state re-key on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A catalog item was dropped into the room.
    FurnitureAdded { index: usize },
    /// An instance's placement was accepted and committed.
    FurnitureMoved { index: usize },
    /// An instance was rotated.
    FurnitureRotated { index: usize },
    /// An instance's uniform scale changed.
    FurnitureScaled { index: usize },
    /// An instance was removed from the scene.
    FurnitureRemoved { index: usize },
    /// An instance's active texture reference changed.
    FurnitureRetextured { index: usize },
    /// The selected instance changed (or selection was cleared).
    SelectionChanged { index: Option<usize> },
    /// Room dimensions or colors changed.
    RoomChanged,
    /// The whole scene was replaced (load or reset).
    SceneReplaced,
    /// The camera moved or a preset was applied.
    CameraChanged,
}

impl SceneEvent {
    /// The category this event belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            Self::FurnitureAdded { .. }
            | Self::FurnitureMoved { .. }
            | Self::FurnitureRotated { .. }
            | Self::FurnitureScaled { .. }
            | Self::FurnitureRemoved { .. }
            | Self::FurnitureRetextured { .. } => EventCategory::Furniture,
            Self::SelectionChanged { .. } => EventCategory::Selection,
            Self::RoomChanged => EventCategory::Room,
            Self::SceneReplaced => EventCategory::Scene,
            Self::CameraChanged => EventCategory::Camera,
        }
    }
}
