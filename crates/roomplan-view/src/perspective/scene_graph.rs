//! Scene graph for the perspective view.
//!
//! Every refresh derives the full renderable scene from the data model:
//! floor and wall surfaces from the room, one node per furniture instance
//! with its transform composed from position/rotation/scale. Nothing is
//! mutated imperatively between refreshes, so the rendered scene can
//! never drift from the scene state.
//!
//! Model and texture resolution are asynchronous. Results are applied
//! opportunistically whenever they land; a resolution whose target no
//! longer exists (or has been re-targeted) is discarded as a no-op. An
//! instance whose model failed renders as a placeholder volume sized to
//! its declared dimensions, with selection and transforms still live.

use std::collections::HashMap;

use glam::{EulerRot, Mat4, Quat, Vec3};
use tracing::{debug, warn};

use roomplan_core::services::{AssetRef, AssetStore, ModelData, TextureData, TextureSettings};
use roomplan_core::{AssetError, Color};
use roomplan_scene::{FurnitureInstance, InstanceId, RoomModel, SceneState};

/// Which bounding surface of the room a quad represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Floor,
    WallBack,
    WallFront,
    WallLeft,
    WallRight,
}

/// One colored quad of the room shell, as corner positions in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub corners: [Vec3; 4],
    pub color: Color,
}

/// Resolution state of a shared model asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState {
    /// Load requested, not yet resolved.
    Pending,
    /// Loaded; carries the model's natural bounding box.
    Ready(ModelData),
    /// Load failed; instances fall back to placeholder volumes.
    Failed,
}

/// How a node's geometry is sourced.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshSource {
    /// The loaded model asset, scaled per-axis to the target meters.
    Asset(AssetRef),
    /// A unit-cube placeholder volume; the transform carries the target
    /// size. Used while loading and after a failed load.
    Placeholder,
}

/// A texture applied to a node's materials.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    pub asset: AssetRef,
    /// Tiling settings, preserved from the previous binding when the
    /// newly loaded texture does not carry its own.
    pub settings: TextureSettings,
}

/// One renderable furniture node.
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureNode {
    pub id: InstanceId,
    pub mesh: MeshSource,
    /// Model/world transform placing the (re-centered) geometry so its
    /// base sits at the instance's height offset.
    pub transform: Mat4,
    pub selected: bool,
    pub texture: Option<TextureBinding>,
    /// Set when the model failed to load, for a non-blocking indicator.
    pub load_failed: bool,
}

/// The derived 3D scene.
#[derive(Debug, Default)]
pub struct SceneGraph {
    surfaces: Vec<Surface>,
    nodes: Vec<FurnitureNode>,
    assets: HashMap<AssetRef, AssetState>,
    textures: HashMap<InstanceId, TextureBinding>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn nodes(&self) -> &[FurnitureNode] {
        &self.nodes
    }

    /// Resolution state of a model asset, if it has ever been requested.
    pub fn asset_state(&self, asset: &AssetRef) -> Option<&AssetState> {
        self.assets.get(asset)
    }

    /// Rebuilds surfaces and nodes from the current room and scene.
    ///
    /// Call after any scene event; the rebuild is O(n) over instances and
    /// does not touch asset or texture caches.
    pub fn refresh(&mut self, room: &RoomModel, scene: &SceneState) {
        self.surfaces = Self::room_surfaces(room);
        let selected = scene.selected_index();
        self.nodes = scene
            .instances()
            .iter()
            .enumerate()
            .map(|(index, instance)| self.build_node(instance, selected == Some(index)))
            .collect();

        // Texture bindings for removed instances are dead weight; drop
        // them so stale async results have nothing to land on.
        let live: std::collections::HashSet<_> =
            scene.instances().iter().map(|i| i.id.clone()).collect();
        self.textures.retain(|id, _| live.contains(id));
    }

    /// Tears down all derived state and caches (viewer close).
    pub fn clear(&mut self) {
        self.surfaces.clear();
        self.nodes.clear();
        self.assets.clear();
        self.textures.clear();
    }

    fn build_node(&self, instance: &FurnitureInstance, selected: bool) -> FurnitureNode {
        let size = instance.size_meters();
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            instance.rotation.x as f32,
            instance.rotation.y as f32,
            instance.rotation.z as f32,
        );
        let position = Vec3::new(
            instance.position.x as f32,
            instance.position.y as f32,
            instance.position.z as f32,
        );

        let (mesh, transform, load_failed) = match self.assets.get(&instance.model_asset) {
            Some(AssetState::Ready(model)) => (
                MeshSource::Asset(instance.model_asset.clone()),
                Self::model_transform(model, size, rotation, position),
                false,
            ),
            Some(AssetState::Failed) => (
                MeshSource::Placeholder,
                Self::placeholder_transform(size, rotation, position),
                true,
            ),
            _ => (
                MeshSource::Placeholder,
                Self::placeholder_transform(size, rotation, position),
                false,
            ),
        };

        FurnitureNode {
            id: instance.id.clone(),
            mesh,
            transform,
            selected,
            texture: self.textures.get(&instance.id).cloned(),
            load_failed,
        }
    }

    /// Transform for a loaded model: re-center the natural bounding box
    /// over the origin with its base at y = 0, scale each axis to the
    /// target meters, rotate, then translate to the instance position.
    fn model_transform(model: &ModelData, size: roomplan_core::Size3, rotation: Quat, position: Vec3) -> Mat4 {
        let min = Vec3::new(
            model.bounds_min[0] as f32,
            model.bounds_min[1] as f32,
            model.bounds_min[2] as f32,
        );
        let max = Vec3::new(
            model.bounds_max[0] as f32,
            model.bounds_max[1] as f32,
            model.bounds_max[2] as f32,
        );
        let extent = (max - min).max(Vec3::splat(1e-6));
        let scale = Vec3::new(
            size.width as f32 / extent.x,
            size.height as f32 / extent.y,
            size.depth as f32 / extent.z,
        );
        let recenter = Vec3::new(
            -(min.x + max.x) / 2.0,
            -min.y,
            -(min.z + max.z) / 2.0,
        );

        Mat4::from_translation(position)
            * Mat4::from_quat(rotation)
            * Mat4::from_scale(scale)
            * Mat4::from_translation(recenter)
    }

    /// Transform for the unit-cube placeholder (centered at the origin):
    /// scale to the declared size and lift so the base sits on the floor
    /// plane.
    fn placeholder_transform(size: roomplan_core::Size3, rotation: Quat, position: Vec3) -> Mat4 {
        let scale = Vec3::new(size.width as f32, size.height as f32, size.depth as f32);
        Mat4::from_translation(position)
            * Mat4::from_quat(rotation)
            * Mat4::from_scale(scale)
            * Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0))
    }

    fn room_surfaces(room: &RoomModel) -> Vec<Surface> {
        let w = room.width() as f32;
        let l = room.length() as f32;
        let h = room.height() as f32;
        vec![
            Surface {
                kind: SurfaceKind::Floor,
                corners: [
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(w, 0.0, 0.0),
                    Vec3::new(w, 0.0, l),
                    Vec3::new(0.0, 0.0, l),
                ],
                color: room.floor_color,
            },
            Surface {
                kind: SurfaceKind::WallBack,
                corners: [
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(w, 0.0, 0.0),
                    Vec3::new(w, h, 0.0),
                    Vec3::new(0.0, h, 0.0),
                ],
                color: room.wall_color,
            },
            Surface {
                kind: SurfaceKind::WallFront,
                corners: [
                    Vec3::new(0.0, 0.0, l),
                    Vec3::new(w, 0.0, l),
                    Vec3::new(w, h, l),
                    Vec3::new(0.0, h, l),
                ],
                color: room.wall_color,
            },
            Surface {
                kind: SurfaceKind::WallLeft,
                corners: [
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(0.0, 0.0, l),
                    Vec3::new(0.0, h, l),
                    Vec3::new(0.0, h, 0.0),
                ],
                color: room.wall_color,
            },
            Surface {
                kind: SurfaceKind::WallRight,
                corners: [
                    Vec3::new(w, 0.0, 0.0),
                    Vec3::new(w, 0.0, l),
                    Vec3::new(w, h, l),
                    Vec3::new(w, h, 0.0),
                ],
                color: room.wall_color,
            },
        ]
    }

    // ---- asynchronous model resolution ----

    /// Marks a model asset as requested. Returns `false` if it is already
    /// pending or resolved (no new load should be started).
    pub fn begin_model_load(&mut self, asset: &AssetRef) -> bool {
        if self.assets.contains_key(asset) {
            return false;
        }
        self.assets.insert(asset.clone(), AssetState::Pending);
        true
    }

    /// Applies an async model-load result.
    ///
    /// The result is dropped unless some instance still references the
    /// asset: a load resolving after its last user was removed is a
    /// stale no-op, not an error. A failure flips the asset to
    /// [`AssetState::Failed`] so nodes render placeholders.
    pub fn apply_model_result(
        &mut self,
        scene: &SceneState,
        asset: &AssetRef,
        result: Result<ModelData, AssetError>,
    ) {
        let still_referenced = scene
            .instances()
            .iter()
            .any(|instance| &instance.model_asset == asset);
        if !still_referenced {
            debug!("Discarding stale model load for {}", asset);
            self.assets.remove(asset);
            return;
        }

        match result {
            Ok(model) => {
                self.assets.insert(asset.clone(), AssetState::Ready(model));
            }
            Err(err) => {
                warn!("Model {} failed to load: {}", asset, err);
                self.assets.insert(asset.clone(), AssetState::Failed);
            }
        }
    }

    /// Loads every model the scene references that has not been
    /// requested yet, applying each result as it lands.
    pub async fn load_missing_models(&mut self, store: &dyn AssetStore, scene: &SceneState) {
        let missing: Vec<AssetRef> = scene
            .instances()
            .iter()
            .map(|instance| instance.model_asset.clone())
            .filter(|asset| !self.assets.contains_key(asset))
            .collect();

        for asset in missing {
            if !self.begin_model_load(&asset) {
                continue;
            }
            let result = store.load_model(&asset).await;
            self.apply_model_result(scene, &asset, result);
        }
    }

    // ---- asynchronous texture resolution ----

    /// Applies an async texture-load result for the instance `target`.
    ///
    /// The result is a stale no-op when the instance no longer exists or
    /// its active texture has moved on since the load started. On
    /// failure the previous binding stays and a warning is surfaced;
    /// the viewer remains interactive.
    pub fn apply_texture_result(
        &mut self,
        scene: &SceneState,
        target: &InstanceId,
        expected: &AssetRef,
        result: Result<TextureData, AssetError>,
    ) {
        let Some(instance) = scene.instances().iter().find(|i| &i.id == target) else {
            debug!("Discarding stale texture load for removed instance {}", target);
            return;
        };
        if instance.active_texture.as_ref() != Some(expected) {
            debug!("Discarding stale texture load {} for {}", expected, target);
            return;
        }

        match result {
            Ok(texture) => {
                // Keep the prior binding's tiling when the new texture
                // has none of its own.
                let settings = texture.settings.unwrap_or_else(|| {
                    self.textures
                        .get(target)
                        .map(|binding| binding.settings)
                        .unwrap_or_default()
                });
                self.textures.insert(
                    target.clone(),
                    TextureBinding {
                        asset: expected.clone(),
                        settings,
                    },
                );
            }
            Err(err) => {
                warn!("Texture {} failed to load for {}: {}", expected, target, err);
            }
        }
    }

    /// Resolves the active texture of the instance at `index`, if any.
    pub async fn refresh_texture(
        &mut self,
        store: &dyn AssetStore,
        scene: &SceneState,
        index: usize,
    ) {
        let Some(instance) = scene.instance(index) else {
            return;
        };
        let Some(expected) = instance.active_texture.clone() else {
            // Texture cleared: drop any binding immediately.
            self.textures.remove(&instance.id);
            return;
        };
        let target = instance.id.clone();
        let result = store.load_texture(&expected).await;
        self.apply_texture_result(scene, &target, &expected, result);
    }
}
