//! The placement engine.
//!
//! Turns a raw drag position into a legal furniture placement: clamp the
//! proposed center so the item's bounding rectangle stays inside the room,
//! then test it against every other instance's rectangle. Any overlap
//! rejects the move outright and the item stays at its last accepted
//! position — no slide-to-fit resolution. Partial sliding is ambiguous;
//! rejection is the policy, not an omission.
//!
//! Everything here is pure and O(n) in the instance count, cheap enough to
//! run synchronously inside pointer-move handlers.

use tracing::debug;

use roomplan_core::{wrap_radians, Footprint, Point3};

use crate::instance::FurnitureInstance;
use crate::room::RoomModel;

/// Smallest allowed uniform scale; keeps items from degenerating into
/// invisible slivers that can no longer be hit-tested.
pub const MIN_SCALE: f64 = 0.1;

/// Axis for the rotate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Outcome of a proposed move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementDecision {
    /// The (possibly clamped) position was accepted.
    Accepted { position: Point3 },
    /// The move collided with another instance and was discarded.
    Rejected {
        /// Index of the first blocking instance.
        blocking: usize,
    },
}

impl PlacementDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Clamps a proposed footprint center so the item stays fully inside the
/// room. An item larger than the room clamps to the room center —
/// degenerate, but defined.
pub fn clamp_to_room(room: &RoomModel, footprint: Footprint, x: f64, z: f64) -> (f64, f64) {
    let clamped_x = clamp_axis(x, footprint.half_width, room.width());
    let clamped_z = clamp_axis(z, footprint.half_depth, room.length());
    (clamped_x, clamped_z)
}

fn clamp_axis(center: f64, half_extent: f64, span: f64) -> f64 {
    if half_extent * 2.0 > span {
        span / 2.0
    } else {
        center.clamp(half_extent, span - half_extent)
    }
}

/// Resolves a proposed move of `instances[index]` to `(x, z)`.
///
/// The moving item is never compared against itself. The instance's
/// height offset (`y`) is carried through unchanged; dragging only moves
/// items on the floor plane.
pub fn resolve_move(
    room: &RoomModel,
    instances: &[FurnitureInstance],
    index: usize,
    x: f64,
    z: f64,
) -> PlacementDecision {
    let moving = &instances[index];
    let footprint = moving.footprint();
    let (cx, cz) = clamp_to_room(room, footprint, x, z);
    let candidate = footprint.rect_at(cx, cz);

    for (other_index, other) in instances.iter().enumerate() {
        if other_index == index {
            continue;
        }
        if candidate.overlaps(&other.bounding_rect()) {
            debug!(
                "Placement of {} at ({:.2}, {:.2}) blocked by {}",
                moving.id, cx, cz, other.id
            );
            return PlacementDecision::Rejected {
                blocking: other_index,
            };
        }
    }

    PlacementDecision::Accepted {
        position: Point3::new(cx, moving.position.y, cz),
    }
}

/// Re-runs the boundary clamp for every instance against the current room
/// bounds, returning how many instances moved.
///
/// Called after a room resize so shrinking the room cannot strand
/// furniture outside the new walls. Pairwise collisions are deliberately
/// not re-checked here; a resize never rejects.
pub fn reclamp_all(room: &RoomModel, instances: &mut [FurnitureInstance]) -> usize {
    let mut moved = 0;
    for instance in instances.iter_mut() {
        let (cx, cz) = clamp_to_room(
            room,
            instance.footprint(),
            instance.position.x,
            instance.position.z,
        );
        if cx != instance.position.x || cz != instance.position.z {
            instance.position.x = cx;
            instance.position.z = cz;
            moved += 1;
        }
    }
    if moved > 0 {
        debug!("Room resize re-clamped {} instance(s)", moved);
    }
    moved
}

/// Accumulates rotation on one axis. The delta arrives in degrees (the
/// unit pointer/keyboard increments are expressed in); storage stays in
/// canonical radians, wrapped into one turn.
pub fn apply_rotation(instance: &mut FurnitureInstance, axis: RotationAxis, degrees: f64) {
    let delta = degrees.to_radians();
    let target = match axis {
        RotationAxis::X => &mut instance.rotation.x,
        RotationAxis::Y => &mut instance.rotation.y,
        RotationAxis::Z => &mut instance.rotation.z,
    };
    *target = wrap_radians(*target + delta);
}

/// Multiplies the instance's uniform scale, floored at [`MIN_SCALE`].
pub fn apply_scale(instance: &mut FurnitureInstance, factor: f64) {
    instance.scale = (instance.scale * factor).max(MIN_SCALE);
}
