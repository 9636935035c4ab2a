//! Scene state: the placed furniture instances and the current selection.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::FurnitureDefinition;
use crate::instance::FurnitureInstance;

/// The ordered list of placed furniture plus the selected index.
///
/// Exclusively owned by [`crate::editor::LayoutEditor`]; view projections
/// read it but never mutate it directly. Instance order is z-order for the
/// plan view's hit testing (later means on top).
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    instances: Vec<FurnitureInstance>,
    selected: Option<usize>,
    /// Next placement index per definition id, so ids stay unique for the
    /// session even across removals.
    placement_counters: HashMap<String, u32>,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance from a catalog definition at the room origin
    /// with the first variant's texture, selects it, and returns its index.
    pub fn add_from_definition(&mut self, definition: &FurnitureDefinition) -> usize {
        let counter = self
            .placement_counters
            .entry(definition.id.clone())
            .or_insert(0);
        let instance = FurnitureInstance::from_definition(definition, *counter);
        *counter += 1;

        debug!("Placed {} ({})", instance.id, definition.name);
        self.instances.push(instance);
        let index = self.instances.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Removes the instance at `index`, returning it.
    ///
    /// Clears the selection if the removed instance was selected; shifts
    /// it if a later index was selected.
    pub fn remove(&mut self, index: usize) -> Option<FurnitureInstance> {
        if index >= self.instances.len() {
            return None;
        }
        let removed = self.instances.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        debug!("Removed {}", removed.id);
        Some(removed)
    }

    /// Selects the instance at `index`, or clears the selection.
    ///
    /// Returns `false` (leaving the selection untouched) for an invalid
    /// index.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.instances.len() => false,
            _ => {
                self.selected = index;
                true
            }
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_instance(&self) -> Option<&FurnitureInstance> {
        self.selected.and_then(|i| self.instances.get(i))
    }

    pub fn instances(&self) -> &[FurnitureInstance] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&FurnitureInstance> {
        self.instances.get(index)
    }

    pub(crate) fn instance_mut(&mut self, index: usize) -> Option<&mut FurnitureInstance> {
        self.instances.get_mut(index)
    }

    pub(crate) fn instances_mut(&mut self) -> &mut Vec<FurnitureInstance> {
        &mut self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drops all instances and the selection.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.selected = None;
        self.placement_counters.clear();
    }

    /// Replaces the whole instance list (project load). Selection clears
    /// and placement counters resume past the highest loaded index per
    /// definition.
    pub fn replace(&mut self, instances: Vec<FurnitureInstance>) {
        let mut counters: HashMap<String, u32> = HashMap::new();
        for instance in &instances {
            let next = instance.id.placement + 1;
            counters
                .entry(instance.id.definition_id.clone())
                .and_modify(|c| *c = (*c).max(next))
                .or_insert(next);
        }
        self.instances = instances;
        self.selected = None;
        self.placement_counters = counters;
    }
}
