use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlannerError, Result};
use crate::model::Layered;

pub type LayerId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Zones,
    Equipment,
    Annotations,
    Measurements,
    Guides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub visible: bool,
    pub locked: bool,
    /// Percentage in `0..=100`.
    pub opacity: u8,
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Layer {
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layer_type,
            visible: true,
            locked: false,
            opacity: 100,
            order: 0,
            color: None,
        }
    }
}

pub fn is_editable(layer: &Layer) -> bool {
    layer.visible && !layer.locked
}

/// Ordered list of layers owned by one editing session.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed set every session starts with.
    pub fn with_defaults() -> Self {
        let defaults = [
            ("layer-zones", "Zones", LayerType::Zones),
            ("layer-equipment", "Equipment", LayerType::Equipment),
            ("layer-annotations", "Annotations", LayerType::Annotations),
            ("layer-measurements", "Measurements", LayerType::Measurements),
            ("layer-guides", "Guides", LayerType::Guides),
        ];

        let layers = defaults
            .into_iter()
            .enumerate()
            .map(|(idx, (id, name, layer_type))| {
                let mut layer = Layer::new(id, name, layer_type);
                layer.order = idx as i32;
                layer
            })
            .collect();
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or_else(|| PlannerError::not_found("layer", id))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Layer> {
        let idx = self.position(id)?;
        Ok(&mut self.layers[idx])
    }

    /// Returns the new visibility.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool> {
        let layer = self.get_mut(id)?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Returns the new lock state.
    pub fn toggle_lock(&mut self, id: &str) -> Result<bool> {
        let layer = self.get_mut(id)?;
        layer.locked = !layer.locked;
        Ok(layer.locked)
    }

    /// Out-of-range values are clamped into `0..=100`; the stored value is returned.
    pub fn set_opacity(&mut self, id: &str, opacity: i32) -> Result<u8> {
        let layer = self.get_mut(id)?;
        layer.opacity = opacity.clamp(0, 100) as u8;
        Ok(layer.opacity)
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Append a new layer above every existing one.
    pub fn create(&mut self, name: impl Into<String>, layer_type: LayerType) -> LayerId {
        let id = format!("layer-{}", Uuid::new_v4());
        let mut layer = Layer::new(id.clone(), name, layer_type);
        layer.order = self
            .layers
            .iter()
            .map(|l| l.order + 1)
            .max()
            .unwrap_or(0);
        self.layers.push(layer);
        id
    }

    pub fn delete(&mut self, id: &str) -> Result<Layer> {
        let idx = self.position(id)?;
        Ok(self.layers.remove(idx))
    }

    /// Copy `id` directly after itself and renumber.
    pub fn duplicate(&mut self, id: &str) -> Result<LayerId> {
        let idx = self.position(id)?;
        let mut copy = self.layers[idx].clone();
        copy.id = format!("layer-{}", Uuid::new_v4());
        copy.name = format!("{} (copy)", copy.name);
        let new_id = copy.id.clone();

        self.layers.insert(idx + 1, copy);
        self.renumber();
        Ok(new_id)
    }

    /// Move the layer at `source` to `dest`, then renumber `order` densely.
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<()> {
        let len = self.layers.len();
        for index in [source, dest] {
            if index >= len {
                return Err(PlannerError::IndexOutOfRange { index, len });
            }
        }

        let layer = self.layers.remove(source);
        self.layers.insert(dest, layer);
        self.renumber();
        Ok(())
    }

    fn renumber(&mut self) {
        for (idx, layer) in self.layers.iter_mut().enumerate() {
            layer.order = idx as i32;
        }
    }

    /// Layers in paint order, lowest `order` first; ties keep list order.
    pub fn layers_for_rendering(&self) -> Vec<&Layer> {
        let mut sorted: Vec<&Layer> = self.layers.iter().collect();
        sorted.sort_by_key(|layer| layer.order);
        sorted
    }

    fn lookup(&self) -> HashMap<&str, &Layer> {
        self.layers
            .iter()
            .map(|layer| (layer.id.as_str(), layer))
            .collect()
    }

    /// Items on hidden layers are dropped. Unassigned items and items on
    /// unknown layers pass through.
    pub fn filter_visible<'a, T: Layered>(&self, items: &'a [T]) -> Vec<&'a T> {
        let lookup = self.lookup();
        items
            .iter()
            .filter(|item| {
                item.layer_id()
                    .and_then(|id| lookup.get(id))
                    .map(|layer| layer.visible)
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn filter_editable<'a, T: Layered>(&self, items: &'a [T]) -> Vec<&'a T> {
        let lookup = self.lookup();
        items
            .iter()
            .filter(|item| {
                item.layer_id()
                    .and_then(|id| lookup.get(id))
                    .map(|layer| is_editable(layer))
                    .unwrap_or(true)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::model::{Zone, ZoneType};

    fn orders(registry: &LayerRegistry) -> Vec<i32> {
        registry.layers().iter().map(|l| l.order).collect()
    }

    fn ids(registry: &LayerRegistry) -> Vec<String> {
        registry.layers().iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn reorder_renumbers_densely() {
        let mut registry = LayerRegistry::with_defaults();
        registry.reorder(0, 3).unwrap();
        assert_eq!(orders(&registry), vec![0, 1, 2, 3, 4]);
        assert_eq!(registry.layers()[3].id, "layer-zones");
    }

    #[test]
    fn reorder_in_place_is_noop() {
        let mut registry = LayerRegistry::with_defaults();
        let before = ids(&registry);
        registry.reorder(2, 2).unwrap();
        assert_eq!(ids(&registry), before);
        assert_eq!(orders(&registry), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn reorder_rejects_bad_index() {
        let mut registry = LayerRegistry::with_defaults();
        let err = registry.reorder(0, 9).unwrap_err();
        assert!(matches!(err, PlannerError::IndexOutOfRange { index: 9, len: 5 }));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut registry = LayerRegistry::with_defaults();
        assert_eq!(registry.set_opacity("layer-zones", 140).unwrap(), 100);
        assert_eq!(registry.set_opacity("layer-zones", -5).unwrap(), 0);
        assert_eq!(registry.set_opacity("layer-zones", 42).unwrap(), 42);
    }

    #[test]
    fn duplicate_inserts_after_source() {
        let mut registry = LayerRegistry::with_defaults();
        let new_id = registry.duplicate("layer-equipment").unwrap();
        assert_eq!(registry.layers()[2].id, new_id);
        assert_eq!(registry.layers()[2].name, "Equipment (copy)");
        assert_eq!(orders(&registry), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn create_and_delete() {
        let mut registry = LayerRegistry::with_defaults();
        let id = registry.create("Sketch", LayerType::Annotations);
        assert_eq!(registry.get(&id).unwrap().order, 5);
        registry.rename(&id, "Notes").unwrap();
        assert_eq!(registry.delete(&id).unwrap().name, "Notes");
        assert!(registry.get(&id).is_none());
        assert!(registry.delete(&id).is_err());
    }

    #[test]
    fn rendering_order_is_ascending() {
        let mut registry = LayerRegistry::with_defaults();
        registry.layers[0].order = 10;
        let names: Vec<_> = registry
            .layers_for_rendering()
            .into_iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names.first(), Some(&"Equipment"));
        assert_eq!(names.last(), Some(&"Zones"));
    }

    #[test]
    fn filters_respect_visibility_and_lock() {
        let mut registry = LayerRegistry::with_defaults();
        let zone = |id: &str| {
            Zone::new(
                id,
                id,
                ZoneType::Lab,
                Point::new(0.0, 0.0),
                Size::new(1.0, 1.0),
            )
        };
        let items = vec![
            zone("free"),
            zone("on-zones").with_layer("layer-zones"),
            zone("on-guides").with_layer("layer-guides"),
        ];

        registry.toggle_visibility("layer-guides").unwrap();
        registry.toggle_lock("layer-zones").unwrap();

        let visible: Vec<_> = registry
            .filter_visible(&items)
            .into_iter()
            .map(|z| z.id.as_str())
            .collect();
        assert_eq!(visible, vec!["free", "on-zones"]);

        let editable: Vec<_> = registry
            .filter_editable(&items)
            .into_iter()
            .map(|z| z.id.as_str())
            .collect();
        assert_eq!(editable, vec!["free"]);
    }
}
