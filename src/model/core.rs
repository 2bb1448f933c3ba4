use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::geometry::{Point, Rect, Size};

pub type ZoneId = String;

/// Generate an identifier for a newly created zone.
pub fn fresh_zone_id() -> ZoneId {
    format!("zone-{}", Uuid::new_v4())
}

/// Functional classification of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Compute,
    Workspace,
    Meeting,
    Storage,
    Utility,
    Entrance,
    Lab,
    Office,
    Break,
    /// Anything a generator produced that this engine does not recognise.
    #[serde(other)]
    Other,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Compute => "compute",
            ZoneType::Workspace => "workspace",
            ZoneType::Meeting => "meeting",
            ZoneType::Storage => "storage",
            ZoneType::Utility => "utility",
            ZoneType::Entrance => "entrance",
            ZoneType::Lab => "lab",
            ZoneType::Office => "office",
            ZoneType::Break => "break",
            ZoneType::Other => "other",
        }
    }
}

/// Structured equipment line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "price")]
    pub unit_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl EquipmentItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
        }
    }

    pub fn total_price(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Equipment as stored on a zone. Older layouts list equipment as bare names;
/// anything else that carries no usable price is kept verbatim as `Unpriced`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EquipmentEntry {
    Item(EquipmentItem),
    Legacy(String),
    Unpriced(Value),
}

impl From<EquipmentItem> for EquipmentEntry {
    fn from(item: EquipmentItem) -> Self {
        EquipmentEntry::Item(item)
    }
}

/// Rectangular region of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<EquipmentEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<String>,
}

impl Zone {
    pub fn new(
        id: impl Into<ZoneId>,
        name: impl Into<String>,
        zone_type: ZoneType,
        position: Point,
        size: Size,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_type,
            position,
            size,
            color: String::new(),
            equipment: Vec::new(),
            layer_id: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_equipment(mut self, entry: impl Into<EquipmentEntry>) -> Self {
        self.equipment.push(entry.into());
        self
    }

    pub fn with_layer(mut self, layer_id: impl Into<String>) -> Self {
        self.layer_id = Some(layer_id.into());
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn area(&self) -> f64 {
        self.size.area()
    }
}

/// Items that may be assigned to a layer.
pub trait Layered {
    fn layer_id(&self) -> Option<&str>;
}

impl Layered for Zone {
    fn layer_id(&self) -> Option<&str> {
        self.layer_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub unit: String,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, unit: impl Into<String>) -> Self {
        Self {
            width,
            height,
            unit: unit.into(),
        }
    }
}

/// A complete floor plan. Cloning yields an independent deep copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Layout {
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            dimensions,
            zones: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn zone_mut(&mut self, id: &str) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|zone| zone.id == id)
    }

    pub fn zone_by_name(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.name == name)
    }

    /// Deterministic digest of everything that affects analysis results.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.name.as_bytes());
        hasher.update(&self.dimensions.width.to_le_bytes());
        hasher.update(&self.dimensions.height.to_le_bytes());
        hasher.update(self.dimensions.unit.as_bytes());

        for zone in &self.zones {
            hasher.update(b"\x1fzone");
            hasher.update(zone.id.as_bytes());
            hasher.update(zone.name.as_bytes());
            hasher.update(zone.zone_type.as_str().as_bytes());
            for value in [
                zone.position.x,
                zone.position.y,
                zone.size.width,
                zone.size.height,
            ] {
                hasher.update(&value.to_le_bytes());
            }
            for entry in &zone.equipment {
                match entry {
                    EquipmentEntry::Item(item) => {
                        hasher.update(item.name.as_bytes());
                        hasher.update(item.category.as_bytes());
                        hasher.update(&item.unit_price.to_le_bytes());
                        hasher.update(&item.quantity.to_le_bytes());
                    }
                    EquipmentEntry::Legacy(name) => {
                        hasher.update(name.as_bytes());
                    }
                    EquipmentEntry::Unpriced(raw) => {
                        hasher.update(raw.to_string().as_bytes());
                    }
                }
            }
        }

        hasher.finalize().to_hex().to_string()
    }
}
