use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{EquipmentEntry, Layout, ZoneId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub zone_id: ZoneId,
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub total_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub lines: Vec<BudgetLine>,
    pub cost_by_category: BTreeMap<String, f64>,
    pub cost_by_zone: BTreeMap<ZoneId, f64>,
    pub total_cost: f64,
    /// Bare-name or unpriced equipment entries.
    pub skipped_entries: usize,
}

pub fn summarize(layout: &Layout) -> BudgetSummary {
    let mut summary = BudgetSummary::default();

    for zone in &layout.zones {
        for entry in &zone.equipment {
            let item = match entry {
                EquipmentEntry::Item(item) => item,
                EquipmentEntry::Legacy(_) | EquipmentEntry::Unpriced(_) => {
                    summary.skipped_entries += 1;
                    continue;
                }
            };

            let total_price = item.total_price();
            *summary
                .cost_by_category
                .entry(item.category.clone())
                .or_insert(0.0) += total_price;
            *summary.cost_by_zone.entry(zone.id.clone()).or_insert(0.0) += total_price;
            summary.total_cost += total_price;
            summary.lines.push(BudgetLine {
                zone_id: zone.id.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total_price,
            });
        }
    }

    summary
}
