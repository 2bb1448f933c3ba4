use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Layout, Zone, fresh_zone_id};

/// How fusion resolves zones that collide across inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionStrategy {
    /// Same name: the earliest zone is kept, later ones are dropped.
    #[default]
    FirstWins,
    /// Same name: the latest zone replaces the earlier one in place.
    LastWins,
    /// Same name: later zones are kept and renamed `Name (2)`, `Name (3)`...
    Suffix,
    /// Same zone id: the earliest zone is kept. Names may repeat.
    ById,
}

/// What happens to branches whose parent universe is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Children keep pointing at the deleted id.
    #[default]
    KeepDangling,
    /// Children lose their `parent_id`.
    DetachChildren,
    /// Deleting a universe with children fails.
    RejectWithChildren,
}

/// Union of the zones of `layouts` in input order, collisions resolved by
/// `strategy`. Every surviving zone gets a fresh id.
pub fn merge_zones(layouts: &[&Layout], strategy: FusionStrategy) -> Vec<Zone> {
    let all = layouts.iter().flat_map(|layout| layout.zones.iter());
    let mut merged: Vec<Zone> = Vec::new();

    match strategy {
        FusionStrategy::FirstWins => {
            let mut seen = HashSet::new();
            for zone in all {
                if seen.insert(zone.name.as_str()) {
                    merged.push(zone.clone());
                }
            }
        }
        FusionStrategy::LastWins => {
            let mut slots: HashMap<&str, usize> = HashMap::new();
            for zone in all {
                match slots.get(zone.name.as_str()) {
                    Some(slot) => merged[*slot] = zone.clone(),
                    None => {
                        slots.insert(zone.name.as_str(), merged.len());
                        merged.push(zone.clone());
                    }
                }
            }
        }
        FusionStrategy::Suffix => {
            let mut taken: HashSet<String> = HashSet::new();
            for zone in all {
                let mut candidate = zone.clone();
                let mut n = 2;
                while taken.contains(&candidate.name) {
                    candidate.name = format!("{} ({n})", zone.name);
                    n += 1;
                }
                taken.insert(candidate.name.clone());
                merged.push(candidate);
            }
        }
        FusionStrategy::ById => {
            let mut seen = HashSet::new();
            for zone in all {
                if seen.insert(zone.id.as_str()) {
                    merged.push(zone.clone());
                }
            }
        }
    }

    for zone in &mut merged {
        zone.id = fresh_zone_id();
    }
    merged
}
