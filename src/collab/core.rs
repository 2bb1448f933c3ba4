use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::matrix::{IntensityLevel, default_intensity};
use crate::config::{CollaborationConfig, PlannerConfig};
use crate::geometry::{raw_distance, round_to};
use crate::model::{Layout, Zone, ZoneId};
use crate::safety::detect_overlaps;

/// Extra penalty applied to high-intensity pairs at or beyond the warning distance.
const HIGH_INTENSITY_FAR_FACTOR: f64 = 0.8;
/// Share of the overlap ratio recovered by pulling an overlapping pair apart.
const MOVE_APART_GAIN: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationLink {
    pub id: String,
    pub source_zone_id: ZoneId,
    pub target_zone_id: ZoneId,
    pub intensity: IntensityLevel,
    pub auto_inferred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_weight: Option<f64>,
}

impl CollaborationLink {
    fn link_id(source: &str, target: &str) -> String {
        format!("{source}~{target}")
    }

    fn connects(&self, a: &str, b: &str) -> bool {
        (self.source_zone_id == a && self.target_zone_id == b)
            || (self.source_zone_id == b && self.target_zone_id == a)
    }

    /// Aggregation weight: the custom weight (0..1) rescaled onto the
    /// intensity scale, or the intensity weight itself.
    pub fn weight(&self) -> f64 {
        self.custom_weight
            .map(|w| w.clamp(0.0, 1.0) * IntensityLevel::High.weight())
            .unwrap_or_else(|| self.intensity.weight())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Optimal,
    Acceptable,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAssessment {
    pub link: CollaborationLink,
    /// Center-to-center distance in physical units.
    pub distance: f64,
    pub efficiency: f64,
    pub status: LinkStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Excellent,
    Good,
    Moderate,
    NeedsImprovement,
    Critical,
}

impl SafetyLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => SafetyLevel::Excellent,
            s if s >= 70.0 => SafetyLevel::Good,
            s if s >= 50.0 => SafetyLevel::Moderate,
            s if s >= 30.0 => SafetyLevel::NeedsImprovement,
            _ => SafetyLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    MoveCloser,
    MoveApart,
    Cluster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub zone_ids: Vec<ZoneId>,
    pub message: String,
    /// Efficiency points recoverable by acting on this recommendation.
    pub estimated_improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationReport {
    pub assessments: Vec<LinkAssessment>,
    pub overall_score: f64,
    pub safety_level: SafetyLevel,
    pub recommendations: Vec<Recommendation>,
}

impl CollaborationReport {
    /// Assessments ordered worst first.
    pub fn worst_links(&self, limit: usize) -> Vec<&LinkAssessment> {
        let mut sorted: Vec<&LinkAssessment> = self.assessments.iter().collect();
        sorted.sort_by(|a, b| {
            b.status
                .cmp(&a.status)
                .then(a.efficiency.total_cmp(&b.efficiency))
        });
        sorted.truncate(limit);
        sorted
    }
}

/// Map a physical distance and intensity onto `(efficiency, status)`.
///
/// Efficiency is 100 up to the optimal distance and decays exponentially
/// beyond it; the decay is steeper for more intense pairs. Severity beyond the
/// warning distance depends on intensity: high pairs are critical, medium
/// pairs turn critical past the critical distance, low pairs never do.
pub fn score_distance(
    distance: f64,
    intensity: IntensityLevel,
    config: &CollaborationConfig,
) -> (f64, LinkStatus) {
    if distance <= config.optimal_distance {
        return (100.0, LinkStatus::Optimal);
    }

    let mut efficiency =
        100.0 * (-intensity.decay_rate() * (distance - config.optimal_distance)).exp();
    let far = distance >= config.warning_distance;
    if far && intensity == IntensityLevel::High {
        efficiency *= HIGH_INTENSITY_FAR_FACTOR;
    }

    let status = if !far {
        LinkStatus::Acceptable
    } else {
        let beyond_critical = distance >= config.critical_distance;
        match intensity {
            IntensityLevel::High => LinkStatus::Critical,
            IntensityLevel::Medium if beyond_critical => LinkStatus::Critical,
            IntensityLevel::Medium => LinkStatus::Warning,
            IntensityLevel::Low if beyond_critical => LinkStatus::Warning,
            IntensityLevel::Low => LinkStatus::Acceptable,
        }
    };

    (round_to(efficiency.clamp(0.0, 100.0), 1), status)
}

/// Scores a layout's zone pairs. Holds per-pair overrides of the default
/// intensity matrix.
#[derive(Debug, Clone)]
pub struct CollaborationModel {
    config: CollaborationConfig,
    grid_size: f64,
    overrides: Vec<CollaborationLink>,
}

impl Default for CollaborationModel {
    fn default() -> Self {
        Self::new(CollaborationConfig::default(), 1.0)
    }
}

impl CollaborationModel {
    pub fn new(config: CollaborationConfig, grid_size: f64) -> Self {
        Self {
            config,
            grid_size,
            overrides: Vec::new(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.collaboration.clone(), config.grid_size)
    }

    pub fn config(&self) -> &CollaborationConfig {
        &self.config
    }

    pub fn overrides(&self) -> &[CollaborationLink] {
        &self.overrides
    }

    /// Override the inferred intensity for one pair (either direction).
    pub fn set_link(
        &mut self,
        source: &str,
        target: &str,
        intensity: IntensityLevel,
        custom_weight: Option<f64>,
    ) -> String {
        self.overrides.retain(|link| !link.connects(source, target));
        let link = CollaborationLink {
            id: CollaborationLink::link_id(source, target),
            source_zone_id: source.to_string(),
            target_zone_id: target.to_string(),
            intensity,
            auto_inferred: false,
            custom_weight: custom_weight.map(|w| w.clamp(0.0, 1.0)),
        };
        let id = link.id.clone();
        self.overrides.push(link);
        id
    }

    pub fn remove_link(&mut self, source: &str, target: &str) -> bool {
        let before = self.overrides.len();
        self.overrides.retain(|link| !link.connects(source, target));
        before != self.overrides.len()
    }

    fn inferred(a: &Zone, b: &Zone) -> CollaborationLink {
        CollaborationLink {
            id: CollaborationLink::link_id(&a.id, &b.id),
            source_zone_id: a.id.clone(),
            target_zone_id: b.id.clone(),
            intensity: default_intensity(a.zone_type, b.zone_type),
            auto_inferred: true,
            custom_weight: None,
        }
    }

    /// One link per unordered zone pair: the override when present, the
    /// matrix default otherwise.
    pub fn links_for(&self, layout: &Layout) -> Vec<CollaborationLink> {
        let mut links = Vec::new();
        for (i, a) in layout.zones.iter().enumerate() {
            for b in &layout.zones[i + 1..] {
                let link = self
                    .overrides
                    .iter()
                    .find(|link| link.connects(&a.id, &b.id))
                    .cloned()
                    .unwrap_or_else(|| Self::inferred(a, b));
                links.push(link);
            }
        }
        links
    }

    fn physical_distance(&self, a: &Zone, b: &Zone) -> f64 {
        round_to(raw_distance(a.center(), b.center()) * self.grid_size, 2)
    }

    /// `None` when either endpoint is missing from `layout`.
    pub fn assess_link(&self, link: &CollaborationLink, layout: &Layout) -> Option<LinkAssessment> {
        let a = layout.zone(&link.source_zone_id)?;
        let b = layout.zone(&link.target_zone_id)?;
        let distance = self.physical_distance(a, b);
        let (efficiency, status) = score_distance(distance, link.intensity, &self.config);
        Some(LinkAssessment {
            link: link.clone(),
            distance,
            efficiency,
            status,
        })
    }

    pub fn analyze(&self, layout: &Layout) -> CollaborationReport {
        let assessments: Vec<LinkAssessment> = self
            .links_for(layout)
            .iter()
            .filter_map(|link| self.assess_link(link, layout))
            .collect();

        let overall_score = overall_score(&assessments);
        let mut recommendations = self.move_closer(&assessments);
        recommendations.extend(move_apart(layout));
        recommendations.extend(self.clusters(layout, &assessments));
        recommendations.sort_by(|a, b| b.estimated_improvement.total_cmp(&a.estimated_improvement));
        recommendations.truncate(self.config.max_recommendations);

        CollaborationReport {
            assessments,
            overall_score,
            safety_level: SafetyLevel::from_score(overall_score),
            recommendations,
        }
    }

    fn move_closer(&self, assessments: &[LinkAssessment]) -> Vec<Recommendation> {
        assessments
            .iter()
            .filter(|a| {
                a.link.intensity >= IntensityLevel::Medium && a.status >= LinkStatus::Warning
            })
            .map(|a| Recommendation {
                kind: RecommendationKind::MoveCloser,
                zone_ids: vec![a.link.source_zone_id.clone(), a.link.target_zone_id.clone()],
                message: format!(
                    "{:?}-intensity pair is {:.1} apart; bring it within {:.1}",
                    a.link.intensity, a.distance, self.config.optimal_distance
                ),
                estimated_improvement: round_to(100.0 - a.efficiency, 1),
            })
            .collect()
    }

    fn close_high_link<'a>(
        &self,
        assessments: &'a [LinkAssessment],
        a: &str,
        b: &str,
    ) -> Option<&'a LinkAssessment> {
        assessments.iter().find(|s| {
            s.link.connects(a, b)
                && s.link.intensity == IntensityLevel::High
                && s.distance < self.config.warning_distance
        })
    }

    /// Groups of three or more zones that all collaborate heavily and already
    /// sit within the warning distance of each other.
    fn clusters(&self, layout: &Layout, assessments: &[LinkAssessment]) -> Vec<Recommendation> {
        let mut seen: HashSet<Vec<ZoneId>> = HashSet::new();
        let mut recommendations = Vec::new();

        for seed in &layout.zones {
            let mut members: Vec<&str> = vec![seed.id.as_str()];
            for candidate in &layout.zones {
                if members.contains(&candidate.id.as_str()) {
                    continue;
                }
                if members
                    .iter()
                    .all(|m| self.close_high_link(assessments, m, &candidate.id).is_some())
                {
                    members.push(candidate.id.as_str());
                }
            }
            if members.len() < 3 {
                continue;
            }

            let mut key: Vec<ZoneId> = members.iter().map(|m| m.to_string()).collect();
            key.sort();
            if !seen.insert(key.clone()) {
                continue;
            }

            let mut gaps = Vec::new();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    if let Some(assessment) = self.close_high_link(assessments, a, b) {
                        gaps.push(100.0 - assessment.efficiency);
                    }
                }
            }
            let mean_gap = gaps.iter().sum::<f64>() / gaps.len().max(1) as f64;

            recommendations.push(Recommendation {
                kind: RecommendationKind::Cluster,
                message: format!("keep {} as a collaboration cluster", key.join(", ")),
                zone_ids: key,
                estimated_improvement: round_to(mean_gap, 1),
            });
        }

        recommendations
    }
}

fn overall_score(assessments: &[LinkAssessment]) -> f64 {
    let total_weight: f64 = assessments.iter().map(|a| a.link.weight()).sum();
    if total_weight <= 0.0 {
        return 100.0;
    }
    let weighted: f64 = assessments
        .iter()
        .map(|a| a.efficiency * a.link.weight())
        .sum();
    round_to(weighted / total_weight, 1)
}

fn move_apart(layout: &Layout) -> Vec<Recommendation> {
    detect_overlaps(layout)
        .into_iter()
        .filter_map(|overlap| {
            let a = layout.zone(&overlap.a)?;
            let b = layout.zone(&overlap.b)?;
            let smaller = a.area().min(b.area());
            let ratio = if smaller > 0.0 { overlap.area / smaller } else { 1.0 };
            Some(Recommendation {
                kind: RecommendationKind::MoveApart,
                message: format!("{} and {} overlap; separate them", a.name, b.name),
                zone_ids: vec![overlap.a, overlap.b],
                estimated_improvement: round_to(ratio.min(1.0) * MOVE_APART_GAIN, 1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::model::{Dimensions, ZoneType};

    fn zone(id: &str, zone_type: ZoneType, x: f64, y: f64) -> Zone {
        Zone::new(id, id, zone_type, Point::new(x, y), Size::new(2.0, 2.0))
    }

    fn layout(zones: Vec<Zone>) -> Layout {
        let mut layout = Layout::new("t", Dimensions::new(200.0, 200.0, "m"));
        layout.zones = zones;
        layout
    }

    #[test]
    fn adjacent_high_pair_is_optimal() {
        let plan = layout(vec![
            zone("a", ZoneType::Lab, 0.0, 0.0),
            zone("b", ZoneType::Compute, 3.0, 0.0),
        ]);
        let report = CollaborationModel::default().analyze(&plan);

        let assessment = &report.assessments[0];
        assert_eq!(assessment.distance, 3.0);
        assert_eq!(assessment.link.intensity, IntensityLevel::High);
        assert!(assessment.status <= LinkStatus::Acceptable);
        assert_eq!(assessment.efficiency, 100.0);
        assert_eq!(report.overall_score, 100.0);
        assert_eq!(report.safety_level, SafetyLevel::Excellent);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn intensity_modulates_severity() {
        let config = CollaborationConfig::default();
        let (high_eff, high) = score_distance(35.0, IntensityLevel::High, &config);
        let (low_eff, low) = score_distance(35.0, IntensityLevel::Low, &config);
        assert_eq!(high, LinkStatus::Critical);
        assert_eq!(low, LinkStatus::Acceptable);
        assert!(high_eff < low_eff);

        let (_, medium_far) = score_distance(60.0, IntensityLevel::Medium, &config);
        assert_eq!(medium_far, LinkStatus::Critical);
        let (_, low_far) = score_distance(60.0, IntensityLevel::Low, &config);
        assert_eq!(low_far, LinkStatus::Warning);
    }

    #[test]
    fn grid_size_scales_distance() {
        let plan = layout(vec![
            zone("a", ZoneType::Lab, 0.0, 0.0),
            zone("b", ZoneType::Lab, 3.0, 4.0),
        ]);
        let model = CollaborationModel::new(CollaborationConfig::default(), 2.5);
        let report = model.analyze(&plan);
        assert_eq!(report.assessments[0].distance, 12.5);
        assert_eq!(report.assessments[0].status, LinkStatus::Acceptable);
    }

    #[test]
    fn override_replaces_inferred_intensity() {
        let plan = layout(vec![
            zone("a", ZoneType::Entrance, 0.0, 0.0),
            zone("b", ZoneType::Compute, 40.0, 0.0),
        ]);
        let mut model = CollaborationModel::default();
        assert_eq!(
            model.analyze(&plan).assessments[0].link.intensity,
            IntensityLevel::Low
        );

        model.set_link("b", "a", IntensityLevel::High, Some(2.0));
        let report = model.analyze(&plan);
        let link = &report.assessments[0].link;
        assert_eq!(link.intensity, IntensityLevel::High);
        assert!(!link.auto_inferred);
        assert_eq!(link.custom_weight, Some(1.0));
        assert_eq!(report.assessments[0].status, LinkStatus::Critical);
        assert_eq!(
            report.recommendations[0].kind,
            RecommendationKind::MoveCloser
        );

        assert!(model.remove_link("a", "b"));
        assert!(model.overrides().is_empty());
    }

    #[test]
    fn overall_score_weights_by_intensity() {
        let plan = layout(vec![
            zone("l1", ZoneType::Lab, 0.0, 0.0),
            zone("l2", ZoneType::Lab, 100.0, 0.0),
        ]);
        let report = CollaborationModel::default().analyze(&plan);
        let eff = report.assessments[0].efficiency;
        assert_eq!(report.overall_score, eff);
        assert!(report.overall_score < 30.0);
        assert_eq!(report.safety_level, SafetyLevel::Critical);
    }

    #[test]
    fn recommendations_rank_by_improvement() {
        let plan = layout(vec![
            zone("w1", ZoneType::Workspace, 0.0, 0.0),
            zone("w2", ZoneType::Workspace, 1.0, 0.0),
            zone("w3", ZoneType::Workspace, 0.0, 3.0),
            zone("lab", ZoneType::Lab, 120.0, 0.0),
        ]);
        let report = CollaborationModel::default().analyze(&plan);

        let kinds: Vec<_> = report.recommendations.iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&RecommendationKind::MoveCloser));
        assert!(kinds.contains(&RecommendationKind::MoveApart));
        assert!(kinds.contains(&RecommendationKind::Cluster));
        for pair in report.recommendations.windows(2) {
            assert!(pair[0].estimated_improvement >= pair[1].estimated_improvement);
        }

        let cluster = report
            .recommendations
            .iter()
            .find(|r| r.kind == RecommendationKind::Cluster)
            .unwrap();
        assert_eq!(cluster.zone_ids, vec!["w1", "w2", "w3"]);
    }

    #[test]
    fn worst_links_puts_critical_first() {
        let plan = layout(vec![
            zone("a", ZoneType::Lab, 0.0, 0.0),
            zone("b", ZoneType::Lab, 2.0, 0.0),
            zone("c", ZoneType::Lab, 80.0, 0.0),
        ]);
        let report = CollaborationModel::default().analyze(&plan);
        let worst = report.worst_links(1);
        assert_eq!(worst[0].status, LinkStatus::Critical);
    }
}
