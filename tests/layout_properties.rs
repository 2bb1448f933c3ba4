//! Property-style invariants for the geometry kernel, layers, measurements,
//! the collaboration model and the multiverse store.

use labplan::collab::score_distance;
use labplan::geometry::{angle, distance, perimeter, rectangle_area};
use labplan::snap::compute_alignment_guides;
use labplan::{
    CollaborationConfig, CollaborationModel, Dimensions, EquipmentItem, FusionStrategy,
    GuideOrientation, IntensityLevel, LayerRegistry, Layout, LinkStatus, MAX_COMPARISON,
    MeasurementKind, MeasurementSession, MultiverseStore, PlannerConfig, Point, Rect, Size, Zone,
    ZoneType, budget,
};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn half_steps() -> impl Strategy<Value = f64> {
    (1u32..4000).prop_map(|n| f64::from(n) * 0.5)
}

fn intensity() -> impl Strategy<Value = IntensityLevel> {
    prop_oneof![
        Just(IntensityLevel::Low),
        Just(IntensityLevel::Medium),
        Just(IntensityLevel::High),
    ]
}

proptest! {
    #[test]
    fn distance_is_symmetric(x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord()) {
        let p1 = Point::new(x1, y1);
        let p2 = Point::new(x2, y2);
        prop_assert_eq!(distance(p1, p2), distance(p2, p1));
        prop_assert_eq!(distance(p1, p1), 0.0);
    }

    #[test]
    fn rectangle_formulas(w in half_steps(), h in half_steps()) {
        prop_assert_eq!(perimeter(w, h), 2.0 * (w + h));
        prop_assert_eq!(rectangle_area(w, h), w * h);
    }

    #[test]
    fn angle_stays_in_half_turn(
        ax in coord(), ay in coord(), vx in coord(), vy in coord(), bx in coord(), by in coord()
    ) {
        let a = Point::new(ax, ay);
        let v = Point::new(vx, vy);
        let b = Point::new(bx, by);
        let forward = angle(a, v, b);
        prop_assert!((0.0..=180.0).contains(&forward));
        prop_assert_eq!(forward, angle(b, v, a));
    }

    #[test]
    fn shared_left_edge_always_guides(
        x in 0.0f64..100.0,
        threshold in 0.0f64..5.0,
        w1 in 1.0f64..20.0,
        w2 in 1.0f64..20.0,
    ) {
        let dragged = Rect::new(x, 0.0, w1, 3.0);
        let other = Rect::new(x, 50.0, w2, 3.0);
        let guides = compute_alignment_guides(&dragged, &[other], threshold);
        prop_assert!(guides
            .iter()
            .any(|g| g.orientation == GuideOrientation::Vertical && g.position == x));
    }

    #[test]
    fn edges_past_threshold_never_guide(threshold in 0u32..5, w in 1u32..10) {
        let threshold = f64::from(threshold);
        let w = f64::from(w);
        let dragged = Rect::new(0.0, 0.0, w, w);
        let other = Rect::new(w + threshold + 1.0, 100.0, w, w);
        prop_assert!(compute_alignment_guides(&dragged, &[other], threshold).is_empty());
    }

    #[test]
    fn reorder_keeps_dense_orders(moves in proptest::collection::vec((0usize..5, 0usize..5), 0..20)) {
        let mut registry = LayerRegistry::with_defaults();
        for (from, to) in moves {
            registry.reorder(from, to).unwrap();
            let orders: Vec<i32> = registry.layers().iter().map(|l| l.order).collect();
            prop_assert_eq!(orders, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn measurement_history_grows_by_one(points in proptest::collection::vec((coord(), coord()), 3)) {
        for kind in [MeasurementKind::Distance, MeasurementKind::Area, MeasurementKind::Angle] {
            let mut session = MeasurementSession::default();
            session.set_mode(kind);
            for (x, y) in points.iter().take(kind.required_points()) {
                session.add_point(Point::new(*x, *y));
            }
            prop_assert_eq!(session.history().len(), 1);
            prop_assert!(session.points().is_empty());
            session.add_point(Point::new(0.0, 0.0));
            session.cancel();
            prop_assert_eq!(session.history().len(), 1);
        }
    }

    #[test]
    fn efficiency_never_rises_with_distance(
        d1 in 0.0f64..200.0,
        extra in 0.0f64..200.0,
        level in intensity(),
    ) {
        let config = CollaborationConfig::default();
        let (near, _) = score_distance(d1, level, &config);
        let (far, _) = score_distance(d1 + extra, level, &config);
        prop_assert!(far <= near);
    }

    #[test]
    fn high_intensity_is_at_least_as_severe(d in 30.0f64..500.0) {
        let config = CollaborationConfig::default();
        let (_, high) = score_distance(d, IntensityLevel::High, &config);
        let (_, medium) = score_distance(d, IntensityLevel::Medium, &config);
        let (_, low) = score_distance(d, IntensityLevel::Low, &config);
        prop_assert!(high >= medium);
        prop_assert!(medium >= low);
    }

    #[test]
    fn comparison_never_exceeds_cap(picks in proptest::collection::vec(0usize..6, 0..30)) {
        let mut store = MultiverseStore::new(&PlannerConfig::default());
        let empty = Layout::new("e", Dimensions::new(10.0, 10.0, "m"));
        let ids: Vec<_> = (0..6).map(|_| store.create_universe(&empty, None)).collect();
        for pick in picks {
            store.add_to_comparison(&ids[pick]);
            prop_assert!(store.comparison_ids().len() <= MAX_COMPARISON);
        }
    }
}

fn square(id: &str, name: &str, zone_type: ZoneType, x: f64) -> Zone {
    Zone::new(id, name, zone_type, Point::new(x, 0.0), Size::new(2.0, 2.0))
}

#[test]
fn adjacent_high_pair_lands_in_optimal_band() {
    let layout = Layout::new("scenario", Dimensions::new(20.0, 20.0, "m"))
        .with_zone(square("a", "Lab", ZoneType::Lab, 0.0))
        .with_zone(square("b", "Bench", ZoneType::Lab, 3.0));
    let report = CollaborationModel::default().analyze(&layout);

    let assessment = &report.assessments[0];
    assert_eq!(assessment.distance, 3.0);
    assert_eq!(assessment.link.intensity, IntensityLevel::High);
    assert_eq!(assessment.status, LinkStatus::Optimal);
}

#[test]
fn budget_totals_are_consistent() {
    let layout = Layout::new("budget", Dimensions::new(20.0, 20.0, "m"))
        .with_zone(
            square("a", "Lab", ZoneType::Lab, 0.0)
                .with_equipment(EquipmentItem::new("Bench", "furniture", 100.0, 2)),
        )
        .with_zone(
            square("b", "Office", ZoneType::Office, 5.0)
                .with_equipment(EquipmentItem::new("Desk", "furniture", 50.0, 1)),
        );

    let summary = budget::summarize(&layout);
    assert_eq!(summary.total_cost, 250.0);
    assert_eq!(summary.cost_by_category.values().sum::<f64>(), 250.0);
    assert_eq!(summary.cost_by_zone.values().sum::<f64>(), 250.0);
}

#[test]
fn fusion_of_lab_and_lab_office() {
    let mut store = MultiverseStore::new(&PlannerConfig::default());
    let a = store.create_universe(
        &Layout::new("A", Dimensions::new(20.0, 20.0, "m"))
            .with_zone(square("a-lab", "Lab", ZoneType::Lab, 0.0)),
        Some("A"),
    );
    let b = store.create_universe(
        &Layout::new("B", Dimensions::new(30.0, 20.0, "m"))
            .with_zone(square("b-lab", "Lab", ZoneType::Lab, 4.0))
            .with_zone(square("b-office", "Office", ZoneType::Office, 8.0)),
        Some("B"),
    );

    let fused = store
        .fuse_universes(&[a, b], FusionStrategy::FirstWins, "A+B")
        .unwrap();
    let universe = store.get(&fused).unwrap();

    let mut names: Vec<_> = universe
        .layout
        .zones
        .iter()
        .map(|z| z.name.as_str())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Lab", "Office"]);
    for zone in &universe.layout.zones {
        assert!(!["a-lab", "b-lab", "b-office"].contains(&zone.id.as_str()));
    }
    assert_eq!(universe.layout.dimensions.width, 20.0);
}
