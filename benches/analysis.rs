use criterion::{Criterion, black_box, criterion_group, criterion_main};
use labplan::snap::compute_alignment_guides;
use labplan::{
    CollaborationModel, Dimensions, Layout, MultiverseStore, PlannerConfig, Point, Rect, Size,
    Zone, ZoneType,
};

const ZONE_TYPES: [ZoneType; 6] = [
    ZoneType::Lab,
    ZoneType::Compute,
    ZoneType::Workspace,
    ZoneType::Meeting,
    ZoneType::Storage,
    ZoneType::Office,
];

fn build_layout(count: usize) -> Layout {
    let mut layout = Layout::new("bench", Dimensions::new(400.0, 400.0, "m"));
    for idx in 0..count {
        let col = (idx % 20) as f64;
        let row = (idx / 20) as f64;
        layout.zones.push(Zone::new(
            format!("zone-{idx}"),
            format!("Zone {idx}"),
            ZONE_TYPES[idx % ZONE_TYPES.len()],
            Point::new(col * 12.0, row * 9.0),
            Size::new(8.0, 6.0),
        ));
    }
    layout
}

fn collaboration_analysis(c: &mut Criterion) {
    let layout = build_layout(120);
    let model = CollaborationModel::default();
    c.bench_function("collaboration_analysis_120", |b| {
        b.iter(|| model.analyze(black_box(&layout)));
    });
}

fn alignment_guides(c: &mut Criterion) {
    let layout = build_layout(400);
    let others: Vec<Rect> = layout.zones.iter().map(|z| z.rect()).collect();
    let dragged = Rect::new(100.2, 80.1, 8.0, 6.0);
    c.bench_function("alignment_guides_400", |b| {
        b.iter(|| compute_alignment_guides(black_box(&dragged), black_box(&others), 0.5));
    });
}

fn multiverse_fusion(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let left = build_layout(60);
    let right = build_layout(80);
    c.bench_function("multiverse_fuse_60_80", |b| {
        b.iter(|| {
            let mut store = MultiverseStore::new(&config);
            let a = store.create_universe(&left, None);
            let bb = store.create_universe(&right, None);
            store.fuse(&[a, bb], "fused").expect("fuse")
        });
    });
}

criterion_group!(
    benches,
    collaboration_analysis,
    alignment_guides,
    multiverse_fusion
);
criterion_main!(benches);
