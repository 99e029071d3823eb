//! Performance benchmarks for poi-cluster
//!
//! Run with: cargo bench
//!
//! Covers index construction, cluster queries at representative zooms, and
//! the memoized top-level recomputation.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use geo::Point;
use poi_cluster::{
    BoundingBox, ClusterConfig, ClusterIndex, Config, PoiCollection, PointFeature,
    PointOfInterest, Region, ViewportDimensions,
};

/// Generate a POI spread around a base coordinate with mild jitter
fn generate_pois(count: usize, base_lat: f64, base_lng: f64) -> Vec<PointOfInterest> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let lat = base_lat + t * 0.5 + (t * 50.0).sin() * 0.01;
            let lng = base_lng + t * 0.5 + (t * 30.0).cos() * 0.01;
            PointOfInterest::new(format!("poi-{i}"), lat, lng)
        })
        .collect()
}

fn generate_features(count: usize) -> Vec<PointFeature> {
    generate_pois(count, 51.5, -0.1)
        .iter()
        .map(PointFeature::from_poi)
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    for count in [1_000, 10_000] {
        let features = generate_features(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_points"), |b| {
            b.iter(|| ClusterIndex::build(ClusterConfig::default(), &features).unwrap());
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let features = generate_features(10_000);
    let index = ClusterIndex::build(ClusterConfig::default(), &features).unwrap();

    // Small viewport (detailed view)
    let small_bbox = BoundingBox::new(-0.11, 51.50, -0.09, 51.52);
    group.bench_function("small_viewport_10k", |b| {
        b.iter(|| index.get_clusters(&small_bbox, 14));
    });

    // Large viewport (overview)
    let large_bbox = BoundingBox::new(-2.0, 50.0, 2.0, 53.0);
    group.bench_function("large_viewport_10k", |b| {
        b.iter(|| index.get_clusters(&large_bbox, 7));
    });

    group.finish();
}

fn bench_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");
    group.sample_size(20);

    let pois = generate_pois(10_000, 51.5, -0.1);
    let mut collection = PoiCollection::new(Config::default()).unwrap();
    collection.set_pois(pois).unwrap();
    collection.set_dimensions(ViewportDimensions::new(1920.0, 1080.0));

    // Alternate between two regions to defeat the memoization cache
    let region_a = Region::new(Point::new(-0.1, 51.5), 0.2, 0.3);
    let region_b = Region::new(Point::new(0.1, 51.7), 0.2, 0.3);
    let mut flip = false;
    group.bench_function("recompute_on_pan_10k", |b| {
        b.iter(|| {
            flip = !flip;
            collection.set_region(if flip { region_a } else { region_b });
            collection.visible_features().len()
        });
    });

    // Identical inputs hit the cache
    group.bench_function("memoized_hit_10k", |b| {
        collection.set_region(region_a);
        b.iter(|| collection.visible_features().len());
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_collection);

criterion_main!(benches);
