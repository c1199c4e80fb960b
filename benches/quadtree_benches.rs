use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use footpath_quadtree::{Point, Quadtree, Rect, Value};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const EXTENT: f64 = 8000.0;

fn get_rand() -> impl rand::Rng {
    SmallRng::seed_from_u64(0xdeadbeef)
}

fn bounds() -> Rect {
    Rect::new(Point::new(0.0, 0.0), Point::new(EXTENT, EXTENT))
}

fn rand_point(rng: &mut impl Rng, extent: f64) -> Point {
    // the left edge of the tree is open
    Point::new(
        rng.gen_range(f64::EPSILON, extent),
        rng.gen_range(0.0, extent),
    )
}

fn rand_points(rng: &mut impl Rng, len: usize, extent: f64) -> Vec<Point> {
    (0..len).map(|_| rand_point(rng, extent)).collect()
}

fn values(len: usize) -> Vec<Value> {
    (0..len as u32).map(Value).collect()
}

fn search_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree search random");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let points = rand_points(&mut rng, size, EXTENT);
            let values = values(size);

            let mut tree = Quadtree::new(bounds());
            tree.extend(points.iter().copied().zip(values.iter()));

            b.iter(|| {
                let p = rand_point(&mut rng, EXTENT);
                black_box(tree.search(&p).is_some())
            });
        });
    }
    group.finish();
}

fn search_in_tree_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree search, all queried points are in the tree");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let points = rand_points(&mut rng, size, EXTENT);
            let values = values(size);

            let mut tree = Quadtree::new(bounds());
            tree.extend(points.iter().copied().zip(values.iter()));

            b.iter(|| {
                let p = &points[rng.gen_range(0, points.len())];
                black_box(tree.search(p))
            });
        });
    }
    group.finish();
}

fn range_query(c: &mut Criterion, name: &str, extent: f64, radius: f64) {
    let mut group = c.benchmark_group(name);
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let points = rand_points(&mut rng, size, extent);
            let values = values(size);

            let mut tree = Quadtree::new(bounds());
            tree.extend(points.iter().copied().zip(values.iter()));

            b.iter(|| {
                let p = rand_point(&mut rng, extent);
                let range = Rect::new(
                    Point::new(p.x() - radius, p.y() - radius),
                    Point::new(p.x() + radius, p.y() + radius),
                );
                black_box(tree.range_query(&range))
            });
        });
    }
    group.finish();
}

fn range_query_sparse(c: &mut Criterion) {
    range_query(c, "Quadtree range_query sparse", EXTENT, 512.0);
}

fn range_query_dense(c: &mut Criterion) {
    range_query(c, "Quadtree range_query dense", 400.0, 50.0);
}

fn make_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree make_tree");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let points = rand_points(&mut rng, size, EXTENT);
            let values = values(size);

            b.iter(|| {
                let mut tree = Quadtree::new(bounds());
                tree.extend(points.iter().copied().zip(values.iter()));
                tree
            });
        });
    }
    group.finish();
}

fn rebuild_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree rebuild_tree");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let points = rand_points(&mut rng, size, EXTENT);
            let values = values(size);

            let mut tree = Quadtree::new(bounds());

            b.iter(|| {
                tree.clear();
                tree.extend(points.iter().copied().zip(values.iter()));
            });
        });
    }
    group.finish();
}

fn random_insert(c: &mut Criterion) {
    static RECORD: Value = Value(420);

    let mut group = c.benchmark_group("Quadtree random_insert");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let mut tree = Quadtree::new(bounds());

            for _ in 0..size {
                tree.insert(rand_point(&mut rng, EXTENT), &RECORD).unwrap();
            }

            b.iter(|| tree.insert(rand_point(&mut rng, EXTENT), &RECORD).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    quadtree_benches,
    search_rand,
    search_in_tree_rand,
    range_query_sparse,
    range_query_dense,
    make_tree,
    random_insert,
    rebuild_tree,
);

criterion_main!(quadtree_benches);
