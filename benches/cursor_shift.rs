use conclave::cursor::{NullOverlay, RemoteCursorRegistry, SiteId};
use conclave::text::{compute_delta, transform, Direction, Position, Range};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_transform(c: &mut Criterion) {
    let edit = Range::collapsed(Position::new(10, 4));
    let delta = compute_delta("fn main() {\n    println!(\"hi\");\n}");

    c.bench_function("transform", |b| {
        b.iter(|| {
            for line in 0..100 {
                black_box(transform(
                    black_box(Position::new(line, 8)),
                    edit,
                    delta,
                    Direction::Apply,
                ));
            }
        });
    });
}

fn benchmark_shift_all(c: &mut Criterion) {
    let mut registry = RemoteCursorRegistry::new(NullOverlay);
    for i in 0..1000 {
        registry.upsert(&SiteId::new(format!("site-{}", i)), Position::new(i, i % 40));
    }
    let except = SiteId::from("site-0");
    let edit = Range::collapsed(Position::new(0, 0));
    let delta = compute_delta("x");

    c.bench_function("shift_all_1000_cursors", |b| {
        b.iter(|| {
            // 挿入と削除を交互に行い位置を元に戻す
            registry.shift_all(edit, delta, Direction::Apply, Some(&except));
            registry.shift_all(
                Range::new(Position::new(0, 0), Position::new(0, 1)),
                delta,
                Direction::Revert,
                Some(&except),
            );
        });
    });
}

criterion_group!(benches, benchmark_transform, benchmark_shift_all);
criterion_main!(benches);
