use criterion::{black_box, criterion_group, criterion_main, Criterion};
use floodgif::{FloodFill, Image, Point, Strategy};
use pix::rgb::SRgb8;

fn fill_strategy(crit: &mut Criterion, name: &str, strategy: Strategy) {
    let fill = FloodFill::new(strategy).with_frame_interval(4096);
    crit.bench_function(name, |b| {
        b.iter(|| {
            let mut image = Image::with_clear(128, 128);
            let frames = fill
                .run(
                    black_box(&mut image),
                    Point::new(64, 64),
                    SRgb8::new(255, 0, 0),
                )
                .unwrap();
            black_box(frames);
        })
    });
}

fn fill_bfs(crit: &mut Criterion) {
    fill_strategy(crit, "fill_bfs", Strategy::BreadthFirst);
}

fn fill_dfs(crit: &mut Criterion) {
    fill_strategy(crit, "fill_dfs", Strategy::DepthFirst);
}

criterion_group!(benches, fill_bfs, fill_dfs);
criterion_main!(benches);
