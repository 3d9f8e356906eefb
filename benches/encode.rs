use criterion::{black_box, criterion_group, criterion_main, Criterion};
use floodgif::{encode_to, FloodFill, Image, Point, Strategy};
use pix::rgb::SRgb8;
use std::io::Cursor;

fn encode_frames(crit: &mut Criterion) {
    let mut image = Image::with_color(96, 96, SRgb8::new(255, 255, 255));
    let frames = FloodFill::new(Strategy::DepthFirst)
        .with_frame_interval(512)
        .run(&mut image, Point::new(48, 48), SRgb8::new(0, 0, 255))
        .unwrap();
    crit.bench_function("encode_frames", |b| {
        b.iter(|| {
            let mut out = Cursor::new(Vec::with_capacity(65536));
            encode_to(&mut out, black_box(&frames), 100, true).unwrap();
            black_box(out);
        })
    });
}

criterion_group!(benches, encode_frames);
criterion_main!(benches);
