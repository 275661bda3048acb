use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use yolopost::lowlevel::{decode_candidates, suppress, TensorView};
use yolopost::{detect, LabelTable, TensorGeometry, Thresholds};

const NUM_CLASSES: usize = 80;
const NUM_ELEMENTS: usize = 8400;

/// Synthetic YOLOv8-sized head: low background scores with a few dozen
/// clustered confident candidates.
fn make_head() -> (Vec<f32>, TensorGeometry) {
    let geom = TensorGeometry::new(640, 640, 4 + NUM_CLASSES, NUM_ELEMENTS);
    let mut data = vec![0.0f32; geom.buffer_len().unwrap()];
    for c in 0..NUM_ELEMENTS {
        let gx = (c % 80) as f32 / 80.0;
        let gy = ((c / 80) % 80) as f32 / 80.0;
        data[c] = 0.1 + gx * 0.8;
        data[c + NUM_ELEMENTS] = 0.1 + gy * 0.8;
        data[c + 2 * NUM_ELEMENTS] = 0.08;
        data[c + 3 * NUM_ELEMENTS] = 0.12;
        for class in 0..NUM_CLASSES {
            let value = ((c * 31 + class * 17) % 97) as f32 / 400.0;
            data[c + (4 + class) * NUM_ELEMENTS] = value;
        }
        if c % 211 == 0 {
            data[c + (4 + c % NUM_CLASSES) * NUM_ELEMENTS] = 0.9;
        }
    }
    (data, geom)
}

fn bench_pipeline(c: &mut Criterion) {
    let (data, geom) = make_head();
    let labels: LabelTable = (0..NUM_CLASSES).map(|i| format!("class{i}")).collect();
    let thresholds = Thresholds::default();
    let view = TensorView::new(&data, &geom).unwrap();

    c.bench_function("decode_84x8400", |b| {
        b.iter(|| black_box(decode_candidates(view, &labels, thresholds.confidence)));
    });

    let decoded = decode_candidates(view, &labels, thresholds.confidence);
    c.bench_function("suppress_decoded", |b| {
        b.iter(|| black_box(suppress(decoded.clone(), thresholds.iou)));
    });

    c.bench_function("detect_84x8400", |b| {
        b.iter(|| black_box(detect(&data, &geom, &labels, &thresholds)));
    });

    #[cfg(feature = "rayon")]
    {
        use yolopost::lowlevel::decode_candidates_par;
        c.bench_function("decode_84x8400_par", |b| {
            b.iter(|| black_box(decode_candidates_par(view, &labels, thresholds.confidence)));
        });
    }
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
