use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolopost::lowlevel::{iou, suppress};
use yolopost::BoundingBox;

fn random_box(rng: &mut StdRng, class_index: usize) -> BoundingBox {
    let w = rng.random_range(0.02f32..0.5);
    let h = rng.random_range(0.02f32..0.5);
    let cx = rng.random_range(w / 2.0 + 1e-3..1.0 - w / 2.0 - 1e-3);
    let cy = rng.random_range(h / 2.0 + 1e-3..1.0 - h / 2.0 - 1e-3);
    let confidence = rng.random_range(0.31f32..1.0);
    BoundingBox::from_center(cx, cy, w, h, confidence, class_index, "obj")
        .expect("sampled inside the unit square")
}

fn random_boxes(seed: u64, count: usize) -> Vec<BoundingBox> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| random_box(&mut rng, i % 3)).collect()
}

#[test]
fn iou_is_symmetric_and_bounded() {
    let boxes = random_boxes(7, 40);
    for a in &boxes {
        for b in &boxes {
            let ab = iou(a, b);
            assert_eq!(ab, iou(b, a));
            assert!((0.0..=1.0 + 1e-4).contains(&ab), "iou out of range: {ab}");
        }
    }
}

#[test]
fn iou_with_self_is_one() {
    for b in random_boxes(11, 40) {
        assert!((iou(&b, &b) - 1.0).abs() < 1e-4, "self iou {}", iou(&b, &b));
    }
}

#[test]
fn kept_boxes_never_overlap_above_threshold() {
    for seed in 0..20u64 {
        for &threshold in &[0.3f32, 0.5, 0.7] {
            let kept = suppress(random_boxes(seed, 60), threshold);
            for (i, a) in kept.iter().enumerate() {
                for b in kept.iter().skip(i + 1) {
                    assert!(
                        iou(a, b) < threshold,
                        "seed {seed}: kept pair with iou {} >= {threshold}",
                        iou(a, b)
                    );
                }
            }
        }
    }
}

#[test]
fn output_is_subset_in_descending_confidence() {
    for seed in 0..10u64 {
        let input = random_boxes(seed, 50);
        let kept = suppress(input.clone(), 0.5);
        assert!(!kept.is_empty());
        for b in &kept {
            assert!(input.contains(b), "suppression invented a box");
        }
        for pair in kept.windows(2) {
            assert!(pair[0].confidence() >= pair[1].confidence());
        }
    }
}

#[test]
fn top_confidence_box_is_always_kept() {
    for seed in 0..10u64 {
        let input = random_boxes(seed, 50);
        let best = input
            .iter()
            .min_by(|a, b| b.confidence().total_cmp(&a.confidence()))
            .cloned()
            .unwrap();
        let kept = suppress(input, 0.5);
        assert_eq!(kept[0], best);
    }
}

#[test]
fn cluster_leader_survives_and_members_are_removed() {
    let leader = BoundingBox::from_center(0.3, 0.3, 0.2, 0.2, 0.95, 0, "a").unwrap();
    let near = BoundingBox::from_center(0.31, 0.3, 0.2, 0.2, 0.9, 1, "b").unwrap();
    let nearer = BoundingBox::from_center(0.3, 0.305, 0.2, 0.2, 0.6, 0, "a").unwrap();
    let far = BoundingBox::from_center(0.8, 0.8, 0.2, 0.2, 0.4, 2, "c").unwrap();

    let kept = suppress(vec![nearer, far.clone(), near, leader.clone()], 0.5);
    assert_eq!(kept, vec![leader, far]);
}

#[test]
fn disjoint_boxes_are_both_retained() {
    let a = BoundingBox::from_corners(0.0, 0.0, 0.2, 0.2, 0.8, 0, "a").unwrap();
    let b = BoundingBox::from_corners(0.5, 0.5, 0.7, 0.7, 0.6, 1, "b").unwrap();
    assert_eq!(iou(&a, &b), 0.0);

    let kept = suppress(vec![b.clone(), a.clone()], 0.5);
    assert_eq!(kept, vec![a, b]);
}

#[test]
fn threshold_equality_suppresses() {
    // Identical boxes have IoU exactly 1.0.
    let a = BoundingBox::from_center(0.5, 0.5, 0.25, 0.25, 0.9, 0, "a").unwrap();
    let b = BoundingBox::from_center(0.5, 0.5, 0.25, 0.25, 0.8, 0, "a").unwrap();
    assert_eq!(suppress(vec![a.clone(), b.clone()], 1.0).len(), 1);
}
