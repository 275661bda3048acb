//! Greedy non-maximum suppression for decoded boxes.

use crate::bbox::BoundingBox;
use crate::geometry::iou;

/// Sorts boxes by descending confidence; equal scores keep input order.
pub(crate) fn sort_by_confidence_desc(boxes: &mut [BoundingBox]) {
    boxes.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
}

/// Applies class-agnostic greedy NMS.
///
/// Boxes are visited in descending confidence and kept only if their IoU with
/// every previously kept box is below `iou_threshold`. Boxes of different
/// classes suppress each other. The result is in descending confidence order.
pub fn suppress(mut boxes: Vec<BoundingBox>, iou_threshold: f32) -> Vec<BoundingBox> {
    sort_by_confidence_desc(&mut boxes);
    let mut kept: Vec<BoundingBox> = Vec::with_capacity(boxes.len());

    'outer: for candidate in boxes {
        for kept_box in kept.iter() {
            if iou(kept_box, &candidate) >= iou_threshold {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }

    kept
}
