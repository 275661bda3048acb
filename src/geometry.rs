//! Box overlap measures.

use crate::bbox::BoundingBox;

/// Intersection-over-Union of two boxes.
///
/// The intersection comes from the corners; each box's area comes from its
/// own decoded `w * h`. A non-positive union (both boxes degenerate) yields
/// 0.0 instead of a division fault.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let ix1 = a.x1().max(b.x1());
    let iy1 = a.y1().max(b.y1());
    let ix2 = a.x2().min(b.x2());
    let iy2 = a.y2().min(b.y2());

    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let union = a.area() + b.area() - inter;
    if union > 0.0 {
        inter / union
    } else {
        0.0
    }
}
