//! Per-candidate class selection and box decoding.

use crate::bbox::BoundingBox;
use crate::labels::LabelTable;
use crate::tensor::{TensorView, BOX_CHANNELS};
use std::ops::Range;

/// Finds the best class score for `candidate` that beats `threshold`.
///
/// Scans class channels left to right; a score must be strictly greater than
/// the running maximum (seeded with the threshold) to win, so equal scores
/// keep the lowest class index. Returns `(class_index, score)`.
///
/// `candidate` must be below `view.num_elements()`.
#[inline]
pub(crate) fn best_class(
    view: TensorView<'_>,
    candidate: usize,
    threshold: f32,
) -> Option<(usize, f32)> {
    let data = view.as_slice();
    let stride = view.num_elements();
    let mut max_conf = threshold;
    let mut max_idx = None;

    let mut idx = view.offset(BOX_CHANNELS, candidate);
    for channel in BOX_CHANNELS..view.num_channel() {
        let score = data[idx];
        if score > max_conf {
            max_conf = score;
            max_idx = Some(channel - BOX_CHANNELS);
        }
        idx += stride;
    }

    max_idx.map(|class_index| (class_index, max_conf))
}

/// Decodes a single candidate column into a box.
///
/// Returns `None` when `candidate` is not a column of `view`, no class beats
/// the threshold, the winning class has no label, or the decoded box leaves
/// the unit square.
#[inline]
pub fn decode_candidate(
    view: TensorView<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
    candidate: usize,
) -> Option<BoundingBox> {
    if candidate >= view.num_elements() {
        return None;
    }
    let (class_index, confidence) = best_class(view, candidate, confidence_threshold)?;
    let class_name = labels.get(class_index)?;

    let cx = view.at(0, candidate);
    let cy = view.at(1, candidate);
    let w = view.at(2, candidate);
    let h = view.at(3, candidate);

    BoundingBox::from_center(cx, cy, w, h, confidence, class_index, class_name)
}

pub(crate) fn decode_range(
    view: TensorView<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
    candidates: Range<usize>,
    out: &mut Vec<BoundingBox>,
) {
    for candidate in candidates {
        if let Some(bbox) = decode_candidate(view, labels, confidence_threshold, candidate) {
            out.push(bbox);
        }
    }
}

/// Decodes every candidate of `view`, in candidate order, without suppression.
///
/// Heads with fewer than five channels have no class scores and decode to an
/// empty list.
pub fn decode_candidates(
    view: TensorView<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
) -> Vec<BoundingBox> {
    let mut out = Vec::new();
    decode_range(
        view,
        labels,
        confidence_threshold,
        0..view.num_elements(),
        &mut out,
    );
    out
}
