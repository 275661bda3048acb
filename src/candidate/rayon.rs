//! Rayon-parallel candidate decoding (feature-gated).
//!
//! Splits the candidate range across the rayon pool. Results are collected in
//! candidate order, so the output is identical to the sequential decoder.

use crate::bbox::BoundingBox;
use crate::candidate::decode::decode_candidate;
use crate::labels::LabelTable;
use crate::tensor::TensorView;
use rayon::prelude::*;

/// Parallel counterpart of [`decode_candidates`](crate::lowlevel::decode_candidates).
pub fn decode_candidates_par(
    view: TensorView<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
) -> Vec<BoundingBox> {
    (0..view.num_elements())
        .into_par_iter()
        .filter_map(|candidate| decode_candidate(view, labels, confidence_threshold, candidate))
        .collect()
}
