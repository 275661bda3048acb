//! Low-level building blocks for custom post-processing pipelines.
//!
//! These expose the individual decode and suppression stages for callers that
//! need to interleave their own filtering. Most users should prefer
//! [`Detector`](crate::Detector) or [`detect`](crate::detect).

pub use crate::candidate::decode::{decode_candidate, decode_candidates};
pub use crate::candidate::nms::suppress;
#[cfg(feature = "rayon")]
pub use crate::candidate::rayon::decode_candidates_par;
pub use crate::geometry::iou;
pub use crate::tensor::{TensorView, BOX_CHANNELS};
