//! Candidate decoding and pruning.
//!
//! Decoding turns raw tensor columns into labeled boxes; suppression removes
//! lower-confidence duplicates.

pub(crate) mod decode;
pub(crate) mod nms;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;
