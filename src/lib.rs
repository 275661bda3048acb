//! yolopost turns raw YOLO-style detection tensors into labeled boxes.
//!
//! The pipeline is: resolve tensor geometry once per model, then per frame
//! decode each candidate column of a channel-major `[1, 4 + classes, N]`
//! buffer, keep the best class above a confidence floor, and run greedy
//! class-agnostic non-maximum suppression. Decoding can optionally run on the
//! rayon pool via the `rayon` feature.

pub mod bbox;
mod candidate;
mod detector;
pub mod geometry;
pub mod labels;
pub mod lowlevel;
pub mod preprocess;
pub mod tensor;
mod trace;
pub mod util;

pub use bbox::BoundingBox;
pub use detector::{
    detect, Detector, DetectorConfig, Outcome, Thresholds, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_IOU_THRESHOLD,
};
pub use labels::LabelTable;
pub use tensor::TensorGeometry;
pub use util::{YoloPostError, YoloPostResult};
