//! Per-frame detection entry points.
//!
//! A [`Detector`] bundles the tensor geometry, label table and thresholds of
//! one loaded model. It is immutable: reloading a model means building a new
//! detector from freshly resolved geometry.

use crate::bbox::BoundingBox;
use crate::candidate::decode::decode_candidates;
use crate::candidate::nms::suppress;
use crate::labels::LabelTable;
use crate::tensor::{TensorGeometry, TensorView};
use crate::trace::{trace_degraded, trace_event, trace_span};
use crate::util::{YoloPostError, YoloPostResult};
use std::time::{Duration, Instant};

/// Default confidence floor.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.30;
/// Default IoU ceiling for suppression.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.50;

/// Score and overlap thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Class scores must be strictly greater than this to survive decoding.
    pub confidence: f32,
    /// Boxes overlapping a kept box with IoU at or above this are suppressed.
    pub iou: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE_THRESHOLD,
            iou: DEFAULT_IOU_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Creates validated thresholds.
    pub fn new(confidence: f32, iou: f32) -> YoloPostResult<Self> {
        let thresholds = Self { confidence, iou };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks that both thresholds are finite and within `[0, 1]`.
    pub fn validate(&self) -> YoloPostResult<()> {
        check_unit("confidence", self.confidence)?;
        check_unit("iou", self.iou)
    }
}

fn check_unit(name: &'static str, value: f32) -> YoloPostResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(YoloPostError::InvalidThreshold { name, value })
    }
}

/// Result of one detection call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// At least one box survived; boxes are in descending confidence order.
    Detections {
        boxes: Vec<BoundingBox>,
        elapsed: Duration,
    },
    /// Nothing to report for this frame.
    Empty,
}

impl Outcome {
    /// Returns true for [`Outcome::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    /// Surviving boxes, or an empty slice.
    pub fn boxes(&self) -> &[BoundingBox] {
        match self {
            Outcome::Detections { boxes, .. } => boxes,
            Outcome::Empty => &[],
        }
    }

    /// Time spent decoding and suppressing, if anything was detected.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Outcome::Detections { elapsed, .. } => Some(*elapsed),
            Outcome::Empty => None,
        }
    }

    /// Consumes the outcome and returns its boxes.
    pub fn into_boxes(self) -> Vec<BoundingBox> {
        match self {
            Outcome::Detections { boxes, .. } => boxes,
            Outcome::Empty => Vec::new(),
        }
    }
}

/// Everything a detector needs besides the per-frame buffer.
#[derive(Clone, Debug, Default)]
pub struct DetectorConfig {
    /// Geometry resolved from the loaded model.
    pub geometry: TensorGeometry,
    /// Class names in model order.
    pub labels: LabelTable,
    /// Confidence and IoU thresholds.
    pub thresholds: Thresholds,
    /// Decode candidates on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

/// Immutable detector session for one loaded model.
#[derive(Clone, Debug)]
pub struct Detector {
    cfg: DetectorConfig,
}

impl Detector {
    /// Validates `cfg` and builds a detector.
    ///
    /// Unresolved geometry is accepted; such a detector reports
    /// [`Outcome::Empty`] for every frame.
    pub fn new(cfg: DetectorConfig) -> YoloPostResult<Self> {
        cfg.thresholds.validate()?;
        if cfg.parallel && !cfg!(feature = "rayon") {
            return Err(YoloPostError::InvalidInput(
                "parallel decoding requires the `rayon` feature",
            ));
        }
        Ok(Self { cfg })
    }

    /// Returns the configuration this detector was built with.
    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Runs decoding and suppression on one output buffer.
    pub fn detect(&self, buffer: &[f32]) -> Outcome {
        run(
            buffer,
            &self.cfg.geometry,
            &self.cfg.labels,
            &self.cfg.thresholds,
            self.cfg.parallel,
        )
    }
}

/// Runs decoding and suppression on one output buffer.
///
/// `buffer` holds a `[1, num_channel, num_elements]` tensor in channel-major
/// order. Unresolved geometry, a short buffer, thresholds that fail
/// [`Thresholds::validate`], or no surviving candidate all yield
/// [`Outcome::Empty`]; this function never fails.
pub fn detect(
    buffer: &[f32],
    geometry: &TensorGeometry,
    labels: &LabelTable,
    thresholds: &Thresholds,
) -> Outcome {
    if thresholds.validate().is_err() {
        trace_degraded!(
            "invalid_thresholds",
            confidence = thresholds.confidence as f64,
            iou = thresholds.iou as f64
        );
        return Outcome::Empty;
    }
    run(buffer, geometry, labels, thresholds, false)
}

fn run(
    buffer: &[f32],
    geometry: &TensorGeometry,
    labels: &LabelTable,
    thresholds: &Thresholds,
    parallel: bool,
) -> Outcome {
    if !geometry.is_resolved() {
        trace_degraded!(
            "geometry_unresolved",
            channels = geometry.num_channel,
            candidates = geometry.num_elements
        );
        return Outcome::Empty;
    }

    let start = Instant::now();
    let _span = trace_span!(
        "yolopost_frame",
        candidates = geometry.num_elements,
        channels = geometry.num_channel
    )
    .entered();

    let view = match TensorView::new(buffer, geometry) {
        Ok(view) => view,
        Err(_) => {
            trace_degraded!(
                "buffer_too_small",
                needed = geometry.buffer_len().unwrap_or(usize::MAX),
                got = buffer.len()
            );
            return Outcome::Empty;
        }
    };

    let decoded = decode(view, labels, thresholds.confidence, parallel);
    trace_event!("decoded_candidates", count = decoded.len());
    if decoded.is_empty() {
        return Outcome::Empty;
    }

    let boxes = suppress(decoded, thresholds.iou);
    let elapsed = start.elapsed();
    trace_event!(
        "suppressed",
        count = boxes.len(),
        elapsed_us = elapsed.as_micros() as u64
    );

    Outcome::Detections { boxes, elapsed }
}

#[cfg(feature = "rayon")]
fn decode(
    view: TensorView<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
    parallel: bool,
) -> Vec<BoundingBox> {
    if parallel {
        crate::candidate::rayon::decode_candidates_par(view, labels, confidence_threshold)
    } else {
        decode_candidates(view, labels, confidence_threshold)
    }
}

#[cfg(not(feature = "rayon"))]
fn decode(
    view: TensorView<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
    _parallel: bool,
) -> Vec<BoundingBox> {
    decode_candidates(view, labels, confidence_threshold)
}
