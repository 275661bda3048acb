//! Tensor geometry and channel-major views over raw model output.
//!
//! A detection head exports a `[1, num_channel, num_elements]` tensor. Channels
//! 0..4 hold the box center and size, the remaining channels hold one score
//! per class. The flat buffer is channel-major: the value for channel `j` of
//! candidate `c` lives at `c + num_elements * j`. Every accessor in this module
//! goes through that single stride rule.

use crate::util::{YoloPostError, YoloPostResult};

/// Number of leading channels that encode box geometry (cx, cy, w, h).
pub const BOX_CHANNELS: usize = 4;

const INPUT_RANK: usize = 4;
const OUTPUT_RANK: usize = 3;

/// Scalar geometry derived from the model's input and output shapes.
///
/// The default value is all zeros and represents a model whose shapes are not
/// resolved yet; detection against it is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TensorGeometry {
    /// Expected model input width in pixels.
    pub tensor_width: usize,
    /// Expected model input height in pixels.
    pub tensor_height: usize,
    /// Channels per candidate: 4 box channels plus one per class.
    pub num_channel: usize,
    /// Number of candidates (anchors or grid cells).
    pub num_elements: usize,
}

impl TensorGeometry {
    /// Builds geometry from explicit values.
    pub fn new(
        tensor_width: usize,
        tensor_height: usize,
        num_channel: usize,
        num_elements: usize,
    ) -> Self {
        Self {
            tensor_width,
            tensor_height,
            num_channel,
            num_elements,
        }
    }

    /// Resolves geometry from input and output shape descriptors.
    ///
    /// The input is `(batch, d1, d2, d3)`. When `d1 == 3` the layout is taken
    /// as channel-first and the spatial size is `(d2, d3)`; otherwise it is
    /// channel-last and the spatial size is `(d1, d2)`. The output is
    /// `(batch, channels, elements)`.
    ///
    /// Rank is checked before any indexing; dimension values are not.
    pub fn from_shapes(input_shape: &[usize], output_shape: &[usize]) -> YoloPostResult<Self> {
        if input_shape.len() != INPUT_RANK {
            return Err(YoloPostError::InvalidShapeRank {
                tensor: "input",
                expected: INPUT_RANK,
                got: input_shape.len(),
            });
        }
        if output_shape.len() != OUTPUT_RANK {
            return Err(YoloPostError::InvalidShapeRank {
                tensor: "output",
                expected: OUTPUT_RANK,
                got: output_shape.len(),
            });
        }

        let (tensor_width, tensor_height) = if input_shape[1] == 3 {
            (input_shape[2], input_shape[3])
        } else {
            (input_shape[1], input_shape[2])
        };

        Ok(Self {
            tensor_width,
            tensor_height,
            num_channel: output_shape[1],
            num_elements: output_shape[2],
        })
    }

    /// Returns true once every dimension is non-zero.
    pub fn is_resolved(&self) -> bool {
        self.tensor_width != 0
            && self.tensor_height != 0
            && self.num_channel != 0
            && self.num_elements != 0
    }

    /// Number of class score channels, zero if the head has only box channels.
    pub fn num_classes(&self) -> usize {
        self.num_channel.saturating_sub(BOX_CHANNELS)
    }

    /// Number of `f32` values a full output tensor occupies.
    pub fn buffer_len(&self) -> Option<usize> {
        self.num_channel.checked_mul(self.num_elements)
    }
}

/// Borrowed channel-major view of one output tensor.
#[derive(Copy, Clone, Debug)]
pub struct TensorView<'a> {
    data: &'a [f32],
    num_channel: usize,
    num_elements: usize,
}

impl<'a> TensorView<'a> {
    /// Wraps `data` for the given geometry, checking that it is long enough.
    pub fn new(data: &'a [f32], geometry: &TensorGeometry) -> YoloPostResult<Self> {
        let needed = geometry
            .buffer_len()
            .ok_or(YoloPostError::InvalidInput("tensor geometry overflows usize"))?;
        if data.len() < needed {
            return Err(YoloPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            num_channel: geometry.num_channel,
            num_elements: geometry.num_elements,
        })
    }

    /// Returns the number of channels per candidate.
    pub fn num_channel(&self) -> usize {
        self.num_channel
    }

    /// Returns the number of candidates.
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the value of `channel` for `candidate`, if both are in range.
    pub fn get(&self, channel: usize, candidate: usize) -> Option<f32> {
        if channel >= self.num_channel || candidate >= self.num_elements {
            return None;
        }
        self.data.get(self.offset(channel, candidate)).copied()
    }

    /// Linear offset of `(channel, candidate)` without bounds checks.
    #[inline]
    pub(crate) fn offset(&self, channel: usize, candidate: usize) -> usize {
        candidate + self.num_elements * channel
    }

    /// Value at `(channel, candidate)`; caller guarantees both are in range.
    #[inline]
    pub(crate) fn at(&self, channel: usize, candidate: usize) -> f32 {
        self.data[self.offset(channel, candidate)]
    }
}
