//! Input tensor normalization for float models.

use crate::util::{YoloPostError, YoloPostResult};

/// Mean subtracted from each 8-bit sample.
pub const INPUT_MEAN: f32 = 0.0;
/// Divisor applied after mean subtraction; maps `0..=255` to `0.0..=1.0`.
pub const INPUT_STD: f32 = 255.0;

/// Converts interleaved 8-bit samples to `(v - mean) / std` floats.
pub fn normalize_u8(data: &[u8], mean: f32, std: f32) -> YoloPostResult<Vec<f32>> {
    if !std.is_finite() || std == 0.0 {
        return Err(YoloPostError::InvalidInput(
            "normalization std must be finite and non-zero",
        ));
    }
    if !mean.is_finite() {
        return Err(YoloPostError::InvalidInput("normalization mean must be finite"));
    }
    let inv_std = 1.0 / std;
    Ok(data.iter().map(|&v| (v as f32 - mean) * inv_std).collect())
}

#[cfg(test)]
mod tests {
    use super::{normalize_u8, INPUT_MEAN, INPUT_STD};

    #[test]
    fn default_constants_map_to_unit_range() {
        let out = normalize_u8(&[0, 51, 255], INPUT_MEAN, INPUT_STD).unwrap();
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.2).abs() < 1e-6);
        assert!((out[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_std_is_rejected() {
        assert!(normalize_u8(&[1, 2, 3], 0.0, 0.0).is_err());
    }
}
