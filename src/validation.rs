//! Validation of the nested-array image payload.
//!
//! The payload is checked in three passes, each with its own error kind:
//! element types and rectangularity, then dimensionality, then channel count.

use image::RgbImage;
use serde_json::Value;

/// Samples per pixel
pub const CHANNELS: usize = 3;

/// Rejection reasons for an image payload. The `Display` form is the wire kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageValidationError {
    /// Not a rectangular nested array of integers in 0..=255
    #[error("INVALID_TYPE_ON_JSON_PARSE")]
    InvalidType,
    #[error("INVALID_NDIMS")]
    InvalidNdims,
    #[error("INVALID_NCHANNELS")]
    InvalidNchannels,
}

/// Shape of a rectangular nested array, outermost axis first.
///
/// A bare number has shape `[]`; an empty array has shape `[0]`.
pub fn array_shape(value: &Value) -> Result<Vec<usize>, ImageValidationError> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) if v <= u8::MAX as u64 => Ok(Vec::new()),
            _ => Err(ImageValidationError::InvalidType),
        },
        Value::Array(items) => {
            let Some((first, rest)) = items.split_first() else {
                return Ok(vec![0]);
            };

            let inner = array_shape(first)?;
            for item in rest {
                if array_shape(item)? != inner {
                    return Err(ImageValidationError::InvalidType);
                }
            }

            let mut shape = Vec::with_capacity(inner.len() + 1);
            shape.push(items.len());
            shape.extend(inner);
            Ok(shape)
        }
        _ => Err(ImageValidationError::InvalidType),
    }
}

/// Parse an `image` payload into a (height, width, 3) pixel buffer.
///
/// Samples are copied in order; their channel meaning is left to the classifier.
pub fn parse_image(value: &Value) -> Result<RgbImage, ImageValidationError> {
    let shape = array_shape(value)?;

    let &[height, width, channels] = shape.as_slice() else {
        return Err(ImageValidationError::InvalidNdims);
    };
    if channels != CHANNELS {
        return Err(ImageValidationError::InvalidNchannels);
    }

    let mut samples = Vec::with_capacity(height * width * CHANNELS);
    for row in value.as_array().into_iter().flatten() {
        for pixel in row.as_array().into_iter().flatten() {
            for sample in pixel.as_array().into_iter().flatten() {
                let v = sample.as_u64().ok_or(ImageValidationError::InvalidType)?;
                samples.push(v as u8);
            }
        }
    }

    let width = u32::try_from(width).map_err(|_| ImageValidationError::InvalidType)?;
    let height = u32::try_from(height).map_err(|_| ImageValidationError::InvalidType)?;
    RgbImage::from_raw(width, height, samples).ok_or(ImageValidationError::InvalidType)
}
