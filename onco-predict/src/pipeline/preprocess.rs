//! JPEG bytes to model input tensor
//!
//! Decode, resize to 224x224 with nearest-neighbour sampling (the training
//! preprocessing), add a batch axis and cast channel values to f32. Values
//! are not normalised: the model sees 0.0..=255.0.
//!
//! Nearest-neighbour uses half-pixel centres: output column `dx` reads source
//! column `floor((dx + 0.5) * src_width / 224)`, and rows likewise.

use super::PredictionError;
use crate::classifier::INPUT_SIZE;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageFormat, RgbImage};
use ndarray::Array4;
use tracing::{debug, warn};

/// Build the `[1, 224, 224, 3]` tensor for one image
pub fn preprocess(bytes: &[u8]) -> Result<Array4<f32>, PredictionError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg).map_err(|e| {
        warn!("Image decode failed: {}", e);
        PredictionError::PredictionFailed
    })?;
    debug!(
        "Decoded {}x{} image ({:?})",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    if decoded.color() != ColorType::Rgb8 {
        warn!(
            "Unsupported colour type {:?}, expected 3-channel RGB",
            decoded.color()
        );
        return Err(PredictionError::PredictionFailed);
    }

    let resized = resize_nearest(&decoded.into_rgb8());

    let side = INPUT_SIZE as usize;
    let data: Vec<f32> = resized.into_raw().into_iter().map(f32::from).collect();

    Array4::from_shape_vec((1, side, side, 3), data).map_err(|e| {
        warn!("Tensor construction failed: {}", e);
        PredictionError::PredictionFailed
    })
}

/// Nearest-neighbour resize to the model's square input size
pub(crate) fn resize_nearest(rgb: &RgbImage) -> RgbImage {
    imageops::resize(rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Nearest)
}
