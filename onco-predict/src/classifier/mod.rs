//! Image classifier capability
//!
//! The trained model is opaque to the pipeline: it receives a
//! `[1, 224, 224, 3]` f32 tensor and returns a flat f32 activation array.
//! Implementations are loaded once at startup and shared read-only behind an
//! `Arc<dyn Classifier>`; a backend that cannot run concurrent forward passes
//! must serialize them internally.

#[cfg(feature = "onnx")]
pub mod onnx;

use ndarray::Array4;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

/// Input edge length expected by the model
pub const INPUT_SIZE: u32 = 224;

/// Expected input tensor shape (NHWC, batch of one)
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3];

/// Classifier backend errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to load model {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("input tensor shape {actual:?} does not match expected {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("forward pass failed: {0}")]
    Forward(String),
}

/// Forward-pass capability of a trained binary image classifier
pub trait Classifier: Send + Sync {
    /// Run one forward pass and return the raw output activations
    fn forward(&self, input: &Array4<f32>) -> Result<Vec<f32>, ClassifierError>;

    /// Human-readable model name for logs
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Reject tensors that are not `[1, 224, 224, 3]`
pub fn check_input_shape(input: &Array4<f32>) -> Result<(), ClassifierError> {
    if input.shape() == &INPUT_SHAPE[..] {
        Ok(())
    } else {
        Err(ClassifierError::ShapeMismatch {
            expected: INPUT_SHAPE.to_vec(),
            actual: input.shape().to_vec(),
        })
    }
}
