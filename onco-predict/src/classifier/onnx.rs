//! ONNX Runtime classifier backend

use super::{check_input_shape, Classifier, ClassifierError};
use ndarray::Array4;
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Classifier backed by a single ONNX Runtime session
///
/// `Session::run` needs exclusive access, so forward passes are serialized
/// behind a mutex.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_path: PathBuf,
    model_name: String,
}

impl OnnxClassifier {
    /// Load the model file once at startup
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = model_path.as_ref();
        let load_error = |message: String| ClassifierError::Load {
            path: path.to_path_buf(),
            message,
        };

        let session = Session::builder()
            .and_then(|builder| builder.with_log_level(LogLevel::Error))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| load_error(e.to_string()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| load_error("model declares no inputs".to_string()))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| load_error("model declares no outputs".to_string()))?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        info!(
            "Loaded ONNX model '{}' (input '{}', output '{}')",
            model_name, input_name, output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Classifier for OnnxClassifier {
    fn forward(&self, input: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        check_input_shape(input)?;

        let input_tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| ClassifierError::Forward(format!("tensor conversion: {}", e)))?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            ClassifierError::Forward(format!(
                "session lock poisoned for model '{}'",
                self.model_name
            ))
        })?;

        let outputs = session
            .run(inputs)
            .map_err(|e| ClassifierError::Forward(e.to_string()))?;

        let (_shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifierError::Forward(format!(
                    "output '{}' is not an f32 tensor: {}",
                    self.output_name, e
                ))
            })?;

        Ok(data.to_vec())
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
