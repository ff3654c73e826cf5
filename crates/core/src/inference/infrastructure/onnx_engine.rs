//! ONNX Runtime backend via `ort`.
use std::path::Path;

use ndarray::{Array4, ArrayD};

use crate::inference::domain::inference_engine::InferenceEngine;

/// A network exported to ONNX, run on the platform's preferred provider.
pub struct OnnxEngine {
    session: ort::session::Session,
}

impl OnnxEngine {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?
            .with_execution_providers(platform_providers())?
            .commit_from_file(model_path)?;

        log::debug!(
            "Loaded ONNX model {} ({} inputs)",
            model_path.display(),
            session.inputs().len()
        );
        Ok(Self { session })
    }
}

impl InferenceEngine for OnnxEngine {
    fn forward(
        &mut self,
        input: &Array4<f32>,
    ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(input.clone())?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("ONNX model produced no outputs".into());
        }

        let mut tensors = Vec::with_capacity(outputs.len());
        for i in 0..outputs.len() {
            let view = outputs[i].try_extract_array::<f32>()?;
            tensors.push(view.to_owned());
        }
        Ok(tensors)
    }

    fn backend_name(&self) -> &'static str {
        "onnxruntime"
    }
}

/// CoreML on macOS, DirectML on Windows, plain CPU elsewhere.
fn platform_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_model_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.onnx");
        std::fs::write(&path, b"definitely not protobuf").unwrap();
        assert!(OnnxEngine::new(&path).is_err());
    }
}
