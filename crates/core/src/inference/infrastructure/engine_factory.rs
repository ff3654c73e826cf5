use crate::inference::domain::inference_engine::InferenceEngine;
use crate::inference::domain::model_files::{ModelFiles, ModelFormat, ModelLoadError};

use super::onnx_engine::OnnxEngine;

/// Loads the network described by `files` on the backend its format needs.
///
/// File presence is verified first, so a missing path never reaches a
/// backend. Logs which backend was selected.
pub fn load_engine(files: &ModelFiles) -> Result<Box<dyn InferenceEngine>, ModelLoadError> {
    files.verify()?;

    let engine: Box<dyn InferenceEngine> = match files.format {
        ModelFormat::Onnx => Box::new(
            OnnxEngine::new(&files.weights).map_err(|e| backend_error(files.format, e))?,
        ),
        ModelFormat::Darknet | ModelFormat::Caffe => load_opencv(files)?,
    };
    log::info!(
        "Loaded {:?} model {} on {}",
        files.format,
        files.weights.display(),
        engine.backend_name()
    );
    Ok(engine)
}

#[cfg(feature = "opencv")]
fn load_opencv(files: &ModelFiles) -> Result<Box<dyn InferenceEngine>, ModelLoadError> {
    use super::opencv_dnn_engine::OpenCvDnnEngine;

    let engine = match files.format {
        ModelFormat::Darknet => OpenCvDnnEngine::from_darknet(&files.topology, &files.weights),
        _ => OpenCvDnnEngine::from_caffe(&files.topology, &files.weights),
    }
    .map_err(|e| backend_error(files.format, e))?;
    Ok(Box::new(engine))
}

#[cfg(not(feature = "opencv"))]
fn load_opencv(files: &ModelFiles) -> Result<Box<dyn InferenceEngine>, ModelLoadError> {
    Err(ModelLoadError::BackendUnavailable {
        format: files.format,
        feature: "opencv",
    })
}

fn backend_error(format: ModelFormat, err: Box<dyn std::error::Error>) -> ModelLoadError {
    ModelLoadError::Backend {
        format,
        message: err.to_string(),
    }
}
