use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("{role} file not found: {path}")]
    Missing { role: &'static str, path: PathBuf },
    #[error("{role} file is not readable: {path}: {source}")]
    Unreadable {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot infer model format from {topology} and {weights}")]
    UnsupportedFormat { topology: PathBuf, weights: PathBuf },
    #[error("{format:?} models need the `{feature}` feature")]
    BackendUnavailable {
        format: ModelFormat,
        feature: &'static str,
    },
    #[error("failed to load {format:?} model: {message}")]
    Backend { format: ModelFormat, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFormat {
    /// `.cfg` topology + `.weights`.
    Darknet,
    /// `.prototxt` topology + `.caffemodel`.
    Caffe,
    /// Single `.onnx` file; the topology path is ignored.
    Onnx,
}

/// Topology and weights paths of a network, with their inferred format.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelFiles {
    pub topology: PathBuf,
    pub weights: PathBuf,
    pub format: ModelFormat,
}

impl ModelFiles {
    /// Infers the format from file extensions.
    pub fn new(topology: &Path, weights: &Path) -> Result<Self, ModelLoadError> {
        let format = match (extension(topology).as_deref(), extension(weights).as_deref()) {
            (_, Some("onnx")) => ModelFormat::Onnx,
            (Some("cfg"), Some("weights")) => ModelFormat::Darknet,
            (Some("prototxt"), Some("caffemodel")) => ModelFormat::Caffe,
            _ => {
                return Err(ModelLoadError::UnsupportedFormat {
                    topology: topology.to_path_buf(),
                    weights: weights.to_path_buf(),
                })
            }
        };
        Ok(Self {
            topology: topology.to_path_buf(),
            weights: weights.to_path_buf(),
            format,
        })
    }

    /// Checks that every file the format needs exists and can be opened.
    ///
    /// Runs before any backend is touched so a bad path fails fast with a
    /// readable message instead of a backend-specific one.
    pub fn verify(&self) -> Result<(), ModelLoadError> {
        if self.format != ModelFormat::Onnx {
            check_readable("topology", &self.topology)?;
        }
        check_readable("weights", &self.weights)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn check_readable(role: &'static str, path: &Path) -> Result<(), ModelLoadError> {
    if !path.is_file() {
        return Err(ModelLoadError::Missing {
            role,
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|source| ModelLoadError::Unreadable {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
