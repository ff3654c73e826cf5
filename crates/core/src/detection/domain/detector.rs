use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for a frame → detections pass.
///
/// Implementations own their inference engine, hence `&mut self`.
pub trait Detector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
