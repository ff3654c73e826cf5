//! Face detector for single-class SSD networks (e.g. the ResNet-10 Caffe model).
use crate::detection::domain::detector::Detector;
use crate::detection::domain::ssd_decoder::decode_ssd;
use crate::inference::domain::blob::{blob_from_frame, BlobParams};
use crate::inference::domain::inference_engine::InferenceEngine;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

pub struct SsdFaceDetector {
    engine: Box<dyn InferenceEngine>,
    blob: BlobParams,
    confidence_threshold: f32,
}

impl SsdFaceDetector {
    pub fn new(
        engine: Box<dyn InferenceEngine>,
        blob: BlobParams,
        confidence_threshold: f32,
    ) -> Self {
        Self {
            engine,
            blob,
            confidence_threshold,
        }
    }

    /// Same network, different acceptance threshold. Used for gallery
    /// building, which may want stricter faces than the live loop.
    pub fn set_confidence_threshold(&mut self, threshold: f32) {
        self.confidence_threshold = threshold;
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}

impl Detector for SsdFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let input = blob_from_frame(frame, &self.blob);
        let outputs = self.engine.forward(&input)?;
        let output = outputs.first().ok_or("SSD model produced no outputs")?;
        Ok(decode_ssd(
            output,
            frame.width(),
            frame.height(),
            self.confidence_threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::domain::blob::ChannelOrder;
    use crate::shared::bbox::BoundingBox;
    use ndarray::{Array4, ArrayD, IxDyn};

    struct CannedEngine(Vec<ArrayD<f32>>);

    impl InferenceEngine for CannedEngine {
        fn forward(
            &mut self,
            _input: &Array4<f32>,
        ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>> {
            Ok(self.0.clone())
        }

        fn backend_name(&self) -> &'static str {
            "canned"
        }
    }

    fn blob() -> BlobParams {
        BlobParams {
            width: 300,
            height: 300,
            scale: 1.0,
            mean: [104.0, 177.0, 123.0],
            channel_order: ChannelOrder::Bgr,
        }
    }

    #[test]
    fn test_detects_faces_above_threshold() {
        let out = ArrayD::from_shape_vec(
            IxDyn(&[1, 1, 2, 7]),
            vec![
                0.0, 1.0, 0.99, 0.1, 0.1, 0.3, 0.4, //
                0.0, 1.0, 0.20, 0.5, 0.5, 0.7, 0.7,
            ],
        )
        .unwrap();
        let mut det = SsdFaceDetector::new(Box::new(CannedEngine(vec![out])), blob(), 0.5);
        let faces = det.detect(&Frame::filled(100, 100, [0, 0, 0])).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].bbox, BoundingBox::new(10, 10, 20, 30));
    }

    #[test]
    fn test_threshold_can_be_raised() {
        let row = vec![0.0, 1.0, 0.7, 0.1, 0.1, 0.3, 0.4];
        let out = ArrayD::from_shape_vec(IxDyn(&[1, 1, 1, 7]), row).unwrap();
        let mut det = SsdFaceDetector::new(Box::new(CannedEngine(vec![out])), blob(), 0.5);
        det.set_confidence_threshold(0.9);
        assert!((det.confidence_threshold() - 0.9).abs() < f32::EPSILON);
        assert!(det.detect(&Frame::filled(10, 10, [0, 0, 0])).unwrap().is_empty());
    }

    #[test]
    fn test_no_outputs_is_error() {
        let mut det = SsdFaceDetector::new(Box::new(CannedEngine(Vec::new())), blob(), 0.5);
        assert!(det.detect(&Frame::filled(10, 10, [0, 0, 0])).is_err());
    }
}
