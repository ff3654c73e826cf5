//! YOLO object detector on top of any [`InferenceEngine`].
//!
//! Runs the blob preprocessing, one forward pass, row decoding with the
//! width cap, then NMS.
use crate::detection::domain::detector::Detector;
use crate::detection::domain::nms::nms;
use crate::detection::domain::yolo_decoder::{decode_yolo, YoloDecodeParams};
use crate::inference::domain::blob::{blob_from_frame, BlobParams};
use crate::inference::domain::inference_engine::InferenceEngine;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

pub struct YoloDetector {
    engine: Box<dyn InferenceEngine>,
    blob: BlobParams,
    decode: YoloDecodeParams,
    nms_threshold: f32,
}

impl YoloDetector {
    pub fn new(
        engine: Box<dyn InferenceEngine>,
        blob: BlobParams,
        decode: YoloDecodeParams,
        nms_threshold: f32,
    ) -> Self {
        Self {
            engine,
            blob,
            decode,
            nms_threshold,
        }
    }
}

impl Detector for YoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let input = blob_from_frame(frame, &self.blob);
        let outputs = self.engine.forward(&input)?;

        let candidates = decode_yolo(&outputs, frame.width(), frame.height(), &self.decode);
        let kept = nms(&candidates, self.decode.confidence_threshold, self.nms_threshold);
        log::trace!(
            "frame {}: {} candidates, {} after NMS",
            frame.index(),
            candidates.len(),
            kept.len()
        );
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::yolo_decoder::CoordinateSpace;
    use crate::inference::domain::blob::ChannelOrder;
    use crate::shared::bbox::BoundingBox;
    use ndarray::{Array4, ArrayD, IxDyn};
    use std::sync::{Arc, Mutex};

    /// Returns the same canned output every call and records input shapes.
    struct StubEngine {
        output: ArrayD<f32>,
        seen_shapes: Arc<Mutex<Vec<Vec<usize>>>>,
    }

    impl InferenceEngine for StubEngine {
        fn forward(
            &mut self,
            input: &Array4<f32>,
        ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>> {
            self.seen_shapes.lock().unwrap().push(input.shape().to_vec());
            Ok(vec![self.output.clone()])
        }

        fn backend_name(&self) -> &'static str {
            "stub"
        }
    }

    struct FailingEngine;

    impl InferenceEngine for FailingEngine {
        fn forward(
            &mut self,
            _input: &Array4<f32>,
        ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>> {
            Err("forward failed".into())
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    fn detector(rows: Vec<f32>, n_rows: usize) -> (YoloDetector, Arc<Mutex<Vec<Vec<usize>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let engine = StubEngine {
            output: ArrayD::from_shape_vec(IxDyn(&[n_rows, 7]), rows).unwrap(),
            seen_shapes: seen.clone(),
        };
        let blob = BlobParams {
            width: 416,
            height: 416,
            scale: 1.0 / 255.0,
            mean: [0.0; 3],
            channel_order: ChannelOrder::Rgb,
        };
        let decode = YoloDecodeParams {
            confidence_threshold: 0.5,
            max_box_width: 600,
            coordinates: CoordinateSpace::Normalized,
        };
        (YoloDetector::new(Box::new(engine), blob, decode, 0.1), seen)
    }

    #[test]
    fn test_feeds_network_sized_blob() {
        let (mut det, seen) = detector(vec![0.0; 7], 1);
        det.detect(&Frame::filled(640, 480, [0, 0, 0])).unwrap();
        assert_eq!(seen.lock().unwrap()[0], vec![1, 3, 416, 416]);
    }

    #[test]
    fn test_static_frame_end_to_end() {
        // two overlapping candidates of class 0, one separate of class 1,
        // one below threshold, one too wide
        #[rustfmt::skip]
        let rows = vec![
            0.50, 0.50, 0.20, 0.20, 0.90, 0.95, 0.00,
            0.51, 0.51, 0.20, 0.20, 0.90, 0.80, 0.00,
            0.10, 0.10, 0.05, 0.05, 0.90, 0.00, 0.70,
            0.80, 0.80, 0.05, 0.05, 0.40, 0.99, 0.00,
            0.50, 0.50, 0.99, 0.20, 0.90, 0.99, 0.00,
        ];
        let (mut det, _) = detector(rows, 5);
        let dets = det.detect(&Frame::filled(1000, 500, [90, 90, 90])).unwrap();

        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0].class_id, 0);
        assert!((dets[0].confidence - 0.95).abs() < 1e-6);
        assert_eq!(dets[0].bbox, BoundingBox::new(400, 200, 200, 100));
        assert_eq!(dets[1].class_id, 1);
        assert!(dets.iter().all(|d| d.confidence > 0.5));
        assert!(dets.iter().all(|d| d.bbox.width < 600));
    }

    #[test]
    fn test_engine_error_propagates() {
        let blob = BlobParams {
            width: 8,
            height: 8,
            scale: 1.0,
            mean: [0.0; 3],
            channel_order: ChannelOrder::Rgb,
        };
        let decode = YoloDecodeParams {
            confidence_threshold: 0.5,
            max_box_width: 600,
            coordinates: CoordinateSpace::Normalized,
        };
        let mut det = YoloDetector::new(Box::new(FailingEngine), blob, decode, 0.1);
        let err = det.detect(&Frame::filled(4, 4, [0, 0, 0])).unwrap_err();
        assert_eq!(err.to_string(), "forward failed");
    }
}
