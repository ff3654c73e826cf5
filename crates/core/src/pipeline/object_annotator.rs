use crate::detection::domain::class_names::ClassNames;
use crate::detection::domain::detector::Detector;
use crate::pipeline::frame_annotator::FrameAnnotator;
use crate::rendering::domain::overlay::{confidence_label, Color, OverlayItem};
use crate::shared::frame::Frame;

/// Labels every detection with its class name and confidence, in green.
pub struct ObjectAnnotator {
    detector: Box<dyn Detector>,
    names: ClassNames,
}

impl ObjectAnnotator {
    pub fn new(detector: Box<dyn Detector>, names: ClassNames) -> Self {
        Self { detector, names }
    }
}

impl FrameAnnotator for ObjectAnnotator {
    fn annotate(&mut self, frame: &Frame) -> Result<Vec<OverlayItem>, Box<dyn std::error::Error>> {
        let detections = self.detector.detect(frame)?;
        Ok(detections
            .iter()
            .map(|d| OverlayItem::LabeledBox {
                bbox: d.bbox,
                label: confidence_label(&self.names.name(d.class_id), d.percent()),
                color: Color::GREEN,
            })
            .collect())
    }
}
