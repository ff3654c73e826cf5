use crate::detection::domain::detector::Detector;
use crate::pipeline::frame_annotator::FrameAnnotator;
use crate::recognition::domain::face_matcher::FaceMatcher;
use crate::recognition::domain::gallery::Gallery;
use crate::rendering::domain::overlay::{confidence_label, Color, OverlayItem};
use crate::shared::frame::Frame;

/// Detects faces, names each one against the gallery, and boxes it green
/// when recognized or red when not.
pub struct FaceAnnotator {
    detector: Box<dyn Detector>,
    gallery: Gallery,
    matcher: FaceMatcher,
}

impl FaceAnnotator {
    pub fn new(detector: Box<dyn Detector>, gallery: Gallery, matcher: FaceMatcher) -> Self {
        Self {
            detector,
            gallery,
            matcher,
        }
    }
}

impl FrameAnnotator for FaceAnnotator {
    fn annotate(&mut self, frame: &Frame) -> Result<Vec<OverlayItem>, Box<dyn std::error::Error>> {
        let faces = self.detector.detect(frame)?;
        let mut items = Vec::with_capacity(faces.len());

        for face in &faces {
            // boxes entirely off-frame have nothing to compare
            let Some(crop) = frame.crop(&face.bbox) else {
                continue;
            };
            let identity = self.matcher.identify(&crop, &self.gallery);
            let color = if identity.is_known() {
                Color::GREEN
            } else {
                Color::RED
            };
            items.push(OverlayItem::LabeledBox {
                bbox: face.bbox,
                label: confidence_label(identity.label(), face.percent()),
                color,
            });
        }
        Ok(items)
    }
}
