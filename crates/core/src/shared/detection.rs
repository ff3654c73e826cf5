use crate::shared::bbox::BoundingBox;

/// One detector hit, valid for the frame that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub class_id: usize,
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, class_id: usize, confidence: f32) -> Self {
        Self {
            bbox,
            class_id,
            confidence,
        }
    }

    /// Confidence as a whole percentage, truncated.
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0) as u32
    }
}
