//! Decoding of SSD `DetectionOutput` tensors.
//!
//! The layer emits `[1, 1, N, 7]` with rows
//! `[image_id, class_id, confidence, x1, y1, x2, y2]`, corners normalized
//! to the frame.

use ndarray::ArrayD;

use crate::shared::bbox::BoundingBox;
use crate::shared::detection::Detection;

const ROW_LEN: usize = 7;

pub fn decode_ssd(
    output: &ArrayD<f32>,
    frame_width: u32,
    frame_height: u32,
    confidence_threshold: f32,
) -> Vec<Detection> {
    let contiguous = output.as_standard_layout();
    let Some(data) = contiguous.as_slice() else {
        return Vec::new();
    };
    if output.shape().last() != Some(&ROW_LEN) {
        log::warn!("Unexpected SSD output shape {:?}", output.shape());
        return Vec::new();
    }

    let fw = frame_width as f32;
    let fh = frame_height as f32;
    data.chunks_exact(ROW_LEN)
        .filter(|row| row[2] > confidence_threshold)
        .filter_map(|row| {
            let bbox = BoundingBox::from_corners(
                (row[3] * fw) as i32,
                (row[4] * fh) as i32,
                (row[5] * fw) as i32,
                (row[6] * fh) as i32,
            );
            if bbox.width <= 0 || bbox.height <= 0 {
                return None;
            }
            Some(Detection::new(bbox, row[1].max(0.0) as usize, row[2]))
        })
        .collect()
}
