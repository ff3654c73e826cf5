//! Decoding of YOLO-style output rows into frame-space candidates.
//!
//! Each row is `[cx, cy, w, h, objectness, class_0, class_1, ...]`. Every
//! output tensor is read as rows over its last dimension, so both the 2-D
//! per-scale outputs of Darknet and the 3-D `[1, N, 5 + C]` outputs of
//! ONNX exports decode the same way.

use ndarray::ArrayD;

use crate::shared::bbox::BoundingBox;
use crate::shared::detection::Detection;

/// Columns before the per-class scores.
const BOX_COLUMNS: usize = 5;

/// Unit of the raw box values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordinateSpace {
    /// Fractions of the frame (Darknet).
    Normalized,
    /// Pixels of the network input; divided by these sizes first.
    InputPixels { width: f32, height: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct YoloDecodeParams {
    pub confidence_threshold: f32,
    /// Candidates whose decoded width is at least this many pixels are dropped.
    pub max_box_width: i32,
    pub coordinates: CoordinateSpace,
}

/// Decodes every output tensor into candidates ready for NMS.
pub fn decode_yolo(
    outputs: &[ArrayD<f32>],
    frame_width: u32,
    frame_height: u32,
    params: &YoloDecodeParams,
) -> Vec<Detection> {
    let mut candidates = Vec::new();
    for output in outputs {
        let Some(&columns) = output.shape().last() else {
            continue;
        };
        if columns <= BOX_COLUMNS {
            log::warn!("Skipping output with {columns} columns; expected class scores");
            continue;
        }
        let contiguous = output.as_standard_layout();
        let Some(data) = contiguous.as_slice() else {
            continue;
        };
        candidates.extend(
            data.chunks_exact(columns)
                .filter_map(|row| decode_row(row, frame_width, frame_height, params)),
        );
    }
    candidates
}

fn decode_row(
    row: &[f32],
    frame_width: u32,
    frame_height: u32,
    params: &YoloDecodeParams,
) -> Option<Detection> {
    let objectness = row[4];
    if !above(objectness, params.confidence_threshold) {
        return None;
    }

    let (class_id, class_score) = best_class(&row[BOX_COLUMNS..])?;
    if !above(class_score, params.confidence_threshold) {
        return None;
    }

    let (cx, cy, w, h) = match params.coordinates {
        CoordinateSpace::Normalized => (row[0], row[1], row[2], row[3]),
        CoordinateSpace::InputPixels { width, height } => {
            (row[0] / width, row[1] / height, row[2] / width, row[3] / height)
        }
    };
    let fw = frame_width as f32;
    let fh = frame_height as f32;

    let width = (w * fw) as i32;
    if width >= params.max_box_width {
        return None;
    }
    let center_x = (cx * fw) as i32;
    let center_y = (cy * fh) as i32;
    let height = (h * fh) as i32;
    let bbox = BoundingBox::new(center_x - width / 2, center_y - height / 2, width, height);

    Some(Detection::new(bbox, class_id, class_score))
}

/// Strictly greater; false for NaN.
fn above(score: f32, threshold: f32) -> bool {
    score > threshold
}

/// First index holding the maximum score. NaN scores never win.
fn best_class(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .fold(None, |best, (i, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((i, score)),
        })
}
