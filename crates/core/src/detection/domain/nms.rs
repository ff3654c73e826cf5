//! Non-maximum suppression over decoded candidates.

use crate::shared::detection::Detection;

/// Returns the indices of `candidates` that survive NMS, best score first.
///
/// Candidates scoring at or below `score_threshold` are dropped up front.
/// The rest are visited in descending score order (ties keep input order)
/// and kept only if their IoU with every already-kept box is at most
/// `nms_threshold`.
pub fn nms_indices(
    candidates: &[Detection],
    score_threshold: f32,
    nms_threshold: f32,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].confidence > score_threshold)
        .collect();
    order.sort_by(|&a, &b| {
        candidates[b]
            .confidence
            .partial_cmp(&candidates[a].confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<usize> = Vec::new();
    for i in order {
        let suppressed = keep.iter().any(|&k| {
            candidates[i].bbox.iou(&candidates[k].bbox) > nms_threshold as f64
        });
        if !suppressed {
            keep.push(i);
        }
    }
    keep
}

/// Convenience wrapper returning the surviving detections themselves.
pub fn nms(candidates: &[Detection], score_threshold: f32, nms_threshold: f32) -> Vec<Detection> {
    nms_indices(candidates, score_threshold, nms_threshold)
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect()
}
