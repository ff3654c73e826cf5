use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::detector::Detector;
use crate::detection::infrastructure::ssd_face_detector::SsdFaceDetector;
use crate::recognition::domain::gallery::Gallery;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("cannot read gallery directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode reference image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("face detection failed on {path}: {message}")]
    Detection { path: PathBuf, message: String },
}

/// Builds a gallery from a directory of labeled reference photos.
///
/// Each image file (sorted by file name) is run through `detector`; the
/// first detection at or above `min_confidence` is cropped and stored
/// under the file stem as its label. Images without such a face are
/// skipped with a warning.
pub fn load_gallery(
    dir: &Path,
    detector: &mut dyn Detector,
    min_confidence: f32,
) -> Result<Gallery, GalleryError> {
    let mut gallery = Gallery::new();

    for path in reference_images(dir)? {
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let image = image::open(&path).map_err(|source| GalleryError::Image {
            path: path.clone(),
            source,
        })?;
        let frame = Frame::from_rgb_image(image.to_rgb8(), 0);

        let detections = detector
            .detect(&frame)
            .map_err(|e| GalleryError::Detection {
                path: path.clone(),
                message: e.to_string(),
            })?;
        let crop = detections
            .iter()
            .filter(|d| d.confidence >= min_confidence)
            .find_map(|d| frame.crop(&d.bbox));

        match crop {
            Some(crop) => {
                log::debug!(
                    "Gallery: {label} ({}x{}) from {}",
                    crop.width(),
                    crop.height(),
                    path.display()
                );
                gallery.push(label, crop);
            }
            None => log::warn!("No face found in reference image {}", path.display()),
        }
    }

    if gallery.is_empty() {
        log::warn!("Face gallery at {} is empty; every face will be unknown", dir.display());
    } else {
        log::info!("Loaded {} reference faces from {}", gallery.len(), dir.display());
    }
    Ok(gallery)
}

/// [`load_gallery`] with an SSD face detector whose live threshold is
/// lifted for the duration of the load, so `min_confidence` alone decides
/// which faces enter the gallery. The live threshold is restored afterwards,
/// whether or not loading succeeded.
pub fn load_gallery_with_ssd(
    dir: &Path,
    detector: &mut SsdFaceDetector,
    min_confidence: f32,
) -> Result<Gallery, GalleryError> {
    let live_threshold = detector.confidence_threshold();
    detector.set_confidence_threshold(f32::NEG_INFINITY);
    let result = load_gallery(dir, detector, min_confidence);
    detector.set_confidence_threshold(live_threshold);
    result
}

fn reference_images(dir: &Path) -> Result<Vec<PathBuf>, GalleryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| GalleryError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_image(path))
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::domain::blob::{BlobParams, ChannelOrder};
    use crate::inference::domain::inference_engine::InferenceEngine;
    use crate::shared::bbox::BoundingBox;
    use crate::shared::detection::Detection;
    use approx::assert_relative_eq;
    use ndarray::{Array4, ArrayD, IxDyn};
    use rstest::rstest;

    /// Reports fixed detections for every frame and counts calls.
    struct FixedDetector {
        detections: Vec<Detection>,
        calls: usize,
    }

    impl Detector for FixedDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            self.calls += 1;
            Ok(self.detections.clone())
        }
    }

    struct BrokenDetector;

    impl Detector for BrokenDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Err("backend exploded".into())
        }
    }

    /// Returns one SSD row with the given confidence for every input.
    struct OneFaceEngine(f32);

    impl InferenceEngine for OneFaceEngine {
        fn forward(
            &mut self,
            _input: &Array4<f32>,
        ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>> {
            let row = vec![0.0, 1.0, self.0, 0.1, 0.1, 0.5, 0.5];
            Ok(vec![ArrayD::from_shape_vec(IxDyn(&[1, 1, 1, 7]), row)?])
        }

        fn backend_name(&self) -> &'static str {
            "one-face"
        }
    }

    fn ssd_detector(face_confidence: f32, live_threshold: f32) -> SsdFaceDetector {
        let blob = BlobParams {
            width: 300,
            height: 300,
            scale: 1.0,
            mean: [104.0, 177.0, 123.0],
            channel_order: ChannelOrder::Bgr,
        };
        SsdFaceDetector::new(Box::new(OneFaceEngine(face_confidence)), blob, live_threshold)
    }

    fn write_image(dir: &Path, name: &str, rgb: [u8; 3]) {
        let img = image::RgbImage::from_pixel(40, 30, image::Rgb(rgb));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_labels_from_file_stems_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "zoe.png", [10, 10, 10]);
        write_image(dir.path(), "alice.png", [200, 0, 0]);
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let mut detector = FixedDetector {
            detections: vec![Detection::new(BoundingBox::new(5, 5, 10, 12), 1, 0.9)],
            calls: 0,
        };
        let gallery = load_gallery(dir.path(), &mut detector, 0.5).unwrap();

        assert_eq!(detector.calls, 2);
        assert_eq!(gallery.labels().collect::<Vec<_>>(), vec!["alice", "zoe"]);
        let alice = &gallery.entries()[0].crop;
        assert_eq!((alice.width(), alice.height()), (10, 12));
        assert_eq!(&alice.data()[0..3], &[200, 0, 0]);
    }

    #[test]
    fn test_uses_first_confident_face() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "carol.png", [1, 2, 3]);
        let mut detector = FixedDetector {
            detections: vec![
                Detection::new(BoundingBox::new(0, 0, 4, 4), 1, 0.3),
                Detection::new(BoundingBox::new(0, 0, 8, 6), 1, 0.8),
                Detection::new(BoundingBox::new(0, 0, 20, 20), 1, 0.95),
            ],
            calls: 0,
        };
        let gallery = load_gallery(dir.path(), &mut detector, 0.5).unwrap();
        let crop = &gallery.entries()[0].crop;
        assert_eq!((crop.width(), crop.height()), (8, 6));
    }

    #[test]
    fn test_image_without_face_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "nobody.png", [0, 0, 0]);
        let mut detector = FixedDetector {
            detections: Vec::new(),
            calls: 0,
        };
        let gallery = load_gallery(dir.path(), &mut detector, 0.5).unwrap();
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let mut detector = FixedDetector {
            detections: Vec::new(),
            calls: 0,
        };
        let err = load_gallery(Path::new("/nonexistent/faces"), &mut detector, 0.5).unwrap_err();
        assert!(matches!(err, GalleryError::Directory { .. }));
    }

    #[test]
    fn test_corrupt_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg").unwrap();
        let mut detector = FixedDetector {
            detections: Vec::new(),
            calls: 0,
        };
        let err = load_gallery(dir.path(), &mut detector, 0.5).unwrap_err();
        assert!(matches!(err, GalleryError::Image { .. }));
    }

    #[test]
    fn test_detector_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "dave.png", [5, 5, 5]);
        let err = load_gallery(dir.path(), &mut BrokenDetector, 0.5).unwrap_err();
        assert!(err.to_string().contains("backend exploded"));
    }

    #[rstest]
    #[case::exactly_at_minimum(0.75, 1)]
    #[case::just_above(0.76, 1)]
    #[case::below(0.7, 0)]
    fn test_ssd_gallery_accepts_faces_at_minimum(
        #[case] face_confidence: f32,
        #[case] expected: usize,
    ) {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "erin.png", [9, 9, 9]);
        let mut detector = ssd_detector(face_confidence, 0.75);

        let gallery = load_gallery_with_ssd(dir.path(), &mut detector, 0.75).unwrap();

        assert_eq!(gallery.len(), expected);
    }

    #[test]
    fn test_ssd_gallery_ignores_stricter_live_threshold() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "frank.png", [9, 9, 9]);
        let mut detector = ssd_detector(0.6, 0.9);

        let gallery = load_gallery_with_ssd(dir.path(), &mut detector, 0.5).unwrap();

        assert_eq!(gallery.len(), 1);
        assert_relative_eq!(detector.confidence_threshold(), 0.9);
    }

    #[test]
    fn test_ssd_live_threshold_restored_after_error() {
        let mut detector = ssd_detector(0.9, 0.4);
        let missing = Path::new("/nonexistent/faces");
        assert!(load_gallery_with_ssd(missing, &mut detector, 0.5).is_err());
        assert_relative_eq!(detector.confidence_threshold(), 0.4);
    }
}
