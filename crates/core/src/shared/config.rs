use std::path::PathBuf;

use thiserror::Error;

use crate::detection::domain::yolo_decoder::{CoordinateSpace, YoloDecodeParams};
use crate::inference::domain::blob::{BlobParams, ChannelOrder};
use crate::recognition::domain::face_matcher::MatchPolicy;
use crate::shared::constants::*;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Where frames come from.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureTarget {
    Device(i32),
    File(PathBuf),
}

impl CaptureTarget {
    /// A video file, when given, wins over the camera index.
    pub fn select(camera: i32, video: Option<PathBuf>) -> Self {
        match video {
            Some(path) => Self::File(path),
            None => Self::Device(camera),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaptureConfig {
    pub target: CaptureTarget,
    /// Resolution asked of the camera; drivers may pick something else.
    pub requested_width: u32,
    pub requested_height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            target: CaptureTarget::Device(DEFAULT_CAMERA_INDEX),
            requested_width: REQUESTED_FRAME_WIDTH,
            requested_height: REQUESTED_FRAME_HEIGHT,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("requested width", self.requested_width as f64)?;
        positive("requested height", self.requested_height as f64)
    }
}

/// Stroke and font settings shared by both programs.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub box_thickness: i32,
    pub font_thickness: i32,
    pub label_scale: f64,
    pub fps_scale: f64,
    pub fps_origin: (i32, i32),
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            box_thickness: 2,
            font_thickness: 2,
            label_scale: 0.6,
            fps_scale: 0.7,
            fps_origin: (10, 30),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectDetectionConfig {
    pub config_path: PathBuf,
    pub weights_path: PathBuf,
    pub names_path: PathBuf,
    pub confidence_threshold: f32,
    pub nms_threshold: f32,
    pub max_box_width: i32,
    pub input_size: u32,
    /// Raw boxes are in network-input pixels rather than normalized `[0, 1]`.
    pub pixel_coordinates: bool,
}

impl Default for ObjectDetectionConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(YOLO_CONFIG_FILE),
            weights_path: PathBuf::from(YOLO_WEIGHTS_FILE),
            names_path: PathBuf::from(CLASS_NAMES_FILE),
            confidence_threshold: OBJECT_CONFIDENCE_THRESHOLD,
            nms_threshold: OBJECT_NMS_THRESHOLD,
            max_box_width: MAX_BOX_WIDTH,
            input_size: YOLO_INPUT_SIZE,
            pixel_coordinates: false,
        }
    }
}

impl ObjectDetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_range("confidence", self.confidence_threshold as f64)?;
        unit_range("nms threshold", self.nms_threshold as f64)?;
        positive("max box width", self.max_box_width as f64)?;
        positive("input size", self.input_size as f64)
    }

    pub fn blob_params(&self) -> BlobParams {
        BlobParams {
            width: self.input_size,
            height: self.input_size,
            scale: 1.0 / 255.0,
            mean: [0.0; 3],
            channel_order: ChannelOrder::Rgb,
        }
    }

    pub fn decode_params(&self) -> YoloDecodeParams {
        let coordinates = if self.pixel_coordinates {
            CoordinateSpace::InputPixels {
                width: self.input_size as f32,
                height: self.input_size as f32,
            }
        } else {
            CoordinateSpace::Normalized
        };
        YoloDecodeParams {
            confidence_threshold: self.confidence_threshold,
            max_box_width: self.max_box_width,
            coordinates,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaceRecognitionConfig {
    pub config_path: PathBuf,
    pub weights_path: PathBuf,
    pub gallery_dir: PathBuf,
    pub confidence_threshold: f32,
    /// Minimum confidence for a reference-image face to enter the gallery.
    pub gallery_confidence: f32,
    pub tolerance: f64,
    pub policy: MatchPolicy,
    pub input_size: u32,
}

impl Default for FaceRecognitionConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(SSD_CONFIG_FILE),
            weights_path: PathBuf::from(SSD_WEIGHTS_FILE),
            gallery_dir: PathBuf::from(GALLERY_DIR),
            confidence_threshold: FACE_CONFIDENCE_THRESHOLD,
            gallery_confidence: FACE_CONFIDENCE_THRESHOLD,
            tolerance: FACE_MATCH_TOLERANCE,
            policy: MatchPolicy::default(),
            input_size: SSD_INPUT_SIZE,
        }
    }
}

impl FaceRecognitionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_range("confidence", self.confidence_threshold as f64)?;
        unit_range("gallery confidence", self.gallery_confidence as f64)?;
        positive("tolerance", self.tolerance)?;
        positive("input size", self.input_size as f64)
    }

    pub fn blob_params(&self) -> BlobParams {
        BlobParams {
            width: self.input_size,
            height: self.input_size,
            scale: 1.0,
            mean: SSD_MEAN_BGR,
            channel_order: ChannelOrder::Bgr,
        }
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_object_defaults() {
        let cfg = ObjectDetectionConfig::default();
        assert_relative_eq!(cfg.confidence_threshold, 0.5);
        assert_relative_eq!(cfg.nms_threshold, 0.1);
        assert_eq!(cfg.max_box_width, 600);
        assert_eq!(cfg.input_size, 416);
        assert_eq!(cfg.weights_path, PathBuf::from("yolov4-tiny-obj_final.weights"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_object_blob_params_scale_to_unit_range() {
        let params = ObjectDetectionConfig::default().blob_params();
        assert_eq!((params.width, params.height), (416, 416));
        assert_relative_eq!(params.scale, 1.0 / 255.0);
        assert_eq!(params.channel_order, ChannelOrder::Rgb);
    }

    #[test]
    fn test_pixel_coordinates_use_input_size() {
        let cfg = ObjectDetectionConfig {
            pixel_coordinates: true,
            input_size: 320,
            ..Default::default()
        };
        assert_eq!(
            cfg.decode_params().coordinates,
            CoordinateSpace::InputPixels {
                width: 320.0,
                height: 320.0
            }
        );
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let cfg = ObjectDetectionConfig {
            confidence_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ThresholdOutOfRange { name: "confidence", .. })
        ));
    }

    #[test]
    fn test_zero_max_width_rejected() {
        let cfg = ObjectDetectionConfig {
            max_box_width: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_face_defaults() {
        let cfg = FaceRecognitionConfig::default();
        assert_eq!(cfg.policy, MatchPolicy::WithinTolerance);
        assert_eq!(cfg.gallery_dir, PathBuf::from("faces"));
        let blob = cfg.blob_params();
        assert_eq!(blob.channel_order, ChannelOrder::Bgr);
        assert_eq!(blob.mean, [104.0, 177.0, 123.0]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_face_negative_tolerance_rejected() {
        let cfg = FaceRecognitionConfig {
            tolerance: -1.0,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                name: "tolerance",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_capture_defaults_to_first_camera() {
        let cfg = CaptureConfig::default();
        assert_eq!(cfg.target, CaptureTarget::Device(0));
        assert_eq!((cfg.requested_width, cfg.requested_height), (1280, 720));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_camera_target_without_video() {
        assert_eq!(CaptureTarget::select(2, None), CaptureTarget::Device(2));
    }

    #[test]
    fn test_video_overrides_camera() {
        let target = CaptureTarget::select(2, Some(PathBuf::from("clip.mp4")));
        assert_eq!(target, CaptureTarget::File(PathBuf::from("clip.mp4")));
    }
}
