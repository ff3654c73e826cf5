use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use camsight_core::detection::infrastructure::ssd_face_detector::SsdFaceDetector;
use camsight_core::inference::domain::model_files::ModelFiles;
use camsight_core::inference::infrastructure::engine_factory::load_engine;
use camsight_core::pipeline::face_annotator::FaceAnnotator;
use camsight_core::recognition::domain::face_matcher::{FaceMatcher, MatchPolicy};
use camsight_core::recognition::infrastructure::gallery_loader::load_gallery_with_ssd;
use camsight_core::shared::config::FaceRecognitionConfig;
use camsight_core::shared::constants::{
    FACE_CONFIDENCE_THRESHOLD, FACE_MATCH_TOLERANCE, FACE_WINDOW_TITLE, GALLERY_DIR,
    SSD_CONFIG_FILE, SSD_INPUT_SIZE, SSD_WEIGHTS_FILE,
};

mod common;

use common::CaptureArgs;

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Match when the pixel distance is below the tolerance.
    WithinTolerance,
    /// Match when the pixel distance is above the tolerance (legacy behavior).
    BeyondTolerance,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::WithinTolerance => MatchPolicy::WithinTolerance,
            PolicyArg::BeyondTolerance => MatchPolicy::BeyondTolerance,
        }
    }
}

/// Real-time face recognition on a webcam feed against a folder of
/// labeled reference photos.
#[derive(Parser)]
#[command(name = "camsight-faces")]
struct Cli {
    /// Face detector topology (.prototxt; unused for .onnx weights).
    #[arg(long, default_value = SSD_CONFIG_FILE)]
    config: PathBuf,

    /// Face detector weights (.caffemodel or .onnx).
    #[arg(long, default_value = SSD_WEIGHTS_FILE)]
    weights: PathBuf,

    /// Directory of reference photos; each file name is a person's label.
    #[arg(long, default_value = GALLERY_DIR)]
    gallery: PathBuf,

    #[command(flatten)]
    capture: CaptureArgs,

    /// Live face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = FACE_CONFIDENCE_THRESHOLD)]
    confidence: f32,

    /// Confidence a reference photo's face needs to enter the gallery (0.0-1.0).
    #[arg(long, default_value_t = FACE_CONFIDENCE_THRESHOLD)]
    gallery_confidence: f32,

    /// Pixel distance threshold for a match.
    #[arg(long, default_value_t = FACE_MATCH_TOLERANCE)]
    tolerance: f64,

    /// How the distance is compared against the tolerance.
    #[arg(long, value_enum, default_value = "within-tolerance")]
    match_policy: PolicyArg,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let capture = cli.capture.to_config();
    let config = FaceRecognitionConfig {
        config_path: cli.config,
        weights_path: cli.weights,
        gallery_dir: cli.gallery,
        confidence_threshold: cli.confidence,
        gallery_confidence: cli.gallery_confidence,
        tolerance: cli.tolerance,
        policy: cli.match_policy.into(),
        input_size: SSD_INPUT_SIZE,
    };
    config.validate()?;
    capture.validate()?;

    let files = ModelFiles::new(&config.config_path, &config.weights_path)?;
    let engine = load_engine(&files)?;

    let mut detector =
        SsdFaceDetector::new(engine, config.blob_params(), config.confidence_threshold);
    let gallery =
        load_gallery_with_ssd(&config.gallery_dir, &mut detector, config.gallery_confidence)?;

    let matcher = FaceMatcher::new(config.tolerance, config.policy);
    let annotator = FaceAnnotator::new(Box::new(detector), gallery, matcher);
    common::run_live(Box::new(annotator), FACE_WINDOW_TITLE, &capture)
}
