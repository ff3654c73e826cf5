use std::path::PathBuf;
use std::process;

use clap::Parser;

use camsight_core::detection::domain::class_names::ClassNames;
use camsight_core::detection::infrastructure::yolo_detector::YoloDetector;
use camsight_core::inference::domain::model_files::ModelFiles;
use camsight_core::inference::infrastructure::engine_factory::load_engine;
use camsight_core::pipeline::object_annotator::ObjectAnnotator;
use camsight_core::shared::config::ObjectDetectionConfig;
use camsight_core::shared::constants::{
    CLASS_NAMES_FILE, MAX_BOX_WIDTH, OBJECT_CONFIDENCE_THRESHOLD, OBJECT_NMS_THRESHOLD,
    OBJECT_WINDOW_TITLE, YOLO_CONFIG_FILE, YOLO_INPUT_SIZE, YOLO_WEIGHTS_FILE,
};

mod common;

use common::CaptureArgs;

/// Real-time object detection on a webcam feed with a YOLO network.
#[derive(Parser)]
#[command(name = "camsight-objects")]
struct Cli {
    /// Network topology (.cfg for Darknet; unused for .onnx weights).
    #[arg(long, default_value = YOLO_CONFIG_FILE)]
    config: PathBuf,

    /// Network weights (.weights or .onnx).
    #[arg(long, default_value = YOLO_WEIGHTS_FILE)]
    weights: PathBuf,

    /// Class names, one per line.
    #[arg(long, default_value = CLASS_NAMES_FILE)]
    names: PathBuf,

    #[command(flatten)]
    capture: CaptureArgs,

    /// Detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = OBJECT_CONFIDENCE_THRESHOLD)]
    confidence: f32,

    /// Overlap above which the weaker of two boxes is dropped (0.0-1.0).
    #[arg(long, default_value_t = OBJECT_NMS_THRESHOLD)]
    nms: f32,

    /// Discard boxes at least this many pixels wide.
    #[arg(long, default_value_t = MAX_BOX_WIDTH)]
    max_width: i32,

    /// Square network input size in pixels.
    #[arg(long, default_value_t = YOLO_INPUT_SIZE)]
    input_size: u32,

    /// Model outputs boxes in input pixels instead of normalized coordinates.
    #[arg(long)]
    pixel_coords: bool,
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
    let config = ObjectDetectionConfig {
        config_path: cli.config,
        weights_path: cli.weights,
        names_path: cli.names,
        confidence_threshold: cli.confidence,
        nms_threshold: cli.nms,
        max_box_width: cli.max_width,
        input_size: cli.input_size,
        pixel_coordinates: cli.pixel_coords,
    };
    config.validate()?;
    capture.validate()?;

    let files = ModelFiles::new(&config.config_path, &config.weights_path)?;
    let engine = load_engine(&files)?;
    let names = ClassNames::load(&config.names_path)?;
    log::info!(
        "{} class names from {}",
        names.len(),
        config.names_path.display()
    );

    let detector = YoloDetector::new(
        engine,
        config.blob_params(),
        config.decode_params(),
        config.nms_threshold,
    );
    let annotator = ObjectAnnotator::new(Box::new(detector), names);
    common::run_live(Box::new(annotator), OBJECT_WINDOW_TITLE, &capture)
}
