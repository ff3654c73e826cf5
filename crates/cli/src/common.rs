use std::path::PathBuf;

use clap::Args;

use camsight_core::capture::infrastructure::opencv_camera::OpenCvCamera;
use camsight_core::pipeline::frame_annotator::FrameAnnotator;
use camsight_core::pipeline::live_detection_use_case::LiveDetectionUseCase;
use camsight_core::pipeline::pipeline_logger::SessionPipelineLogger;
use camsight_core::rendering::infrastructure::opencv_window::OpenCvWindow;
use camsight_core::shared::config::{CaptureConfig, CaptureTarget, RenderStyle};
use camsight_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, ESCAPE_KEY, REQUESTED_FRAME_HEIGHT, REQUESTED_FRAME_WIDTH,
};

/// Frames logged between progress messages at debug level.
const PROGRESS_EVERY: usize = 300;

/// Capture options shared by both programs.
#[derive(Args)]
pub struct CaptureArgs {
    /// Camera device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    pub camera: i32,

    /// Read from a video file instead of a camera.
    #[arg(long)]
    pub video: Option<PathBuf>,

    /// Requested capture width.
    #[arg(long, default_value_t = REQUESTED_FRAME_WIDTH)]
    pub width: u32,

    /// Requested capture height.
    #[arg(long, default_value_t = REQUESTED_FRAME_HEIGHT)]
    pub height: u32,
}

impl CaptureArgs {
    pub fn to_config(&self) -> CaptureConfig {
        CaptureConfig {
            target: CaptureTarget::select(self.camera, self.video.clone()),
            requested_width: self.width,
            requested_height: self.height,
        }
    }
}

/// Opens the capture source and window, then runs the loop until Esc or
/// end of stream.
pub fn run_live(
    annotator: Box<dyn FrameAnnotator>,
    window_title: &str,
    capture: &CaptureConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = LiveDetectionUseCase::new(
        Box::new(OpenCvCamera::new()),
        Box::new(OpenCvWindow::new(window_title, RenderStyle::default())),
        annotator,
        RenderStyle::default(),
        ESCAPE_KEY,
        Box::new(SessionPipelineLogger::new(PROGRESS_EVERY)),
    );
    use_case.execute(capture)?;
    Ok(())
}
