use opencv::core::Mat;
use opencv::imgproc;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::config::{CaptureConfig, CaptureTarget};
use crate::shared::frame::Frame;

/// Reads frames through `cv::VideoCapture`, from a device index or a file.
///
/// Frames arrive from OpenCV as BGR and are converted to RGB here.
pub struct OpenCvCamera {
    capture: Option<VideoCapture>,
    next_index: usize,
}

impl OpenCvCamera {
    pub fn new() -> Self {
        Self {
            capture: None,
            next_index: 0,
        }
    }
}

impl Default for OpenCvCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for OpenCvCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(u32, u32), Box<dyn std::error::Error>> {
        let mut capture = match &config.target {
            CaptureTarget::Device(index) => VideoCapture::new(*index, videoio::CAP_ANY)?,
            CaptureTarget::File(path) => {
                let path = path
                    .to_str()
                    .ok_or_else(|| format!("video path is not valid UTF-8: {}", path.display()))?;
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };
        if !capture.is_opened()? {
            return Err(format!("cannot open capture source {}", describe(&config.target)).into());
        }

        if let CaptureTarget::Device(_) = config.target {
            capture.set(videoio::CAP_PROP_FRAME_WIDTH, config.requested_width as f64)?;
            capture.set(videoio::CAP_PROP_FRAME_HEIGHT, config.requested_height as f64)?;
        }
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        log::info!(
            "Opened {} at {width}x{height}",
            describe(&config.target)
        );

        self.capture = Some(capture);
        self.next_index = 0;
        Ok((width, height))
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let Some(capture) = self.capture.as_mut() else {
            let err: Box<dyn std::error::Error> = "capture source is not open".into();
            return Box::new(std::iter::once(Err::<Frame, _>(err)));
        };
        let next_index = &mut self.next_index;
        Box::new(std::iter::from_fn(move || {
            read_frame(capture, next_index).transpose()
        }))
    }

    fn close(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if let Err(e) = capture.release() {
                log::warn!("Failed to release capture device: {e}");
            }
        }
    }
}

fn read_frame(
    capture: &mut VideoCapture,
    next_index: &mut usize,
) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
    let mut bgr = Mat::default();
    if !capture.read(&mut bgr)? || bgr.empty() {
        return Ok(None);
    }

    let mut rgb = Mat::default();
    imgproc::cvt_color_def(&bgr, &mut rgb, imgproc::COLOR_BGR2RGB)?;
    let frame = Frame::new(
        rgb.data_bytes()?.to_vec(),
        rgb.cols() as u32,
        rgb.rows() as u32,
        *next_index,
    );
    *next_index += 1;
    Ok(Some(frame))
}

fn describe(target: &CaptureTarget) -> String {
    match target {
        CaptureTarget::Device(index) => format!("camera {index}"),
        CaptureTarget::File(path) => format!("video file {}", path.display()),
    }
}
