use std::time::Instant;

use crate::capture::domain::frame_source::FrameSource;
use crate::pipeline::frame_annotator::FrameAnnotator;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::rendering::domain::fps_counter::FpsCounter;
use crate::rendering::domain::frame_display::FrameDisplay;
use crate::rendering::domain::overlay::fps_caption;
use crate::shared::config::{CaptureConfig, RenderStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The user pressed the exit key.
    ExitKey,
    /// The source returned an empty frame.
    SourceExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopOutcome {
    pub frames: usize,
    pub reason: ExitReason,
}

/// Capture → annotate → draw → show, one frame at a time, until the exit
/// key is pressed or the source runs dry.
///
/// The source and display are closed on every exit path, including errors.
pub struct LiveDetectionUseCase {
    source: Box<dyn FrameSource>,
    display: Box<dyn FrameDisplay>,
    annotator: Box<dyn FrameAnnotator>,
    style: RenderStyle,
    exit_key: i32,
    logger: Box<dyn PipelineLogger>,
}

impl LiveDetectionUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        display: Box<dyn FrameDisplay>,
        annotator: Box<dyn FrameAnnotator>,
        style: RenderStyle,
        exit_key: i32,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            display,
            annotator,
            style,
            exit_key,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        capture: &CaptureConfig,
    ) -> Result<LoopOutcome, Box<dyn std::error::Error>> {
        let result = self.open_and_run(capture);

        self.source.close();
        self.display.close();
        self.logger.summary();

        if let Ok(outcome) = &result {
            log::info!(
                "Stopped after {} frames ({:?})",
                outcome.frames,
                outcome.reason
            );
        }
        result
    }

    fn open_and_run(
        &mut self,
        capture: &CaptureConfig,
    ) -> Result<LoopOutcome, Box<dyn std::error::Error>> {
        self.source.open(capture)?;
        self.logger.info("Starting real-time detection...");
        self.display.open()?;
        self.run_loop()
    }

    fn run_loop(&mut self) -> Result<LoopOutcome, Box<dyn std::error::Error>> {
        let mut fps = FpsCounter::new(Instant::now());
        let mut frames = 0;
        let mut stream = self.source.frames();

        loop {
            let start = Instant::now();
            let Some(frame) = stream.next() else {
                return Ok(LoopOutcome {
                    frames,
                    reason: ExitReason::SourceExhausted,
                });
            };
            let frame = frame?;
            self.logger.timing("capture", elapsed_ms(start));

            let start = Instant::now();
            let mut overlay = self.annotator.annotate(&frame)?;
            self.logger.timing("detect", elapsed_ms(start));
            self.logger.metric("detections", overlay.len() as f64);

            frames += 1;
            overlay.push(fps_caption(fps.tick(Instant::now()), &self.style));

            let start = Instant::now();
            self.display.show(&frame, &overlay)?;
            self.logger.timing("render", elapsed_ms(start));
            self.logger.progress(frames);

            if self.display.poll_key()? == Some(self.exit_key) {
                return Ok(LoopOutcome {
                    frames,
                    reason: ExitReason::ExitKey,
                });
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
