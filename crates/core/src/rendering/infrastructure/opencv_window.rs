use opencv::core::{self, Mat, Point, Rect, Scalar};
use opencv::prelude::*;
use opencv::{highgui, imgproc};

use crate::rendering::domain::frame_display::FrameDisplay;
use crate::rendering::domain::overlay::{label_placement, Color, OverlayItem};
use crate::shared::config::RenderStyle;
use crate::shared::frame::Frame;

const FONT: i32 = imgproc::FONT_HERSHEY_SIMPLEX;

/// A HighGUI window. Overlays are drawn with `imgproc` onto a BGR copy of
/// each frame before it is shown.
pub struct OpenCvWindow {
    title: String,
    style: RenderStyle,
    open: bool,
}

impl OpenCvWindow {
    pub fn new(title: impl Into<String>, style: RenderStyle) -> Self {
        Self {
            title: title.into(),
            style,
            open: false,
        }
    }

    fn draw(&self, canvas: &mut Mat, item: &OverlayItem) -> opencv::Result<()> {
        match item {
            OverlayItem::LabeledBox { bbox, label, color } => {
                let color = scalar(*color);
                imgproc::rectangle(
                    canvas,
                    Rect::new(bbox.left, bbox.top, bbox.width, bbox.height),
                    color,
                    self.style.box_thickness,
                    imgproc::LINE_8,
                    0,
                )?;

                let mut baseline = 0;
                let text_size = imgproc::get_text_size(
                    label,
                    FONT,
                    self.style.label_scale,
                    self.style.font_thickness,
                    &mut baseline,
                )?;
                let placement = label_placement(bbox, text_size.width, text_size.height);
                imgproc::rectangle_points(
                    canvas,
                    point(placement.background_top_left),
                    point(placement.background_bottom_right),
                    color,
                    imgproc::FILLED,
                    imgproc::LINE_8,
                    0,
                )?;
                imgproc::put_text(
                    canvas,
                    label,
                    point(placement.text_origin),
                    FONT,
                    self.style.label_scale,
                    scalar(Color::WHITE),
                    self.style.font_thickness,
                    imgproc::LINE_8,
                    false,
                )
            }
            OverlayItem::Caption {
                text,
                origin,
                scale,
                color,
            } => imgproc::put_text(
                canvas,
                text,
                point(*origin),
                FONT,
                *scale,
                scalar(*color),
                self.style.font_thickness,
                imgproc::LINE_8,
                false,
            ),
        }
    }
}

impl FrameDisplay for OpenCvWindow {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        highgui::named_window(&self.title, highgui::WINDOW_AUTOSIZE)?;
        self.open = true;
        log::debug!("Window \"{}\" opened", self.title);
        Ok(())
    }

    fn show(
        &mut self,
        frame: &Frame,
        overlay: &[OverlayItem],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut canvas = frame_to_bgr_mat(frame)?;
        for item in overlay {
            self.draw(&mut canvas, item)?;
        }
        highgui::imshow(&self.title, &canvas)?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(1)?;
        Ok((key >= 0).then_some(key))
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("Failed to close window \"{}\": {e}", self.title);
        }
    }
}

/// Copies an RGB frame into a new 8-bit BGR `Mat`.
fn frame_to_bgr_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    let mut rgb = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(frame.data());

    let mut bgr = Mat::default();
    imgproc::cvt_color_def(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR)?;
    Ok(bgr)
}

fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

fn point((x, y): (i32, i32)) -> Point {
    Point::new(x, y)
}
