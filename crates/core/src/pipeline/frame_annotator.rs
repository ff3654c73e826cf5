use crate::rendering::domain::overlay::OverlayItem;
use crate::shared::frame::Frame;

/// Turns one frame into the boxes and labels to draw over it.
///
/// Each program plugs its own detector chain in here; the live loop adds
/// the FPS caption itself.
pub trait FrameAnnotator {
    fn annotate(&mut self, frame: &Frame) -> Result<Vec<OverlayItem>, Box<dyn std::error::Error>>;
}
