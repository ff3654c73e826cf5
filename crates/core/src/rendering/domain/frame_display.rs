use crate::rendering::domain::overlay::OverlayItem;
use crate::shared::frame::Frame;

/// An on-screen window that shows annotated frames and reports key presses.
pub trait FrameDisplay {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Draws `overlay` on a copy of `frame` and presents it.
    fn show(
        &mut self,
        frame: &Frame,
        overlay: &[OverlayItem],
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Pumps window events and returns the pressed key code, if any.
    fn poll_key(&mut self) -> Result<Option<i32>, Box<dyn std::error::Error>>;

    fn close(&mut self);
}
