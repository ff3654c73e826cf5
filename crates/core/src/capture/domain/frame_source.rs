use crate::shared::config::CaptureConfig;
use crate::shared::frame::Frame;

/// Produces frames from a camera or a recorded clip.
///
/// The pipeline only sees RGB [`Frame`]s; device handling and color
/// conversion stay behind this trait.
pub trait FrameSource {
    /// Acquires the device or file and returns the frame size it delivers.
    fn open(&mut self, config: &CaptureConfig) -> Result<(u32, u32), Box<dyn std::error::Error>>;

    /// Returns frames in capture order. The iterator ends at the first
    /// empty read (camera unplugged, end of file).
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases the device. Safe to call more than once.
    fn close(&mut self);
}
