use image::imageops::FilterType;
use image::RgbImage;

use crate::shared::bbox::BoundingBox;

/// A single captured frame: contiguous RGB bytes in row-major order.
///
/// Color conversion happens at the capture and display boundaries only;
/// everything in between sees RGB.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

pub const CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// Solid-color frame, mostly useful for tests and placeholders.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self::new(data, width, height, 0)
    }

    pub fn from_rgb_image(image: RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Bilinear resize to exactly `width` × `height`.
    pub fn resized(&self, width: u32, height: u32) -> Frame {
        if width == self.width && height == self.height {
            return self.clone();
        }
        match self.to_rgb_image() {
            Some(img) => Frame::from_rgb_image(
                image::imageops::resize(&img, width, height, FilterType::Triangle),
                self.index,
            ),
            None => Frame::filled(width, height, [0, 0, 0]),
        }
    }

    /// Copies the pixels under `bbox`, clipped to the frame.
    ///
    /// Returns `None` when the box lies entirely outside the frame.
    pub fn crop(&self, bbox: &BoundingBox) -> Option<Frame> {
        let clipped = bbox.clamp_to(self.width, self.height)?;
        let (x0, y0) = (clipped.left as usize, clipped.top as usize);
        let (w, h) = (clipped.width as usize, clipped.height as usize);
        let stride = self.width as usize * CHANNELS;

        let mut data = Vec::with_capacity(w * h * CHANNELS);
        for row in y0..y0 + h {
            let start = row * stride + x0 * CHANNELS;
            data.extend_from_slice(&self.data[start..start + w * CHANNELS]);
        }
        Some(Frame::new(data, w as u32, h as u32, self.index))
    }
}
