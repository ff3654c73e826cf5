//! Frame → network input tensor conversion.
//!
//! Mirrors the usual `blobFromImage` contract: resize to the network's
//! fixed input size, subtract a per-channel mean, multiply by a scale
//! factor and lay the result out as NCHW `f32`.

use image::imageops::FilterType;
use ndarray::Array4;

use crate::shared::frame::Frame;

/// Channel order of the produced tensor. Frames are always RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlobParams {
    pub width: u32,
    pub height: u32,
    /// Applied after mean subtraction.
    pub scale: f32,
    /// Per-channel mean, given in the tensor's channel order.
    pub mean: [f32; 3],
    pub channel_order: ChannelOrder,
}

/// Builds a `[1, 3, height, width]` tensor from `frame`.
pub fn blob_from_frame(frame: &Frame, params: &BlobParams) -> Array4<f32> {
    let (w, h) = (params.width as usize, params.height as usize);
    let mut tensor = Array4::<f32>::zeros((1, 3, h, w));
    if frame.is_empty() || w == 0 || h == 0 {
        return tensor;
    }

    let resized = match frame.to_rgb_image() {
        Some(img) if img.dimensions() == (params.width, params.height) => img,
        Some(img) => {
            image::imageops::resize(&img, params.width, params.height, FilterType::Triangle)
        }
        None => return tensor,
    };

    let source_channel = match params.channel_order {
        ChannelOrder::Rgb => [0usize, 1, 2],
        ChannelOrder::Bgr => [2usize, 1, 0],
    };

    for (x, y, pixel) in resized.enumerate_pixels() {
        for (c, &src) in source_channel.iter().enumerate() {
            let value = pixel.0[src] as f32;
            tensor[[0, c, y as usize, x as usize]] = (value - params.mean[c]) * params.scale;
        }
    }
    tensor
}
