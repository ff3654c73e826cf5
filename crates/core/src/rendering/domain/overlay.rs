//! Backend-neutral description of what gets drawn on a frame.

use crate::shared::bbox::BoundingBox;
use crate::shared::config::RenderStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayItem {
    /// Outlined box with a filled label tab above its top-left corner.
    LabeledBox {
        bbox: BoundingBox,
        label: String,
        color: Color,
    },
    /// Free-standing text whose baseline starts at `origin`.
    Caption {
        text: String,
        origin: (i32, i32),
        scale: f64,
        color: Color,
    },
}

/// `"<name> (<percent>%)"`.
pub fn confidence_label(name: &str, percent: u32) -> String {
    format!("{name} ({percent}%)")
}

pub fn fps_caption(fps: u32, style: &RenderStyle) -> OverlayItem {
    OverlayItem::Caption {
        text: format!("FPS: {fps}"),
        origin: style.fps_origin,
        scale: style.fps_scale,
        color: Color::WHITE,
    }
}

/// Where a box's label background and text go, given the rendered text size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelPlacement {
    pub background_top_left: (i32, i32),
    pub background_bottom_right: (i32, i32),
    pub text_origin: (i32, i32),
}

pub fn label_placement(bbox: &BoundingBox, text_width: i32, text_height: i32) -> LabelPlacement {
    LabelPlacement {
        background_top_left: (bbox.left, bbox.top - text_height - 10),
        background_bottom_right: (bbox.left + text_width, bbox.top),
        text_origin: (bbox.left, bbox.top - 5),
    }
}
