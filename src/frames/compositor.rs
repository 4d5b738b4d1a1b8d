use image::{RgbaImage, imageops};

use crate::frames::disposal::Disposal;

/// One decoded frame before compositing: a sub-rectangle of the logical screen plus the
/// disposal it asks for once shown.
#[derive(Clone, Debug)]
pub struct RawFrame {
    /// Offset of the sub-rectangle from the left edge of the canvas.
    pub left: u32,
    /// Offset of the sub-rectangle from the top edge of the canvas.
    pub top: u32,
    /// Straight-alpha RGBA pixels; alpha 0 marks transparent pixels.
    pub pixels: RgbaImage,
    /// Disposal applied to the canvas before the *next* frame is drawn.
    pub disposal: Disposal,
}

impl RawFrame {
    /// A frame that covers the canvas from the origin.
    pub fn full(pixels: RgbaImage, disposal: Disposal) -> Self {
        Self {
            left: 0,
            top: 0,
            pixels,
            disposal,
        }
    }
}

/// Running canvas that reconstructs each frame as it appears on screen.
///
/// Before a frame is drawn, the disposal recorded for the previous frame is applied:
/// `Background` clears the canvas to transparent, `Previous` restores the snapshot taken
/// just before the previous frame was drawn, `None`/`Keep` leave it alone. The frame is then
/// overlaid using its own alpha channel as the mask.
#[derive(Clone, Debug)]
pub struct Compositor {
    canvas: RgbaImage,
    last_disposal: Option<Disposal>,
    snapshot: Option<RgbaImage>,
}

impl Compositor {
    /// Start from an empty, fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            last_disposal: None,
            snapshot: None,
        }
    }

    /// Composite `frame` and return the resulting screen state.
    pub fn push(&mut self, frame: &RawFrame) -> &RgbaImage {
        match self.last_disposal {
            Some(Disposal::Background) => {
                self.canvas = RgbaImage::new(self.canvas.width(), self.canvas.height());
            }
            Some(Disposal::Previous) => {
                if let Some(saved) = self.snapshot.take() {
                    self.canvas = saved;
                }
            }
            Some(Disposal::None | Disposal::Keep) | None => {}
        }

        if frame.disposal == Disposal::Previous {
            self.snapshot = Some(self.canvas.clone());
        }

        imageops::overlay(
            &mut self.canvas,
            &frame.pixels,
            i64::from(frame.left),
            i64::from(frame.top),
        );
        self.last_disposal = Some(frame.disposal);
        &self.canvas
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/compositor.rs"]
mod tests;
