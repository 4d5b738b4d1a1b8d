use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{
    foundation::error::{GifSketchError, GifSketchResult},
    frames::disposal::Disposal,
};

/// Logical screen width of the demo animation.
pub const SAMPLE_WIDTH: u16 = 60;
/// Logical screen height of the demo animation.
pub const SAMPLE_HEIGHT: u16 = 40;

const RED: u8 = 0;
const BLUE: u8 = 1;
const GREEN: u8 = 2;
const TRANSPARENT: u8 = 3;
const PALETTE: [u8; 12] = [255, 0, 0, 0, 0, 255, 0, 128, 0, 0, 0, 0];

/// Frame delay in hundredths of a second.
const DELAY: u16 = 20;

/// Write a small three-frame GIF that relies on partial frames and transparency:
/// a red field, a blue box drawn over it, then a green disc whose corners are transparent.
/// The last frame asks for a background restore so the loop starts from a clean screen.
pub fn write_sample_gif<W: Write>(w: W) -> GifSketchResult<W> {
    let mut encoder = gif::Encoder::new(w, SAMPLE_WIDTH, SAMPLE_HEIGHT, &PALETTE)
        .map_err(|e| GifSketchError::io(format!("start sample gif: {e}")))?;
    encoder
        .set_repeat(gif::Repeat::Infinite)
        .map_err(|e| GifSketchError::io(format!("write loop extension: {e}")))?;

    let field = vec![RED; usize::from(SAMPLE_WIDTH) * usize::from(SAMPLE_HEIGHT)];
    let frames = [
        indexed_frame(0, 0, SAMPLE_WIDTH, SAMPLE_HEIGHT, field, Disposal::Keep),
        indexed_frame(15, 10, 30, 20, vec![BLUE; 30 * 20], Disposal::Keep),
        indexed_frame(35, 15, 20, 20, disc(20, GREEN), Disposal::Background),
    ];
    for frame in &frames {
        encoder
            .write_frame(frame)
            .map_err(|e| GifSketchError::io(format!("write sample frame: {e}")))?;
    }

    encoder
        .into_inner()
        .map_err(|e| GifSketchError::io(format!("finish sample gif: {e}")))
}

/// Write the demo animation to `path`, creating its parent directory.
pub fn write_sample_gif_file(path: &Path) -> GifSketchResult<()> {
    if let Some(parent) = path.parent() {
        crate::frames::extract::ensure_dir(parent)?;
    }
    let f = File::create(path)
        .map_err(|e| GifSketchError::io(format!("create '{}': {e}", path.display())))?;
    let mut w = write_sample_gif(BufWriter::new(f))?;
    w.flush()
        .map_err(|e| GifSketchError::io(format!("flush '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote sample animation");
    Ok(())
}

fn indexed_frame(
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    indices: Vec<u8>,
    disposal: Disposal,
) -> gif::Frame<'static> {
    gif::Frame {
        left,
        top,
        width,
        height,
        delay: DELAY,
        dispose: disposal.into(),
        transparent: Some(TRANSPARENT),
        buffer: Cow::Owned(indices),
        ..gif::Frame::default()
    }
}

/// Filled circle inscribed in a `size`×`size` square, transparent outside.
fn disc(size: u16, color: u8) -> Vec<u8> {
    let n = i32::from(size);
    let mut out = Vec::with_capacity(usize::from(size) * usize::from(size));
    for y in 0..n {
        for x in 0..n {
            // Doubled coordinates keep the centre on a pixel corner for even sizes.
            let dx = 2 * x + 1 - n;
            let dy = 2 * y + 1 - n;
            out.push(if dx * dx + dy * dy <= n * n {
                color
            } else {
                TRANSPARENT
            });
        }
    }
    out
}
