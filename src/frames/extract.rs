use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::{
    foundation::config::validate_pad_width,
    foundation::error::{GifSketchError, GifSketchResult},
    frames::compositor::{Compositor, RawFrame},
    frames::disposal::Disposal,
};

/// File prefix shared by extracted frames and the headers generated from them.
pub const FRAME_FILE_PREFIX: &str = "frame_";

/// Image format used for extracted frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFormat {
    /// Lossless, keeps the alpha channel.
    #[default]
    Png,
    /// Re-quantized to a 256 color palette.
    Gif,
    /// Uncompressed 32-bit.
    Bmp,
}

impl FrameFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Frame Extractor options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOpts {
    /// Animated image to split.
    pub input: PathBuf,
    /// Directory receiving `frame_NNN.<ext>` files; created if absent.
    pub out_dir: PathBuf,
    /// Zero-padding width of the frame number.
    pub pad_width: usize,
    /// Output image format.
    pub format: FrameFormat,
}

impl Default for ExtractOpts {
    fn default() -> Self {
        Self {
            input: PathBuf::from("animation.gif"),
            out_dir: PathBuf::from("input_images"),
            pad_width: 3,
            format: FrameFormat::Png,
        }
    }
}

impl ExtractOpts {
    /// Check the padding width.
    pub fn validate(&self) -> GifSketchResult<()> {
        validate_pad_width(self.pad_width)
    }
}

/// Outcome of one extraction run.
#[derive(Clone, Debug, Default)]
pub struct ExtractReport {
    /// Whether the source had more than one frame.
    pub animated: bool,
    /// Written frame files, in frame order.
    pub written: Vec<PathBuf>,
}

/// A fully decoded image source: logical screen size and its raw frames in display order.
#[derive(Clone, Debug)]
pub struct Animation {
    /// Logical screen width.
    pub width: u32,
    /// Logical screen height.
    pub height: u32,
    /// Raw frames, not yet composited.
    pub frames: Vec<RawFrame>,
}

impl Animation {
    /// Whether there is more than one frame.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

enum Source<R: Read> {
    Gif(Box<gif::Decoder<R>>),
    Still(Option<RawFrame>),
}

/// Raw frames of an image source, decoded one at a time.
pub struct FrameStream<R: Read> {
    width: u32,
    height: u32,
    read: usize,
    source: Source<R>,
}

impl<R: Read> FrameStream<R> {
    /// Read the GIF header; frames are decoded on demand by [`FrameStream::next_frame`].
    pub fn from_gif(r: R) -> GifSketchResult<Self> {
        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::RGBA);
        let decoder = opts
            .read_info(r)
            .map_err(|e| GifSketchError::decode(format!("read gif header: {e}")))?;

        Ok(Self {
            width: u32::from(decoder.width()),
            height: u32::from(decoder.height()),
            read: 0,
            source: Source::Gif(Box::new(decoder)),
        })
    }

    /// Logical screen size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Decode the next frame, or `None` once the source is exhausted.
    pub fn next_frame(&mut self) -> GifSketchResult<Option<RawFrame>> {
        let index = self.read;
        let frame = match &mut self.source {
            Source::Still(frame) => frame.take(),
            Source::Gif(decoder) => {
                let Some(frame) = decoder
                    .read_next_frame()
                    .map_err(|e| GifSketchError::decode(format!("read gif frame {index}: {e}")))?
                else {
                    return Ok(None);
                };
                let pixels = RgbaImage::from_raw(
                    u32::from(frame.width),
                    u32::from(frame.height),
                    frame.buffer.to_vec(),
                )
                .ok_or_else(|| {
                    GifSketchError::decode(format!(
                        "gif frame {index} buffer does not match its {}x{} size",
                        frame.width, frame.height
                    ))
                })?;
                Some(RawFrame {
                    left: u32::from(frame.left),
                    top: u32::from(frame.top),
                    pixels,
                    disposal: frame.dispose.into(),
                })
            }
        };
        if frame.is_some() {
            self.read += 1;
        }
        Ok(frame)
    }
}

impl FrameStream<BufReader<File>> {
    /// Open `path`. GIFs are streamed frame by frame; any other format the `image` crate
    /// understands is decoded up front as a single full-size frame.
    pub fn open(path: &Path) -> GifSketchResult<Self> {
        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| GifSketchError::io(format!("open '{}': {e}", path.display())))?;

        if reader.format() == Some(ImageFormat::Gif) {
            let f = File::open(path)
                .map_err(|e| GifSketchError::io(format!("open '{}': {e}", path.display())))?;
            return Self::from_gif(BufReader::new(f));
        }

        let still = reader
            .decode()
            .map_err(|e| GifSketchError::decode(format!("decode '{}': {e}", path.display())))?
            .into_rgba8();
        let (width, height) = still.dimensions();
        Ok(Self {
            width,
            height,
            read: 0,
            source: Source::Still(Some(RawFrame::full(still, Disposal::None))),
        })
    }
}

/// `frame_007.png` for `(7, 3, "png")`.
pub fn frame_file_name(index: usize, pad_width: usize, ext: &str) -> String {
    format!("{FRAME_FILE_PREFIX}{index:0pad_width$}.{ext}")
}

/// Decode every frame of a GIF stream without compositing.
pub fn decode_gif<R: Read>(r: R) -> GifSketchResult<Animation> {
    let mut stream = FrameStream::from_gif(r)?;
    let (width, height) = stream.dimensions();
    let mut frames = Vec::new();
    while let Some(frame) = stream.next_frame()? {
        frames.push(frame);
    }
    if frames.is_empty() {
        return Err(GifSketchError::decode("gif contains no frames"));
    }
    Ok(Animation {
        width,
        height,
        frames,
    })
}

/// Split `opts.input` into one composited image per frame under `opts.out_dir`.
///
/// Each frame is decoded, composited and saved before the next is read, so when a later
/// frame fails to decode or save the frames already written stay on disk.
#[tracing::instrument(skip_all, fields(input = %opts.input.display()))]
pub fn extract_frames(opts: &ExtractOpts) -> GifSketchResult<ExtractReport> {
    opts.validate()?;
    if !opts.input.is_file() {
        return Err(GifSketchError::io(format!(
            "source image '{}' not found",
            opts.input.display()
        )));
    }

    let mut stream = FrameStream::open(&opts.input)?;
    let (width, height) = stream.dimensions();
    ensure_dir(&opts.out_dir)?;
    tracing::info!(width, height, "opened source image");

    let mut compositor = Compositor::new(width, height);
    let mut report = ExtractReport::default();

    while let Some(frame) = stream.next_frame()? {
        let index = report.written.len();
        let canvas = compositor.push(&frame);
        let path = opts.out_dir.join(frame_file_name(
            index,
            opts.pad_width,
            opts.format.extension(),
        ));
        canvas
            .save_with_format(&path, opts.format.image_format())
            .map_err(|e| GifSketchError::io(format!("write frame '{}': {e}", path.display())))?;
        tracing::debug!(index, disposal = ?frame.disposal, path = %path.display(), "wrote frame");
        report.written.push(path);
    }

    match report.written.len() {
        0 => return Err(GifSketchError::decode("source contains no frames")),
        1 => tracing::warn!("source is not animated; wrote only its single frame"),
        _ => report.animated = true,
    }

    tracing::info!(
        frames = report.written.len(),
        out_dir = %opts.out_dir.display(),
        "frame extraction complete"
    );
    Ok(report)
}

pub(crate) fn ensure_dir(dir: &Path) -> GifSketchResult<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| GifSketchError::io(format!("create directory '{}': {e}", dir.display())))?;
    tracing::info!(dir = %dir.display(), "created output directory");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/frames/extract.rs"]
mod tests;
