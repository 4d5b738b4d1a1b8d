use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageReader, imageops, imageops::FilterType};

use crate::{
    bitmap::pack::PackedBitmap,
    foundation::error::{GifSketchError, GifSketchResult},
    frames::extract::ensure_dir,
};

/// Extensions (lowercase) picked up by [`encode_dir`].
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["gif", "png", "jpg", "jpeg", "bmp"];

/// Appended to the sanitized file stem to name the emitted array.
pub const ARRAY_SUFFIX: &str = "_map";

const BYTES_PER_LINE: usize = 16;

/// Bitmap Encoder options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeOpts {
    /// Directory scanned for images.
    pub in_dir: PathBuf,
    /// Directory receiving the `.h` files; created if absent.
    pub out_dir: PathBuf,
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Emit 0 for lit pixels instead of 1.
    pub invert: bool,
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            in_dir: PathBuf::from("input_images"),
            out_dir: PathBuf::from("output_headers"),
            width: 128,
            height: 64,
            invert: false,
        }
    }
}

impl EncodeOpts {
    /// Reject a zero target size.
    pub fn validate(&self) -> GifSketchResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GifSketchError::validation(format!(
                "target width and height must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Outcome of a batch conversion.
#[derive(Clone, Debug, Default)]
pub struct EncodeReport {
    /// Header files written.
    pub written: Vec<PathBuf>,
    /// Images that could not be read or written.
    pub failed: Vec<PathBuf>,
    /// Entries without a supported image extension.
    pub ignored: Vec<PathBuf>,
}

/// Resize to exactly `width`×`height` (Lanczos3) and reduce to pure black/white with
/// Floyd–Steinberg error diffusion.
pub fn to_monochrome(img: &DynamicImage, width: u32, height: u32) -> GrayImage {
    let mut luma = img
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_luma8();
    imageops::dither(&mut luma, &imageops::BiLevel);
    luma
}

/// Replace every character that is not an ASCII letter or digit with `_`.
pub fn sanitize_identifier(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Render the `.h` text for one bitmap.
pub fn render_header(
    source_name: &str,
    array_name: &str,
    bitmap: &PackedBitmap,
    invert: bool,
) -> String {
    let bytes = bitmap.bytes();
    let mut out = String::with_capacity(bytes.len() * 6 + 256);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "// Generated from: {source_name}");
    let _ = writeln!(
        out,
        "// Format: 1-bit Monochrome, Size: {}x{}",
        bitmap.width(),
        bitmap.height()
    );
    if invert {
        out.push_str("// Inverted: Yes (white pixels become 0, black become 1)\n");
    } else {
        out.push_str("// Inverted: No (white pixels become 1, black become 0)\n");
    }
    let _ = writeln!(out, "const unsigned char {array_name}[] = {{");

    let lines = bytes.chunks(BYTES_PER_LINE).count();
    for (i, line) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let hex: Vec<String> = line.iter().map(|b| format!("0x{b:02X}")).collect();
        let sep = if i + 1 < lines { "," } else { "" };
        let _ = writeln!(out, "    {}{sep}", hex.join(", "));
    }

    out.push_str("};\n");
    let _ = writeln!(out, "// Array size: {} bytes", bytes.len());
    out
}

/// Case-insensitive match against [`SUPPORTED_EXTENSIONS`].
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(e))
        })
}

/// Convert one image into `<out_dir>/<sanitized stem>.h` and return the written path.
pub fn encode_image(path: &Path, opts: &EncodeOpts) -> GifSketchResult<PathBuf> {
    let img = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| GifSketchError::io(format!("open '{}': {e}", path.display())))?
        .decode()
        .map_err(|e| GifSketchError::decode(format!("decode '{}': {e}", path.display())))?;

    let mono = to_monochrome(&img, opts.width, opts.height);
    let bitmap = PackedBitmap::pack(&mono, opts.invert);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let base = sanitize_identifier(&stem);
    let source_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = render_header(
        &source_name,
        &format!("{base}{ARRAY_SUFFIX}"),
        &bitmap,
        opts.invert,
    );

    let out_path = opts.out_dir.join(format!("{base}.h"));
    std::fs::write(&out_path, text)
        .map_err(|e| GifSketchError::io(format!("write '{}': {e}", out_path.display())))?;
    Ok(out_path)
}

/// Convert every supported image in `opts.in_dir`, in filename order.
///
/// A missing input directory aborts; a file that fails to convert is logged and skipped.
#[tracing::instrument(skip_all, fields(in_dir = %opts.in_dir.display()))]
pub fn encode_dir(opts: &EncodeOpts) -> GifSketchResult<EncodeReport> {
    opts.validate()?;
    if !opts.in_dir.is_dir() {
        return Err(GifSketchError::io(format!(
            "input folder '{}' does not exist",
            opts.in_dir.display()
        )));
    }
    ensure_dir(&opts.out_dir)?;

    tracing::info!(
        out_dir = %opts.out_dir.display(),
        width = opts.width,
        height = opts.height,
        invert = opts.invert,
        "starting batch conversion"
    );

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&opts.in_dir)
        .map_err(|e| GifSketchError::io(format!("list '{}': {e}", opts.in_dir.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut report = EncodeReport::default();
    for path in entries {
        if !path.is_file() || !has_supported_extension(&path) {
            tracing::info!(path = %path.display(), "skipping non-image file");
            report.ignored.push(path);
            continue;
        }

        match encode_image(&path, opts) {
            Ok(out) => {
                tracing::info!(from = %path.display(), to = %out.display(), "converted");
                report.written.push(out);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping image");
                report.failed.push(path);
            }
        }
    }

    if report.written.is_empty() && report.failed.is_empty() {
        tracing::warn!("no supported image files found in the input folder");
    } else {
        tracing::info!(
            converted = report.written.len(),
            failed = report.failed.len(),
            "batch conversion complete"
        );
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/bitmap/encode.rs"]
mod tests;
