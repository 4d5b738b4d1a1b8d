use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    bitmap::encode::EncodeOpts,
    foundation::error::{GifSketchError, GifSketchResult},
    frames::extract::ExtractOpts,
    sketch::assemble::AssembleOpts,
};

/// Widest zero-padding accepted for frame numbers.
pub const MAX_PAD_WIDTH: usize = 9;

/// Options for all three pipeline stages.
///
/// Every field has a default, so a JSON document only needs to name what it changes:
///
/// ```json
/// { "encode": { "width": 128, "height": 32, "invert": true } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Frame Extractor options.
    pub extract: ExtractOpts,
    /// Bitmap Encoder options.
    pub encode: EncodeOpts,
    /// Sketch Assembler options.
    pub assemble: AssembleOpts,
}

impl Config {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GifSketchResult<Self> {
        let cfg: Config = serde_json::from_reader(r)
            .map_err(|e| GifSketchError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GifSketchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GifSketchError::io(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every stage's options.
    pub fn validate(&self) -> GifSketchResult<()> {
        self.extract.validate()?;
        self.encode.validate()?;
        self.assemble.validate()
    }
}

pub(crate) fn validate_pad_width(pad_width: usize) -> GifSketchResult<()> {
    if pad_width == 0 || pad_width > MAX_PAD_WIDTH {
        return Err(GifSketchError::validation(format!(
            "pad width must be in 1..={MAX_PAD_WIDTH}, got {pad_width}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
