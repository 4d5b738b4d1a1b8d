use std::path::Path;

use crate::{
    foundation::error::{GifSketchError, GifSketchResult},
    sketch::header::read_text,
};

/// Line replaced by the frame array declarations.
pub const DEFINITIONS_PLACEHOLDER: &str = "// __FRAME_DEFINITIONS__";
/// Line replaced by the per-frame display loop.
pub const LOOP_PLACEHOLDER: &str = "// __FRAME_LOOP__";

/// A sketch source known to contain both placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Accept `text` only if it carries both placeholder lines.
    pub fn parse(text: impl Into<String>) -> GifSketchResult<Self> {
        let text = text.into();
        for placeholder in [DEFINITIONS_PLACEHOLDER, LOOP_PLACEHOLDER] {
            if !text.contains(placeholder) {
                return Err(GifSketchError::missing_placeholder(placeholder));
            }
        }
        Ok(Self { text })
    }

    /// Read and parse a template file.
    pub fn from_path(path: &Path) -> GifSketchResult<Self> {
        if !path.is_file() {
            return Err(GifSketchError::io(format!(
                "template file '{}' not found",
                path.display()
            )));
        }
        Self::parse(read_text(path)?)
    }

    /// Substitute both placeholders.
    pub fn render(&self, definitions: &str, loop_body: &str) -> String {
        self.text
            .replace(DEFINITIONS_PLACEHOLDER, definitions)
            .replace(LOOP_PLACEHOLDER, loop_body)
    }
}
