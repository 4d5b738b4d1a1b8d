use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{
    foundation::config::validate_pad_width,
    foundation::error::{GifSketchError, GifSketchResult},
    frames::extract::{FRAME_FILE_PREFIX, ensure_dir},
    sketch::header::{extract_payload, frame_declaration, loop_snippet, parse_frame_index, read_text},
    sketch::template::Template,
};

/// Sketch Assembler options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssembleOpts {
    /// Sketch containing both placeholder lines.
    pub template: PathBuf,
    /// Directory holding the generated `frame_NNN.h` files.
    pub header_dir: PathBuf,
    /// Assembled sketch path; parent directories are created.
    pub output: PathBuf,
    /// Exact number of digits in a header's frame number.
    pub pad_width: usize,
    /// Literal filename prefix of header files.
    pub header_prefix: String,
    /// Header file extension, without the dot.
    pub header_ext: String,
}

impl Default for AssembleOpts {
    fn default() -> Self {
        Self {
            template: PathBuf::from("Template/animation.ino"),
            header_dir: PathBuf::from("output_headers"),
            output: PathBuf::from("animation_updated/animation_updated.ino"),
            pad_width: 3,
            header_prefix: FRAME_FILE_PREFIX.to_string(),
            header_ext: "h".to_string(),
        }
    }
}

impl AssembleOpts {
    /// Check the padding width and header extension.
    pub fn validate(&self) -> GifSketchResult<()> {
        validate_pad_width(self.pad_width)?;
        if self.header_ext.is_empty() {
            return Err(GifSketchError::validation("header extension must not be empty"));
        }
        Ok(())
    }

    fn example_header_name(&self) -> String {
        format!(
            "{}{:0width$}.{}",
            self.header_prefix,
            0,
            self.header_ext,
            width = self.pad_width
        )
    }
}

/// One frame that made it into the sketch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledFrame {
    /// Dense display name, `Frame1`, `Frame2`, ...
    pub name: String,
    /// Frame number parsed from the header filename.
    pub index: u32,
    /// Header the array was taken from.
    pub source: PathBuf,
}

/// Outcome of an assembly run.
#[derive(Clone, Debug, Default)]
pub struct AssembleReport {
    /// Path of the written sketch.
    pub output: PathBuf,
    /// Frames in the order they appear in the sketch.
    pub frames: Vec<AssembledFrame>,
    /// Matching headers that could not be read or had no array initializer.
    pub skipped: Vec<PathBuf>,
}

/// Map frame numbers to header files in `opts.header_dir`.
///
/// Candidates are visited in filename order; if two names carry the same number (they can
/// only differ in case) the first one wins and the other is skipped with a warning.
pub fn discover_headers(opts: &AssembleOpts) -> GifSketchResult<BTreeMap<u32, PathBuf>> {
    let dir = &opts.header_dir;
    let mut names: Vec<(String, PathBuf)> = std::fs::read_dir(dir)
        .map_err(|e| GifSketchError::io(format!("list '{}': {e}", dir.display())))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    names.sort();

    let mut found: BTreeMap<u32, PathBuf> = BTreeMap::new();
    for (name, path) in names {
        let Some(index) =
            parse_frame_index(&name, &opts.header_prefix, opts.pad_width, &opts.header_ext)
        else {
            tracing::info!(file = %name, "skipping file with unexpected name format");
            continue;
        };
        if let Some(kept) = found.get(&index) {
            tracing::warn!(
                file = %name,
                kept = %kept.display(),
                index,
                "duplicate frame number; keeping the first file"
            );
            continue;
        }
        found.insert(index, path);
    }
    Ok(found)
}

/// Build the sketch from `opts.template` and the headers in `opts.header_dir`.
///
/// Aborts before writing anything if the template or header directory is missing, a
/// placeholder is absent, or no header filename matches. Individual headers that cannot be
/// read or contain no array initializer are skipped; names stay dense over the frames that
/// were kept.
#[tracing::instrument(skip_all, fields(template = %opts.template.display()))]
pub fn assemble(opts: &AssembleOpts) -> GifSketchResult<AssembleReport> {
    opts.validate()?;
    if !opts.template.is_file() {
        return Err(GifSketchError::io(format!(
            "template file '{}' not found",
            opts.template.display()
        )));
    }
    if !opts.header_dir.is_dir() {
        return Err(GifSketchError::io(format!(
            "header folder '{}' not found",
            opts.header_dir.display()
        )));
    }
    let template = Template::from_path(&opts.template)?;

    let headers = discover_headers(opts)?;
    if headers.is_empty() {
        return Err(GifSketchError::validation(format!(
            "no valid header files (e.g. {}) found in '{}'",
            opts.example_header_name(),
            opts.header_dir.display()
        )));
    }
    tracing::info!(count = headers.len(), "found frame headers");

    let mut report = AssembleReport {
        output: opts.output.clone(),
        ..AssembleReport::default()
    };
    let mut definitions = Vec::with_capacity(headers.len());
    let mut loops = Vec::with_capacity(headers.len());

    for (index, path) in headers {
        let file_name = display_name(&path);
        let name = format!("Frame{}", report.frames.len() + 1);

        let content = match read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "skipping unreadable header");
                report.skipped.push(path);
                continue;
            }
        };
        let Some(payload) = extract_payload(&content) else {
            let e = GifSketchError::pattern_mismatch(format!(
                "no `= {{ ... }};` initializer in '{file_name}'"
            ));
            tracing::warn!(file = %file_name, error = %e, "skipping header");
            report.skipped.push(path);
            continue;
        };

        definitions.push(frame_declaration(&name, &payload, &file_name));
        loops.push(loop_snippet(&name));
        tracing::info!(file = %file_name, frame = %name, "processed header");
        report.frames.push(AssembledFrame {
            name,
            index,
            source: path,
        });
    }

    if report.frames.is_empty() {
        tracing::warn!("no header could be processed; writing the template with empty frame sections");
    }

    let sketch = template.render(&definitions.join("\n\n"), &loops.join("\n"));
    if let Some(parent) = opts.output.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(&opts.output, sketch).map_err(|e| {
        GifSketchError::io(format!("write sketch '{}': {e}", opts.output.display()))
    })?;

    tracing::info!(
        output = %opts.output.display(),
        frames = report.frames.len(),
        skipped = report.skipped.len(),
        "wrote generated sketch"
    );
    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/assemble.rs"]
mod tests;
