use std::path::Path;

use crate::foundation::error::{GifSketchError, GifSketchResult};

/// Storage annotation that keeps frame data in flash on AVR targets.
pub const STORAGE_ANNOTATION: &str = "PROGMEM";

/// Frame number encoded in `file_name`, if it is exactly `<prefix><digits><.ext>` with
/// `digits` decimal digits. Matching ignores ASCII case.
pub fn parse_frame_index(file_name: &str, prefix: &str, digits: usize, ext: &str) -> Option<u32> {
    let lower = file_name.to_ascii_lowercase();
    let rest = lower.strip_prefix(&prefix.to_ascii_lowercase())?;
    let number = rest
        .strip_suffix(&ext.to_ascii_lowercase())?
        .strip_suffix('.')?;
    if number.len() != digits || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

/// Read a text file as UTF-8, falling back to Latin-1 so stray high bytes never make a file
/// unreadable.
pub fn read_text(path: &Path) -> GifSketchResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| GifSketchError::io(format!("read '{}': {e}", path.display())))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), "not valid UTF-8, reading as Latin-1");
            Ok(e.into_bytes().into_iter().map(char::from).collect())
        }
    }
}

/// Contents of the first `= { ... };` initializer, trimmed. Tabs and non-breaking spaces are
/// treated as plain spaces. Returns `None` when there is no initializer or it is empty.
pub fn extract_payload(content: &str) -> Option<String> {
    let cleaned = content.replace(['\u{a0}', '\t'], " ");

    let mut search = cleaned.as_str();
    while let Some(eq) = search.find('=') {
        let after = &search[eq + 1..];
        let Some(body) = after.trim_start().strip_prefix('{') else {
            search = after;
            continue;
        };
        let end = body.find("};")?;
        let payload = body[..end].trim();
        return (!payload.is_empty()).then(|| payload.to_string());
    }
    None
}

/// Merge runs of `;` separated only by whitespace into a single `;`.
pub fn collapse_terminators(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(pos) = rest.find(';') {
        out.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];
        while let Some(after) = rest.trim_start().strip_prefix(';') {
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

/// `const unsigned char <name>[] PROGMEM = { ... };` followed by a comment naming the source.
pub fn frame_declaration(name: &str, payload: &str, source_file: &str) -> String {
    let decl = format!("const unsigned char {name}[] {STORAGE_ANNOTATION} = {{\n    {payload}\n}};");
    format!("{}\n// Data from {source_file}\n", collapse_terminators(&decl))
}

/// Four statements that show one frame and wait.
pub fn loop_snippet(name: &str) -> String {
    format!(
        "  display.clearDisplay();\n\
         \x20 display.drawBitmap(0, 0, {name}, SCREEN_WIDTH, SCREEN_HEIGHT, 1);\n\
         \x20 display.display();\n\
         \x20 delay(frame_delay);\n"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/header.rs"]
mod tests;
