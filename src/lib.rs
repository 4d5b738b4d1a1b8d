//! gifsketch turns an animated GIF into a ready-to-compile microcontroller sketch for a small
//! monochrome display.
//!
//! # Pipeline overview
//!
//! 1. **Split**: `GIF -> frame_NNN.png` composites every frame against the running canvas,
//!    honouring the GIF disposal methods ([`extract_frames`]).
//! 2. **Encode**: `frame_NNN.png -> frame_NNN.h` resizes, dithers to 1-bit and packs 8
//!    horizontal pixels per byte, MSB first ([`encode_dir`]).
//! 3. **Assemble**: `template + frame_NNN.h -> sketch` re-wraps each array as
//!    `const unsigned char FrameN[] PROGMEM` and splices the declarations and a display loop
//!    into the template's placeholder lines ([`assemble`]).
//!
//! Each stage reads only what the previous one wrote and can be re-run on its own.
//! Options for all stages live in [`Config`], which can be loaded from JSON.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bitmap;
mod foundation;
mod frames;
mod sketch;

pub use bitmap::encode::{
    ARRAY_SUFFIX, EncodeOpts, EncodeReport, SUPPORTED_EXTENSIONS, encode_dir, encode_image,
    has_supported_extension, render_header, sanitize_identifier, to_monochrome,
};
pub use bitmap::pack::PackedBitmap;
pub use foundation::config::{Config, MAX_PAD_WIDTH};
pub use foundation::error::{GifSketchError, GifSketchResult};
pub use frames::compositor::{Compositor, RawFrame};
pub use frames::disposal::Disposal;
pub use frames::extract::{
    Animation, ExtractOpts, ExtractReport, FRAME_FILE_PREFIX, FrameFormat, FrameStream,
    decode_gif, extract_frames, frame_file_name,
};
pub use frames::sample::{SAMPLE_HEIGHT, SAMPLE_WIDTH, write_sample_gif, write_sample_gif_file};
pub use sketch::assemble::{
    AssembleOpts, AssembleReport, AssembledFrame, assemble, discover_headers,
};
pub use sketch::header::{
    STORAGE_ANNOTATION, collapse_terminators, extract_payload, frame_declaration, loop_snippet,
    parse_frame_index, read_text,
};
pub use sketch::scaffold::{DEFAULT_TEMPLATE, write_default_template};
pub use sketch::template::{DEFINITIONS_PLACEHOLDER, LOOP_PLACEHOLDER, Template};
