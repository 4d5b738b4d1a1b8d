use std::path::Path;

use crate::{
    foundation::error::{GifSketchError, GifSketchResult},
    frames::extract::ensure_dir,
};

/// Starting sketch for a 128x64 SSD1306 on I2C using the Adafruit libraries.
pub const DEFAULT_TEMPLATE: &str = r#"#include <Wire.h>
#include <Adafruit_GFX.h>
#include <Adafruit_SSD1306.h>

#define SCREEN_WIDTH 128
#define SCREEN_HEIGHT 64
#define OLED_RESET -1
#define SCREEN_ADDRESS 0x3C

Adafruit_SSD1306 display(SCREEN_WIDTH, SCREEN_HEIGHT, &Wire, OLED_RESET);

const int frame_delay = 100;

// __FRAME_DEFINITIONS__

void setup() {
  if (!display.begin(SSD1306_SWITCHCAPVCC, SCREEN_ADDRESS)) {
    while (true) {}
  }
  display.clearDisplay();
  display.display();
}

void loop() {
// __FRAME_LOOP__
}
"#;

/// Write [`DEFAULT_TEMPLATE`] to `path`. An existing file is left alone unless `overwrite`.
pub fn write_default_template(path: &Path, overwrite: bool) -> GifSketchResult<()> {
    if path.exists() && !overwrite {
        return Err(GifSketchError::validation(format!(
            "'{}' already exists (pass --force to replace it)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(path, DEFAULT_TEMPLATE)
        .map_err(|e| GifSketchError::io(format!("write '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote sketch template");
    Ok(())
}
