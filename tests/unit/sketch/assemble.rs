use super::*;
use crate::sketch::template::{DEFINITIONS_PLACEHOLDER, LOOP_PLACEHOLDER};

const TEMPLATE: &str = "// head\n// __FRAME_DEFINITIONS__\nvoid loop() {\n// __FRAME_LOOP__\n}\n";

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_assemble").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("headers")).unwrap();
    std::fs::write(dir.join("animation.ino"), TEMPLATE).unwrap();
    dir
}

fn opts(dir: &Path) -> AssembleOpts {
    AssembleOpts {
        template: dir.join("animation.ino"),
        header_dir: dir.join("headers"),
        output: dir.join("out").join("sketch.ino"),
        ..AssembleOpts::default()
    }
}

fn header(dir: &Path, name: &str, payload: &str) {
    let text = format!(
        "// Generated from: x.png\nconst unsigned char x_map[] = {{\n    {payload}\n}};\n// Array size: 2 bytes\n"
    );
    std::fs::write(dir.join("headers").join(name), text).unwrap();
}

#[test]
fn gaps_in_frame_numbers_get_dense_names() {
    let dir = scratch("gaps");
    header(&dir, "frame_005.h", "0x55, 0x55");
    header(&dir, "frame_000.h", "0x00, 0x00");
    header(&dir, "frame_002.h", "0x22, 0x22");

    let report = assemble(&opts(&dir)).unwrap();
    let names: Vec<(&str, u32)> = report
        .frames
        .iter()
        .map(|f| (f.name.as_str(), f.index))
        .collect();
    assert_eq!(names, vec![("Frame1", 0), ("Frame2", 2), ("Frame3", 5)]);

    let out = std::fs::read_to_string(&report.output).unwrap();
    assert!(!out.contains(DEFINITIONS_PLACEHOLDER));
    assert!(!out.contains(LOOP_PLACEHOLDER));
    assert!(!out.contains("Frame4"));
    assert!(!out.contains(";;"));

    let d1 = out
        .find("const unsigned char Frame1[] PROGMEM = {\n    0x00, 0x00\n};\n// Data from frame_000.h\n")
        .unwrap();
    let d2 = out
        .find("const unsigned char Frame2[] PROGMEM = {\n    0x22, 0x22\n};\n// Data from frame_002.h\n")
        .unwrap();
    let d3 = out
        .find("const unsigned char Frame3[] PROGMEM = {\n    0x55, 0x55\n};\n// Data from frame_005.h\n")
        .unwrap();
    assert!(d1 < d2 && d2 < d3);

    let l1 = out.find("drawBitmap(0, 0, Frame1,").unwrap();
    let l2 = out.find("drawBitmap(0, 0, Frame2,").unwrap();
    let l3 = out.find("drawBitmap(0, 0, Frame3,").unwrap();
    assert!(d3 < l1 && l1 < l2 && l2 < l3);
    assert_eq!(out.matches("delay(frame_delay);").count(), 3);
}

#[test]
fn output_is_template_with_joined_sections() {
    let dir = scratch("exact");
    header(&dir, "frame_000.h", "0x01");
    header(&dir, "frame_001.h", "0x02");

    let report = assemble(&opts(&dir)).unwrap();
    let out = std::fs::read_to_string(report.output).unwrap();

    let expected = format!(
        "// head\n{}\n\n{}\nvoid loop() {{\n{}\n{}\n}}\n",
        frame_declaration("Frame1", "0x01", "frame_000.h"),
        frame_declaration("Frame2", "0x02", "frame_001.h"),
        loop_snippet("Frame1"),
        loop_snippet("Frame2"),
    );
    assert_eq!(out, expected);
}

#[test]
fn malformed_header_is_skipped_and_names_stay_dense() {
    let dir = scratch("malformed");
    header(&dir, "frame_000.h", "0x01");
    std::fs::write(dir.join("headers").join("frame_001.h"), "// nothing useful\n").unwrap();
    header(&dir, "frame_002.h", "0x03");

    let report = assemble(&opts(&dir)).unwrap();
    assert_eq!(report.skipped, vec![dir.join("headers").join("frame_001.h")]);
    assert_eq!(report.frames.len(), 2);
    assert_eq!(report.frames[1].name, "Frame2");
    assert_eq!(report.frames[1].index, 2);
}

#[test]
fn unexpected_names_are_ignored() {
    let dir = scratch("names");
    header(&dir, "frame_000.h", "0x01");
    header(&dir, "frame_01.h", "0x02");
    header(&dir, "logo.h", "0x03");
    std::fs::write(dir.join("headers").join("frame_003.png"), b"x").unwrap();

    let report = assemble(&opts(&dir)).unwrap();
    assert_eq!(report.frames.len(), 1);
    assert!(report.skipped.is_empty());
}

#[test]
fn duplicate_numbers_resolve_by_filename_order() {
    let dir = scratch("duplicates");
    header(&dir, "frame_001.h", "0xAA");
    header(&dir, "FRAME_001.H", "0xBB");

    let found = discover_headers(&opts(&dir)).unwrap();
    assert_eq!(found.len(), 1);
    let kept = found.get(&1).unwrap();
    // On case-insensitive filesystems only one of the two files exists.
    let mut names: Vec<String> = std::fs::read_dir(dir.join("headers"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(kept.file_name().unwrap().to_string_lossy(), names[0]);
}

#[test]
fn missing_loop_placeholder_aborts_without_output() {
    let dir = scratch("no_loop");
    std::fs::write(dir.join("animation.ino"), "A\n// __FRAME_DEFINITIONS__\nB\n").unwrap();
    header(&dir, "frame_000.h", "0x01");

    let o = opts(&dir);
    let err = assemble(&o).unwrap_err();
    assert!(matches!(err, GifSketchError::MissingPlaceholder(_)));
    assert!(!o.output.exists());
}

#[test]
fn missing_template_aborts() {
    let dir = scratch("no_template");
    std::fs::remove_file(dir.join("animation.ino")).unwrap();
    header(&dir, "frame_000.h", "0x01");

    let o = opts(&dir);
    assert!(matches!(assemble(&o), Err(GifSketchError::Io(_))));
    assert!(!o.output.exists());
}

#[test]
fn missing_header_dir_aborts() {
    let dir = scratch("no_headers_dir");
    std::fs::remove_dir_all(dir.join("headers")).unwrap();

    let o = opts(&dir);
    assert!(matches!(assemble(&o), Err(GifSketchError::Io(_))));
    assert!(!o.output.exists());
}

#[test]
fn no_matching_headers_aborts() {
    let dir = scratch("empty");
    header(&dir, "other.h", "0x01");

    let o = opts(&dir);
    let err = assemble(&o).unwrap_err();
    assert!(matches!(err, GifSketchError::Validation(_)));
    assert!(err.to_string().contains("frame_000.h"));
    assert!(!o.output.exists());
}

#[test]
fn all_headers_malformed_still_writes_output() {
    let dir = scratch("all_bad");
    std::fs::write(dir.join("headers").join("frame_000.h"), "int x;\n").unwrap();

    let report = assemble(&opts(&dir)).unwrap();
    assert!(report.frames.is_empty());
    let out = std::fs::read_to_string(report.output).unwrap();
    assert_eq!(out, "// head\n\nvoid loop() {\n\n}\n");
}

#[test]
fn custom_pad_width_and_prefix() {
    let dir = scratch("custom");
    header(&dir, "img_0010.h", "0x10");
    header(&dir, "img_0003.h", "0x03");
    header(&dir, "frame_000.h", "0x00");

    let o = AssembleOpts {
        pad_width: 4,
        header_prefix: "img_".to_string(),
        ..opts(&dir)
    };
    let report = assemble(&o).unwrap();
    let indices: Vec<u32> = report.frames.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![3, 10]);
}
