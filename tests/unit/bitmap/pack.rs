use super::*;

/// Deterministic pseudo-random black/white pattern.
fn pattern(width: u32, height: u32, seed: u32) -> GrayImage {
    let mut state = seed;
    GrayImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        Luma([if (state >> 16) & 1 == 1 { 255 } else { 0 }])
    })
}

#[test]
fn msb_is_leftmost_pixel() {
    let mut img = GrayImage::new(8, 1);
    img.put_pixel(0, 0, Luma([255]));
    img.put_pixel(7, 0, Luma([255]));
    let packed = PackedBitmap::pack(&img, false);
    assert_eq!(packed.bytes(), &[0b1000_0001]);
}

#[test]
fn any_nonzero_value_counts_as_on() {
    let img = GrayImage::from_raw(8, 1, vec![0, 1, 0, 128, 0, 0, 0, 255]).unwrap();
    assert_eq!(PackedBitmap::pack(&img, false).bytes(), &[0b0101_0001]);
}

#[test]
fn invert_flips_every_pixel() {
    let img = GrayImage::from_raw(8, 2, [vec![0; 8], vec![255; 8]].concat()).unwrap();
    assert_eq!(PackedBitmap::pack(&img, false).bytes(), &[0x00, 0xFF]);
    assert_eq!(PackedBitmap::pack(&img, true).bytes(), &[0xFF, 0x00]);
}

#[test]
fn byte_count_is_width_times_height_over_eight() {
    let packed = PackedBitmap::pack(&GrayImage::new(128, 64), false);
    assert_eq!(packed.bytes().len(), 128 * 64 / 8);
}

#[test]
fn partial_bytes_are_zero_padded_per_row() {
    let img = GrayImage::from_pixel(10, 2, Luma([255]));
    let packed = PackedBitmap::pack(&img, false);
    assert_eq!(PackedBitmap::stride(10), 2);
    assert_eq!(packed.bytes(), &[0xFF, 0b1100_0000, 0xFF, 0b1100_0000]);

    let inverted = PackedBitmap::pack(&GrayImage::new(10, 1), true);
    assert_eq!(inverted.bytes(), &[0xFF, 0b1100_0000]);
}

#[test]
fn pack_then_unpack_reproduces_the_pattern() {
    for (w, h) in [(8, 1), (16, 4), (13, 5), (128, 64)] {
        for invert in [false, true] {
            let img = pattern(w, h, w * 31 + h);
            let packed = PackedBitmap::pack(&img, invert);
            assert_eq!(packed.unpack(invert), img, "{w}x{h} invert={invert}");
            assert_eq!(PackedBitmap::pack(&packed.unpack(invert), invert), packed);
        }
    }
}

#[test]
fn from_bytes_checks_length() {
    assert!(PackedBitmap::from_bytes(16, 2, vec![0; 4]).is_ok());
    assert!(PackedBitmap::from_bytes(12, 2, vec![0; 4]).is_ok());
    assert!(PackedBitmap::from_bytes(16, 2, vec![0; 3]).is_err());
}

#[test]
fn bit_reads_stored_value() {
    let packed = PackedBitmap::from_bytes(8, 1, vec![0b0010_0000]).unwrap();
    assert_eq!(packed.bit(2, 0), Some(true));
    assert_eq!(packed.bit(3, 0), Some(false));
}

#[test]
fn bit_outside_the_bitmap_is_none() {
    // 12 wide: the low nibble of every second byte is row padding.
    let packed = PackedBitmap::from_bytes(12, 2, vec![0xFF; 4]).unwrap();
    assert_eq!(packed.bit(11, 1), Some(true));
    assert_eq!(packed.bit(12, 0), None);
    assert_eq!(packed.bit(15, 1), None);
    assert_eq!(packed.bit(0, 2), None);
    assert_eq!(packed.bit(u32::MAX, u32::MAX), None);
}
