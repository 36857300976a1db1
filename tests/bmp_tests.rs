use std::io::Cursor;

use soft_canvas::loaders::{BmpError, BmpImage};

/// Build an uncompressed 24-bit BMP byte stream: 14-byte file header,
/// 40-byte info header, then bottom-up rows padded to 4-byte boundaries.
fn make_bmp(width: i32, height: i32, bits_per_pixel: u16, rows: &[&[u8]]) -> Vec<u8> {
    const DATA_OFFSET: u32 = 14 + 40;

    let row_bytes = width.max(0) as usize * 3;
    let padding = (4 - row_bytes % 4) % 4;
    let file_size = DATA_OFFSET as usize + rows.iter().map(|r| r.len() + padding).sum::<usize>();

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&DATA_OFFSET.to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes()); // info header size
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&[0u8; 24]); // compression through palette fields

    for row in rows {
        out.extend_from_slice(row);
        out.extend_from_slice(&vec![0u8; padding]);
    }
    out
}

// ============================================================================
// Well-formed files
// ============================================================================

#[test]
fn test_decodes_two_by_two_fixture_byte_for_byte() {
    // width 2: 6-byte rows padded to 8
    let bottom_row = [0u8, 0, 255, 0, 255, 0]; // red, green as B,G,R
    let top_row = [255u8, 0, 0, 255, 255, 255]; // blue, white
    let data = make_bmp(2, 2, 24, &[&bottom_row, &top_row]);

    let image = BmpImage::decode(Cursor::new(data)).expect("fixture must decode");
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.pixels().len(), 2 * 2 * 3);
    assert_eq!(&image.pixels()[..6], &bottom_row);
    assert_eq!(&image.pixels()[6..], &top_row);
}

#[test]
fn test_decodes_width_without_padding() {
    // width 4: 12-byte rows, already 4-byte aligned
    let row = [7u8; 12];
    let data = make_bmp(4, 1, 24, &[&row]);

    let image = BmpImage::decode(Cursor::new(data)).unwrap();
    assert_eq!(image.pixels(), &row);
}

#[test]
fn test_decodes_padded_rows_without_leaking_padding() {
    // width 3: 9-byte rows padded with 3 bytes of 0xEE that must not
    // appear in the output
    let row_bytes = [5u8; 9];
    let mut data = make_bmp(3, 2, 24, &[&row_bytes, &row_bytes]);
    for b in data.iter_mut().skip(54).filter(|b| **b == 0) {
        *b = 0xEE;
    }

    let image = BmpImage::decode(Cursor::new(data)).unwrap();
    assert!(image.pixels().iter().all(|&b| b == 5));
}

#[test]
fn test_respects_pixel_data_offset() {
    // Insert a 16-byte gap between the headers and the pixel data.
    let row = [3u8; 6];
    let mut data = make_bmp(2, 1, 24, &[&row]);
    data[10..14].copy_from_slice(&(54u32 + 16).to_le_bytes());
    data.splice(54..54, std::iter::repeat(0xAA).take(16));

    let image = BmpImage::decode(Cursor::new(data)).unwrap();
    assert_eq!(&image.pixels()[..6], &row);
}

#[test]
fn test_rows_top_down_walks_visual_order() {
    let bottom = [1u8; 6];
    let middle = [2u8; 6];
    let top = [3u8; 6];
    let data = make_bmp(2, 3, 24, &[&bottom, &middle, &top]);

    let image = BmpImage::decode(Cursor::new(data)).unwrap();
    let rows: Vec<&[u8]> = image.rows_top_down().collect();
    assert_eq!(rows, vec![&top[..], &middle[..], &bottom[..]]);
}

#[test]
fn test_load_round_trips_through_a_real_file() {
    let row = [42u8; 6];
    let data = make_bmp(2, 1, 24, &[&row]);

    let path = std::env::temp_dir().join("soft_canvas_bmp_roundtrip.bmp");
    std::fs::write(&path, &data).expect("temp fixture write");

    let image = BmpImage::load(&path).expect("fixture must load");
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 1);
    assert_eq!(image.pixels(), &row);

    let _ = std::fs::remove_file(&path);
}

// ============================================================================
// Failure taxonomy
// ============================================================================

#[test]
fn test_missing_file_is_not_found() {
    let err = BmpImage::load("/definitely/not/here.bmp").unwrap_err();
    assert_eq!(err, BmpError::NotFound);
}

#[test]
fn test_wrong_signature_is_wrong_image_format() {
    let mut data = make_bmp(2, 2, 24, &[&[0u8; 6], &[0u8; 6]]);
    data[0..2].copy_from_slice(b"PN");
    assert_eq!(
        BmpImage::decode(Cursor::new(data)),
        Err(BmpError::WrongImageFormat)
    );
}

#[test]
fn test_wrong_bit_depth_is_wrong_pixel_format() {
    for bits in [1u16, 8, 16, 32] {
        let data = make_bmp(2, 2, bits, &[&[0u8; 6], &[0u8; 6]]);
        assert_eq!(
            BmpImage::decode(Cursor::new(data)),
            Err(BmpError::WrongPixelFormat(bits)),
            "bits {bits}"
        );
    }
}

#[test]
fn test_truncated_pixel_rows_are_corrupted() {
    let row = [0u8; 12];
    let rows: [&[u8]; 4] = [&row, &row, &row, &row];
    let data = make_bmp(4, 4, 24, &rows);
    for keep in [54, 60, data.len() - 1] {
        let short = data[..keep].to_vec();
        assert_eq!(
            BmpImage::decode(Cursor::new(short)),
            Err(BmpError::Corrupted),
            "kept {keep} bytes"
        );
    }
}

#[test]
fn test_data_offset_past_eof_is_corrupted() {
    let mut data = make_bmp(2, 1, 24, &[&[0u8; 6]]);
    data[10..14].copy_from_slice(&10_000u32.to_le_bytes());
    assert_eq!(BmpImage::decode(Cursor::new(data)), Err(BmpError::Corrupted));
}
