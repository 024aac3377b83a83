#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, palette: &[u8], pixels: &[u8]) -> Vec<u8> {
    let off_bits = 54 + palette.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(off_bits + pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&off_bits.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    out.extend_from_slice(palette);
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let two_colors = [0, 0, 0, 0, 0xff, 0xff, 0xff, 0];
    let seeds = [
        ("1bpp_8x2.bmp", bmp(8, 2, 1, &two_colors, &[0xa5, 0, 0, 0, 0x5a, 0, 0, 0])),
        ("4bpp_3x1.bmp", bmp(3, 1, 4, &two_colors, &[0x01, 0x10, 0, 0])),
        ("8bpp_2x2_top_down.bmp", bmp(2, -2, 8, &two_colors, &[0, 1, 0, 0, 1, 0, 0, 0])),
        ("16bpp_565_2x1.bmp", bmp(2, 1, 16, &[], &[0x00, 0xf8, 0x1f, 0x00])),
        (
            "16bpp_masks_1x1.bmp",
            bmp(1, 1, 16, &[0, 0x7c, 0, 0, 0xe0, 0x03, 0, 0, 0x1f, 0, 0, 0], &[0xff, 0x7f, 0, 0]),
        ),
        ("24bpp_1x1.bmp", bmp(1, 1, 24, &[], &[0xff, 0x00, 0x00, 0x00])),
        ("32bpp_2x1.bmp", bmp(2, 1, 32, &[], &[1, 2, 3, 4, 5, 6, 7, 8])),
    ];
    for (name, data) in seeds {
        fs::write(format!("{dir}/{name}"), data).unwrap();
    }

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut cut = bmp(4, 4, 24, &[], &[0x40; 48]);
    cut.truncate(cut.len() - 5);
    fs::write(format!("{dir}/24bpp_truncated.bmp"), cut).unwrap();

    println!("Generated seed corpus in {dir}/");
}
