//! Shared helpers for unit tests.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Encodes a solid green PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 160, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encoding a PNG into memory cannot fail");
    out.into_inner()
}
