//! Reads the system clipboard into intake items.

use image::{ImageFormat, RgbaImage};
use leaf_core::ClipboardItem;
use std::io::Cursor;
use std::sync::Arc;

/// Snapshot of the clipboard: text entry (if any) followed by the image
/// entry (if any), encoded as PNG.
pub fn read_items() -> Vec<ClipboardItem> {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("clipboard unavailable: {e}");
            return Vec::new();
        }
    };

    let mut items = Vec::new();
    if let Ok(text) = clipboard.get_text()
        && !text.is_empty()
    {
        items.push(ClipboardItem::new(
            "text/plain",
            Some(Arc::from(text.into_bytes())),
        ));
    }
    match clipboard.get_image() {
        Ok(img) => items.push(image_item(img.width, img.height, &img.bytes)),
        Err(arboard::Error::ContentNotAvailable) => {}
        Err(e) => tracing::debug!("clipboard image unreadable: {e}"),
    }
    items
}

/// Wraps raw RGBA clipboard pixels as a PNG item. The item carries no data
/// when the pixels do not match the reported size.
fn image_item(width: usize, height: usize, rgba: &[u8]) -> ClipboardItem {
    let data = encode_png(width, height, rgba);
    if data.is_none() {
        tracing::warn!(width, height, len = rgba.len(), "clipboard image could not be encoded");
    }
    ClipboardItem::new("image/png", data)
}

fn encode_png(width: usize, height: usize, rgba: &[u8]) -> Option<Arc<[u8]>> {
    let width = u32::try_from(width).ok()?;
    let height = u32::try_from(height).ok()?;
    let img = RgbaImage::from_raw(width, height, rgba.to_vec())?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).ok()?;
    Some(Arc::from(out.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn rgba_pixels_become_png() {
        let pixels = [0u8, 200, 0, 255].repeat(6);
        let item = image_item(3, 2, &pixels);
        assert_eq!(item.mime, "image/png");
        let data = item.data.expect("png bytes");
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[rstest]
    #[case(3, 2, 5)]
    #[case(4, 4, 0)]
    fn mismatched_buffers_carry_no_data(
        #[case] width: usize,
        #[case] height: usize,
        #[case] len: usize,
    ) {
        let item = image_item(width, height, &vec![0u8; len]);
        assert_eq!(item.mime, "image/png");
        assert!(item.data.is_none());
    }
}
