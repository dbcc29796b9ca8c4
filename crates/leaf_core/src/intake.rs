//! Image intake: turns drops, file picks and clipboard contents into at most
//! one [`ImageFile`].
//!
//! None of these paths read image bytes. Anything that is not an image is
//! ignored without surfacing an error.

use crate::image_file::{ImageFile, ImagePayload, is_image_mime, mime_from_bytes, mime_from_path};
use crate::paste::{PasteListeners, PasteSubscription};
use std::path::PathBuf;
use std::sync::Arc;

/// Extensions offered by the file picker.
pub const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// A file dropped onto the window, as reported by the platform.
#[derive(Debug, Clone, Default)]
pub struct DroppedItem {
    pub name: String,
    /// Empty when the platform does not report a MIME type.
    pub mime: String,
    pub path: Option<PathBuf>,
    pub bytes: Option<Arc<[u8]>>,
}

impl DroppedItem {
    fn effective_mime(&self) -> String {
        if !self.mime.is_empty() {
            return self.mime.clone();
        }
        if let Some(path) = &self.path {
            return mime_from_path(path).to_string();
        }
        if let Some(bytes) = &self.bytes {
            return mime_from_bytes(bytes).to_string();
        }
        String::new()
    }

    fn into_image_file(self, mime: String) -> Option<ImageFile> {
        match (self.path, self.bytes) {
            (Some(path), _) => {
                let name = if self.name.is_empty() {
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
                } else {
                    self.name
                };
                Some(ImageFile::new(name, mime, ImagePayload::Path(path)))
            }
            (None, Some(bytes)) => Some(ImageFile::new(self.name, mime, ImagePayload::Bytes(bytes))),
            (None, None) => None,
        }
    }
}

/// One entry of the clipboard.
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    pub mime: String,
    /// `None` when the entry cannot be turned into a file.
    pub data: Option<Arc<[u8]>>,
}

impl ClipboardItem {
    pub fn new(mime: impl Into<String>, data: Option<Arc<[u8]>>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }
}

/// First dropped entry, if it is an image. Remaining entries are ignored.
pub fn take_dropped(items: Vec<DroppedItem>) -> Option<ImageFile> {
    let first = items.into_iter().next()?;
    let mime = first.effective_mime();
    if !is_image_mime(&mime) {
        tracing::debug!(name = %first.name, mime = %mime, "ignoring non-image drop");
        return None;
    }
    first.into_image_file(mime)
}

/// First picked path, if its extension maps to an image type.
pub fn take_picked(paths: impl IntoIterator<Item = PathBuf>) -> Option<ImageFile> {
    let file = ImageFile::from_path(paths.into_iter().next()?);
    if !file.is_image() {
        tracing::warn!(name = %file.name(), mime = %file.mime(), "picked file is not an image");
        return None;
    }
    Some(file)
}

/// First clipboard entry with an image type and usable data.
pub fn take_pasted(items: Vec<ClipboardItem>) -> Option<ImageFile> {
    items.into_iter().find_map(|item| {
        if !is_image_mime(&item.mime) {
            return None;
        }
        let data = item.data?;
        let ext = item.mime.trim_start_matches("image/").to_string();
        Some(ImageFile::new(
            format!("pasted.{ext}"),
            item.mime,
            ImagePayload::Bytes(data),
        ))
    })
}

/// State of the intake zone. Holds a paste subscription for its lifetime.
#[derive(Debug)]
pub struct ImageSource {
    dragging: bool,
    _paste: PasteSubscription,
}

impl ImageSource {
    pub fn new(listeners: &PasteListeners) -> Self {
        Self {
            dragging: false,
            _paste: listeners.subscribe(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Files entering or leaving the window toggle the highlight.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.dragging = hovering;
    }

    pub fn drop_files(&mut self, items: Vec<DroppedItem>) -> Option<ImageFile> {
        self.dragging = false;
        take_dropped(items)
    }

    pub fn pick_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Option<ImageFile> {
        take_picked(paths)
    }

    pub fn paste(&mut self, items: Vec<ClipboardItem>) -> Option<ImageFile> {
        take_pasted(items)
    }
}
