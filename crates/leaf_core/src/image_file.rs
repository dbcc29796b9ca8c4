//! The selected image and the preview derived from it.

use crate::error::IntakeError;
use image::ImageFormat;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Longest edge of a decoded preview, in pixels.
pub const PREVIEW_MAX_EDGE: u32 = 1024;

const OCTET_STREAM: &str = "application/octet-stream";

/// Where the image bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// A file on disk, read on demand.
    Path(PathBuf),
    /// Bytes already in memory (clipboard, drop without path).
    Bytes(Arc<[u8]>),
}

/// An image chosen by the user. Never mutated; a new selection replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    mime: String,
    payload: ImagePayload,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, payload: ImagePayload) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            payload,
        }
    }

    /// File on disk; MIME type inferred from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_from_path(&path).to_string();
        Self::new(name, mime, ImagePayload::Path(path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }

    /// Loads the raw bytes. Disk payloads are read each call.
    pub fn read_bytes(&self) -> Result<Cow<'_, [u8]>, IntakeError> {
        match &self.payload {
            ImagePayload::Bytes(bytes) => Ok(Cow::Borrowed(&bytes[..])),
            ImagePayload::Path(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| IntakeError::Read {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// Displayable RGBA pixels derived from an [`ImageFile`].
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for ImagePreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePreview")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl ImagePreview {
    pub fn decode(file: &ImageFile) -> Result<Self, IntakeError> {
        let bytes = file.read_bytes()?;
        let img = image::load_from_memory(&bytes)?;
        let img = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
            img.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// MIME type guessed from the file extension.
pub fn mime_from_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// MIME type guessed from the leading bytes.
pub fn mime_from_bytes(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}
