//! Upload decoding: raw bytes to a source raster.
//!
//! Checks run cheapest first: byte size, format sniffing, header dimensions
//! against the pixel ceiling, then the full decode. A failure at any step is
//! an [`Error::Decode`] or [`Error::ResourceLimit`] and consumes no slot.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageReader};

use crate::constraint::Size;
use crate::error::{Error, Result};
use crate::surface::SourceImage;

/// A file handed over by the file provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    /// File name, for logs and reports.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read an upload from disk, naming it after the file.
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Size ceilings applied before and after decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DecodeLimits {
    /// Largest accepted upload, in bytes.
    pub max_file_size: u64,
    /// Largest accepted `width * height`.
    pub max_decoded_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
        }
    }
}

/// A decoded upload: the original raster plus its file name.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub name: String,
    pub image: DynamicImage,
}

impl SourceImage for DecodedImage {
    fn size(&self) -> Size {
        let (width, height) = self.image.dimensions();
        Size::new(width, height)
    }
}

/// Read natural dimensions from the image header without decoding pixels.
pub fn probe_dimensions(bytes: &[u8]) -> Result<Size> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Decode(format!("unrecognized image format: {e}")))?;
    if reader.format().is_none() {
        return Err(Error::Decode("unrecognized image format".to_string()));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::Decode(format!("cannot read image dimensions: {e}")))?;
    Ok(Size::new(width, height))
}

/// Decode an upload into a source raster.
pub fn decode(upload: &Upload, limits: &DecodeLimits) -> Result<DecodedImage> {
    if upload.bytes.is_empty() {
        return Err(Error::Decode(format!("{}: empty file", upload.name)));
    }
    if upload.bytes.len() as u64 > limits.max_file_size {
        return Err(Error::ResourceLimit(format!(
            "{}: {} bytes exceeds limit of {} bytes",
            upload.name,
            upload.bytes.len(),
            limits.max_file_size
        )));
    }

    let header = probe_dimensions(&upload.bytes)
        .map_err(|e| Error::Decode(format!("{}: {e}", upload.name)))?;
    validate_pixels(&upload.name, header, limits)?;

    let image = image::load_from_memory(&upload.bytes)
        .map_err(|e| Error::Decode(format!("{}: {e}", upload.name)))?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Decode(format!("{}: image has no pixels", upload.name)));
    }

    log::info!("decoded {} ({}x{})", upload.name, width, height);
    Ok(DecodedImage {
        name: upload.name.clone(),
        image,
    })
}

fn validate_pixels(name: &str, size: Size, limits: &DecodeLimits) -> Result<()> {
    let pixels = size.width as u64 * size.height as u64;
    if pixels > limits.max_decoded_pixels {
        return Err(Error::ResourceLimit(format!(
            "{name}: {pixels} pixels exceeds limit of {}",
            limits.max_decoded_pixels
        )));
    }
    Ok(())
}
