//! Raster drawing surface: white canvas, resampled source, PNG export.
//!
//! [`RasterSurface`] is the [`DrawingSurface`] used outside of tests. It fills
//! a canvas of the layout's box size with the background color, resamples the
//! source to the layout's pixel rectangle with `fast_image_resize` (falling
//! back to `image::imageops::resize`), and alpha-composites it at the
//! layout's offset.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose;
use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgba, RgbaImage, imageops};

use crate::constraint::{Layout, Size};
use crate::decode::DecodedImage;
use crate::error::{Error, Result};
use crate::surface::{DrawingSurface, SourceImage};

/// File name of the exported processed image.
pub const EXPORT_FILE_NAME: &str = "processed-image.png";

/// Resampling filter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ResizeFilter {
    Nearest,
    /// Closest to what a browser canvas does for `drawImage`.
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl ResizeFilter {
    fn to_resize_alg(self) -> fr::ResizeAlg {
        match self {
            ResizeFilter::Nearest => fr::ResizeAlg::Nearest,
            ResizeFilter::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            ResizeFilter::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }

    fn to_image_filter(self) -> imageops::FilterType {
        match self {
            ResizeFilter::Nearest => imageops::FilterType::Nearest,
            ResizeFilter::Bilinear => imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => imageops::FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

impl SourceImage for DynamicImage {
    fn size(&self) -> Size {
        let (width, height) = self.dimensions();
        Size::new(width, height)
    }
}

impl SourceImage for RgbaImage {
    fn size(&self) -> Size {
        let (width, height) = self.dimensions();
        Size::new(width, height)
    }
}

/// A flattened, letterboxed composite.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedImage {
    image: RgbaImage,
}

impl RenderedImage {
    pub fn size(&self) -> Size {
        let (width, height) = self.image.dimensions();
        Size::new(width, height)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| Error::Encode(format!("png encode failed: {e}")))?;
        Ok(cursor.into_inner())
    }

    /// Encode as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png)
        ))
    }

    /// Write PNG bytes to `path`.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let png = self.encode_png()?;
        std::fs::write(path, &png)?;
        log::info!(
            "exported {}x{} png ({} bytes) to {}",
            self.image.width(),
            self.image.height(),
            png.len(),
            path.display()
        );
        Ok(())
    }

    /// Write [`EXPORT_FILE_NAME`] into `dir` and return its path.
    pub fn export_png(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        self.save_png(&path)?;
        Ok(path)
    }
}

impl SourceImage for RenderedImage {
    fn size(&self) -> Size {
        RenderedImage::size(self)
    }
}

/// Paints sources onto RGBA canvases.
#[derive(Copy, Clone, Debug, Default)]
pub struct RasterSurface {
    filter: ResizeFilter,
}

impl RasterSurface {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }

    /// Fill the canvas, resample `source` to the layout's pixel rectangle, and
    /// composite it at the layout's offset.
    pub fn paint(&self, layout: &Layout, source: &DynamicImage) -> Result<RenderedImage> {
        if layout.canvas.is_empty() {
            return Err(Error::InvalidDimension(
                crate::constraint::LayoutError::InvalidTargetDimension,
            ));
        }
        let rect = layout.pixel_rect();
        let mut canvas = ImageBuffer::from_pixel(
            layout.canvas.width,
            layout.canvas.height,
            Rgba(layout.canvas_color.to_rgba()),
        );
        let scaled = resize_rgba(source, rect.width, rect.height, self.filter);
        imageops::overlay(&mut canvas, &scaled, rect.x, rect.y);
        Ok(RenderedImage { image: canvas })
    }
}

impl DrawingSurface<DynamicImage> for RasterSurface {
    type Output = RenderedImage;
    type Error = Error;

    fn compose(&mut self, layout: &Layout, source: &DynamicImage) -> Result<RenderedImage> {
        self.paint(layout, source)
    }
}

impl DrawingSurface<DecodedImage> for RasterSurface {
    type Output = RenderedImage;
    type Error = Error;

    fn compose(&mut self, layout: &Layout, source: &DecodedImage) -> Result<RenderedImage> {
        self.paint(layout, &source.image)
    }
}

fn resize_rgba(source: &DynamicImage, width: u32, height: u32, filter: ResizeFilter) -> RgbaImage {
    let src = source.to_rgba8();
    if src.dimensions() == (width, height) {
        return src;
    }
    match resize_with_fast_image_resize(src, width, height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("fast_image_resize failed, falling back to imageops::resize: {err}");
            imageops::resize(&source.to_rgba8(), width, height, filter.to_image_filter())
        }
    }
}

/// Consumes `src` so its buffer moves into the resizer without a copy.
fn resize_with_fast_image_resize(
    src: RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: ResizeFilter,
) -> Result<RgbaImage> {
    let (src_width, src_height) = src.dimensions();
    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        src.into_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| Error::Render(format!("source buffer: {e}")))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(filter.to_resize_alg());

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| Error::Render(format!("resize: {e}")))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| Error::Render("resized buffer has unexpected length".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, Placement};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(width, height, RED))
    }

    #[test]
    fn letterboxes_square_into_landscape() {
        let layout = Constraint::new(400, 300).compute(600, 600).unwrap();
        let out = RasterSurface::new(ResizeFilter::Nearest)
            .paint(&layout, &solid(600, 600))
            .unwrap();
        let img = out.as_rgba();
        assert_eq!(out.size(), Size::new(400, 300));
        // 50px white bars on both sides, image in the middle.
        assert_eq!(*img.get_pixel(10, 150), WHITE);
        assert_eq!(*img.get_pixel(390, 150), WHITE);
        assert_eq!(*img.get_pixel(200, 150), RED);
        assert_eq!(*img.get_pixel(51, 0), RED);
    }

    #[test]
    fn narrow_face_gets_side_margins() {
        let layout = Constraint::new(200, 300)
            .placement(Placement::SideMargins)
            .compute(100, 400)
            .unwrap();
        let out = RasterSurface::new(ResizeFilter::Nearest)
            .paint(&layout, &solid(100, 400))
            .unwrap();
        let img = out.as_rgba();
        assert_eq!(*img.get_pixel(100, 0), RED);
        assert_eq!(*img.get_pixel(100, 299), RED);
        assert_eq!(*img.get_pixel(5, 150), WHITE);
        assert_eq!(*img.get_pixel(195, 150), WHITE);
    }

    #[test]
    fn owned_buffer_resizes() {
        let src = ImageBuffer::from_pixel(6, 4, RED);
        let out = resize_with_fast_image_resize(src, 3, 2, ResizeFilter::Nearest).unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        assert!(out.pixels().all(|p| *p == RED));
    }

    #[test]
    fn same_size_source_covers_canvas() {
        let layout = Constraint::new(40, 30).compute(40, 30).unwrap();
        let out = RasterSurface::default().paint(&layout, &solid(40, 30)).unwrap();
        assert!(out.as_rgba().pixels().all(|p| *p == RED));
    }

    #[test]
    fn png_and_data_url() {
        let layout = Constraint::new(8, 6).compute(4, 4).unwrap();
        let out = RasterSurface::default().paint(&layout, &solid(4, 4)).unwrap();
        let png = out.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let url = out.to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (8, 6));
    }
}
