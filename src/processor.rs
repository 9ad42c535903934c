//! Single-image processor: an "original" and a "processed" rendition.
//!
//! The original is stretched over the whole canvas; the processed one is
//! fitted with the configured policy and letterboxed on the background. Only
//! the processed rendition is exported.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::constraint::{CanvasColor, Constraint, FitPolicy, Layout, Size};
use crate::decode::{self, DecodeLimits, Upload};
use crate::error::Result;
use crate::render::{EXPORT_FILE_NAME, RasterSurface, RenderedImage, ResizeFilter};
use crate::surface::SourceImage;

/// Both renditions of one upload.
#[derive(Clone, Debug)]
pub struct ProcessedPair {
    /// Source stretched to the canvas.
    pub original: RenderedImage,
    /// Source fitted and letterboxed.
    pub processed: RenderedImage,
    /// Placement used for `processed`.
    pub layout: Layout,
    export_file_name: String,
}

impl ProcessedPair {
    /// Write the processed rendition into `dir` under the export file name.
    pub fn export_png(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.export_file_name);
        self.processed.save_png(&path)?;
        Ok(path)
    }

    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }
}

#[derive(Clone, Debug)]
pub struct ImageProcessor {
    canvas: Size,
    policy: FitPolicy,
    background: CanvasColor,
    limits: DecodeLimits,
    export_file_name: String,
    surface: RasterSurface,
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self {
            canvas: Size::new(400, 300),
            policy: FitPolicy::Uniform,
            background: CanvasColor::White,
            limits: DecodeLimits::default(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            surface: RasterSurface::new(ResizeFilter::default()),
        }
    }
}

impl ImageProcessor {
    /// 400×300 white canvas, uniform fit.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "config")]
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            canvas: config.canvas,
            policy: config.fit_policy,
            background: config.background,
            limits: config.limits,
            export_file_name: config.export_file_name.clone(),
            surface: RasterSurface::new(config.resize_filter),
        }
    }

    pub fn canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn policy(mut self, policy: FitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn background(mut self, color: CanvasColor) -> Self {
        self.background = color;
        self
    }

    /// Render both renditions of a decoded image.
    pub fn process(&self, image: &DynamicImage) -> Result<ProcessedPair> {
        let size = image.size();

        let stretched = Constraint::new(self.canvas.width, self.canvas.height)
            .policy(FitPolicy::Distort)
            .canvas_color(self.background)
            .compute(size.width, size.height)?;
        let original = self.surface.paint(&stretched, image)?;

        let layout = Constraint::new(self.canvas.width, self.canvas.height)
            .policy(self.policy)
            .canvas_color(self.background)
            .compute(size.width, size.height)?;
        let processed = self.surface.paint(&layout, image)?;

        log::debug!(
            "processed {}x{} into {}x{} ({:?}): {:.1}x{:.1} at ({:.1}, {:.1})",
            size.width,
            size.height,
            self.canvas.width,
            self.canvas.height,
            self.policy,
            layout.fit.width,
            layout.fit.height,
            layout.fit.x,
            layout.fit.y
        );

        Ok(ProcessedPair {
            original,
            processed,
            layout,
            export_file_name: self.export_file_name.clone(),
        })
    }

    /// Decode an upload, then [`process`](Self::process) it.
    pub fn process_upload(&self, upload: &Upload) -> Result<ProcessedPair> {
        let decoded = decode::decode(upload, &self.limits)?;
        self.process(&decoded.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn blue(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            width,
            height,
            Rgba([0, 0, 255, 255]),
        ))
    }

    #[test]
    fn original_is_stretched_processed_is_letterboxed() {
        let pair = ImageProcessor::new().process(&blue(100, 400)).unwrap();
        assert_eq!(pair.original.size(), Size::new(400, 300));
        assert_eq!(pair.processed.size(), Size::new(400, 300));

        // Stretched covers every pixel; letterboxed leaves white on the sides.
        assert_eq!(*pair.original.as_rgba().get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(
            *pair.processed.as_rgba().get_pixel(0, 0),
            Rgba([255, 255, 255, 255])
        );
        assert_eq!((pair.layout.fit.width, pair.layout.fit.height), (75.0, 300.0));
    }

    #[test]
    fn axis_priority_keeps_small_sources_unscaled() {
        let pair = ImageProcessor::new()
            .policy(FitPolicy::AxisPriority)
            .process(&blue(100, 50))
            .unwrap();
        assert_eq!(pair.layout.fit.width, 100.0);
        assert_eq!(pair.layout.fit.x, 150.0);
    }

    #[test]
    fn export_uses_fixed_name() {
        let pair = ImageProcessor::new().process(&blue(10, 10)).unwrap();
        assert_eq!(pair.export_file_name(), "processed-image.png");
    }
}
