//! Async upload session for the six-face cube.
//!
//! Decoding runs on tokio's blocking pool, one task per file, so a batch
//! decodes concurrently. Results are awaited in upload order and assigned one
//! at a time, so face order always follows the order the files were given in,
//! whichever decode finishes first.

use tokio::task::JoinHandle;

use crate::decode::{self, DecodeLimits, DecodedImage, Upload};
use crate::error::{Error, Result};
use crate::face::Face;
use crate::layout::{CubeLayout, OverflowPolicy, SlotContent};
use crate::render::{RasterSurface, RenderedImage, ResizeFilter};

/// What happened to one [`CubeSession::upload`] batch.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Filled faces and the file that went there, in upload order.
    pub assigned: Vec<(Face, String)>,
    /// Files that failed to decode or render. They consumed no face.
    pub failed: Vec<(String, Error)>,
    /// Files ignored because the cube had no free face.
    pub dropped: usize,
}

/// Cube layout fed by decoded uploads and painted by a [`RasterSurface`].
#[derive(Debug, Default)]
pub struct CubeSession {
    layout: CubeLayout<DecodedImage, RenderedImage>,
    surface: RasterSurface,
    limits: DecodeLimits,
}

impl CubeSession {
    pub fn new(overflow: OverflowPolicy, filter: ResizeFilter, limits: DecodeLimits) -> Self {
        Self {
            layout: CubeLayout::new().with_overflow(overflow),
            surface: RasterSurface::new(filter),
            limits,
        }
    }

    #[cfg(feature = "config")]
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.overflow, config.resize_filter, config.limits)
    }

    pub fn layout(&self) -> &CubeLayout<DecodedImage, RenderedImage> {
        &self.layout
    }

    /// Decode and place a batch of files.
    ///
    /// Files beyond the free face count are not decoded. Under
    /// [`OverflowPolicy::Reject`] such a batch fails with [`Error::CubeFull`]
    /// and nothing changes.
    pub async fn upload(&mut self, files: Vec<Upload>) -> Result<UploadReport> {
        let free = self.layout.free_count();
        let mut report = UploadReport::default();

        let mut files = files;
        if files.len() > free {
            if self.layout.overflow() == OverflowPolicy::Reject {
                log::warn!(
                    "rejecting batch of {} files, only {free} faces free",
                    files.len()
                );
                return Err(Error::CubeFull);
            }
            report.dropped = files.len() - free;
            files.truncate(free);
            log::warn!("cube full, dropped {} files", report.dropped);
        }

        let pending: Vec<(String, JoinHandle<Result<DecodedImage>>)> = files
            .into_iter()
            .map(|upload| {
                let limits = self.limits;
                let name = upload.name.clone();
                let handle = tokio::task::spawn_blocking(move || decode::decode(&upload, &limits));
                (name, handle)
            })
            .collect();

        for (name, handle) in pending {
            let decoded = match handle.await {
                Ok(Ok(decoded)) => decoded,
                Ok(Err(e)) => {
                    log::warn!("{name}: {e}");
                    report.failed.push((name, e));
                    continue;
                }
                Err(e) => {
                    let e = Error::Decode(format!("decode task failed: {e}"));
                    log::error!("{name}: {e}");
                    report.failed.push((name, e));
                    continue;
                }
            };

            match self.layout.assign(decoded, &mut self.surface) {
                Ok(assigned) => report.assigned.push((assigned.face, name)),
                Err(e) => {
                    let e = Error::from(e);
                    log::warn!("{name}: {e}");
                    report.failed.push((name, e));
                }
            }
        }

        log::info!(
            "upload batch: {} assigned, {} failed, {} dropped",
            report.assigned.len(),
            report.failed.len(),
            report.dropped
        );
        Ok(report)
    }

    /// Empty one face. Other faces keep their images.
    pub fn remove(&mut self, face: Face) -> Option<SlotContent<DecodedImage, RenderedImage>> {
        self.layout.remove(face)
    }

    pub fn clear(&mut self) {
        self.layout.clear();
    }
}
