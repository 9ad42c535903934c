//! Aspect-preserving image fit, letterbox compositing, and six-face cube layout.
//!
//! The geometry core is `no_std` and allocation-free. Pixel work, decoding,
//! configuration and the async upload session sit behind features.
//!
//! # Modules
//!
//! - [`constraint`]: fit policies, placement rules, and layout computation
//! - [`face`]: the six cube faces and their bounding boxes
//! - [`surface`]: traits for source images and drawing surfaces
//! - [`layout`]: the six-slot cube layout state
//! - [`scene`]: 3D scene description and texture lifecycle
//! - `svg`: SVG diagram of a cube layout (feature `svg`)
//! - `render`, `decode`, `processor`: raster pipeline (feature `render`)
//! - `config`: JSON configuration (feature `config`)
//! - `session`: async batch uploads (feature `async`)
//!
//! # Example
//!
//! ```
//! let r = cubefit::fit(100.0, 400.0, 200.0, 300.0).unwrap();
//! assert_eq!((r.width, r.height), (75.0, 300.0));
//! assert_eq!((r.x, r.y), (62.5, 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod constraint;
pub mod face;
pub mod layout;
pub mod scene;
pub mod surface;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "std")]
pub mod error;

#[cfg(feature = "render")]
pub mod decode;
#[cfg(feature = "render")]
pub mod processor;
#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "async")]
pub mod session;

pub use constraint::{
    CanvasColor, Constraint, FitPolicy, FitResult, Layout, LayoutError, PixelRect, Placement,
    Size, fit, fit_with,
};
pub use face::{AspectClass, FACE_COUNT, Face};
#[cfg(feature = "alloc")]
pub use layout::BatchOutcome;
pub use layout::{AssignError, Assigned, CubeLayout, FaceSlot, OverflowPolicy, SlotContent};
pub use scene::{CubeScene, CubeView, SceneSurface};
pub use surface::{DrawingSurface, SourceImage};

#[cfg(feature = "std")]
pub use error::{Error, Result};

#[cfg(feature = "render")]
pub use decode::{DecodeLimits, DecodedImage, Upload, decode};
#[cfg(feature = "render")]
pub use processor::{ImageProcessor, ProcessedPair};
#[cfg(feature = "render")]
pub use render::{EXPORT_FILE_NAME, RasterSurface, RenderedImage, ResizeFilter};

#[cfg(feature = "config")]
pub use config::Config;

#[cfg(feature = "async")]
pub use session::{CubeSession, UploadReport};
