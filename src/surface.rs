//! Seams to the collaborators that own pixels.
//!
//! The layout core never touches pixel data. It asks a [`SourceImage`] for
//! its natural size and hands the computed [`Layout`] to a
//! [`DrawingSurface`], which paints the background and the scaled image and
//! returns whatever flattened output it produces (an RGBA buffer, an encoded
//! PNG, a texture id).

use crate::constraint::{Layout, Size};

/// A decoded raster with natural dimensions.
pub trait SourceImage {
    /// Natural width and height in pixels.
    fn size(&self) -> Size;
}

impl SourceImage for Size {
    fn size(&self) -> Size {
        *self
    }
}

impl<T: SourceImage + ?Sized> SourceImage for &T {
    fn size(&self) -> Size {
        (**self).size()
    }
}

/// Paints a source onto a canvas of `layout.canvas` size.
///
/// Implementations fill the whole canvas with `layout.canvas_color`, then draw
/// the source scaled to the layout's size at the layout's offset.
pub trait DrawingSurface<S: ?Sized> {
    /// Flattened result of one composition.
    type Output;
    /// Failure while painting or exporting.
    type Error;

    fn compose(&mut self, layout: &Layout, source: &S) -> Result<Self::Output, Self::Error>;
}
