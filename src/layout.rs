//! Face layout state: six ordered slots filled as images arrive.
//!
//! Slots fill in scan order (Front, Back, Top, Bottom, Left, Right). Each new
//! image goes to the first empty slot, is fitted into that face's bounding
//! box, and is rendered by a [`DrawingSurface`]. A slot only empties through
//! [`CubeLayout::remove`]; removal never shifts other slots.
//!
//! # Example
//!
//! ```
//! use cubefit::{CubeLayout, DrawingSurface, Face, Layout, Size};
//!
//! struct Geometry;
//!
//! impl DrawingSurface<Size> for Geometry {
//!     type Output = Layout;
//!     type Error = core::convert::Infallible;
//!
//!     fn compose(&mut self, layout: &Layout, _source: &Size) -> Result<Layout, Self::Error> {
//!         Ok(layout.clone())
//!     }
//! }
//!
//! let mut cube: CubeLayout<Size, Layout> = CubeLayout::new();
//! let assigned = cube.assign(Size::new(600, 600), &mut Geometry).unwrap();
//! assert_eq!(assigned.face, Face::Front);
//! assert_eq!((assigned.fit.width, assigned.fit.x), (300.0, 50.0));
//! assert_eq!(cube.next_free(), Some(Face::Back));
//! ```

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use core::sync::atomic::{AtomicU64, Ordering};

use crate::constraint::{FitResult, Layout, LayoutError};
use crate::face::{FACE_COUNT, Face};
use crate::surface::{DrawingSurface, SourceImage};

/// Source of slot revisions, shared by every layout in the process.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// What to do with images that arrive when no slot is free.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum OverflowPolicy {
    /// Drop the excess images and keep going.
    #[default]
    Ignore,
    /// Refuse a batch that does not fit, leaving the layout untouched.
    Reject,
}

/// A filled slot's contents.
#[derive(Clone, Debug)]
pub struct SlotContent<S, R> {
    /// The uploaded source.
    pub source: S,
    /// Placement of the source inside the face's box.
    pub layout: Layout,
    /// Output of the drawing surface.
    pub rendered: R,
}

/// One face position and what it currently holds.
#[derive(Clone, Debug)]
pub struct FaceSlot<S, R> {
    face: Face,
    content: Option<SlotContent<S, R>>,
    revision: u64,
}

impl<S, R> FaceSlot<S, R> {
    fn empty(face: Face) -> Self {
        Self {
            face,
            content: None,
            revision: 0,
        }
    }

    /// Face this slot belongs to.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Whether the slot holds no image.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Source, layout and rendered output, if filled.
    pub fn content(&self) -> Option<&SlotContent<S, R>> {
        self.content.as_ref()
    }

    /// The uploaded source, if filled.
    pub fn source(&self) -> Option<&S> {
        self.content.as_ref().map(|c| &c.source)
    }

    /// The drawing surface's output, if filled.
    pub fn rendered(&self) -> Option<&R> {
        self.content.as_ref().map(|c| &c.rendered)
    }

    /// Placement inside the face's box, if filled.
    pub fn fit(&self) -> Option<FitResult> {
        self.content.as_ref().map(|c| c.layout.fit)
    }

    /// Changes every time the slot is filled. Distinct fills get distinct
    /// revisions across all layouts; a cloned layout keeps its revisions.
    /// Zero for a slot that was never filled.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Result of a successful [`CubeLayout::assign`].
#[derive(Debug)]
pub struct Assigned<'a, R> {
    pub face: Face,
    pub fit: FitResult,
    pub rendered: &'a R,
}

/// Why an image was not placed.
#[derive(Debug, PartialEq)]
pub enum AssignError<E> {
    /// All six slots are occupied.
    CubeFull,
    /// The source reported a zero dimension.
    InvalidDimension(LayoutError),
    /// The drawing surface failed.
    Render(E),
}

impl<E: core::fmt::Display> core::fmt::Display for AssignError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CubeFull => write!(f, "all {FACE_COUNT} cube faces already hold an image"),
            Self::InvalidDimension(e) => write!(f, "invalid dimension: {e}"),
            Self::Render(e) => write!(f, "render failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: std::error::Error + 'static> std::error::Error for AssignError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CubeFull => None,
            Self::InvalidDimension(e) => Some(e),
            Self::Render(e) => Some(e),
        }
    }
}

/// Per-batch report from [`CubeLayout::assign_batch`].
#[cfg(feature = "alloc")]
#[derive(Debug)]
pub struct BatchOutcome<E> {
    /// Faces filled, in batch order.
    pub assigned: Vec<Face>,
    /// Batch index and error of images that could not be placed.
    pub failed: Vec<(usize, AssignError<E>)>,
    /// Images dropped because the cube was full.
    pub dropped: usize,
}

#[cfg(feature = "alloc")]
impl<E> BatchOutcome<E> {
    fn new() -> Self {
        Self {
            assigned: Vec::new(),
            failed: Vec::new(),
            dropped: 0,
        }
    }
}

/// The six face slots of a cube.
///
/// `S` is the source image type and `R` the drawing surface's output.
#[derive(Clone, Debug)]
pub struct CubeLayout<S, R> {
    slots: [FaceSlot<S, R>; FACE_COUNT],
    overflow: OverflowPolicy,
}

impl<S, R> Default for CubeLayout<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, R> CubeLayout<S, R> {
    /// All slots empty, overflow ignored.
    pub fn new() -> Self {
        Self {
            slots: Face::ALL.map(FaceSlot::empty),
            overflow: OverflowPolicy::Ignore,
        }
    }

    /// Set the overflow policy for batches.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Overflow policy applied by [`assign_batch`](Self::assign_batch).
    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Slot of one face.
    pub fn slot(&self, face: Face) -> &FaceSlot<S, R> {
        &self.slots[face.index()]
    }

    /// All slots in scan order.
    pub fn slots(&self) -> &[FaceSlot<S, R>; FACE_COUNT] {
        &self.slots
    }

    /// First empty face in scan order.
    pub fn next_free(&self) -> Option<Face> {
        self.slots.iter().find(|s| s.is_empty()).map(|s| s.face)
    }

    /// Whether every face holds an image.
    pub fn is_full(&self) -> bool {
        self.next_free().is_none()
    }

    /// Number of faces holding an image.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Number of empty faces.
    pub fn free_count(&self) -> usize {
        FACE_COUNT - self.filled_count()
    }

    /// Rendered outputs in face order, `None` for empty faces.
    ///
    /// This is what a 3D surface binds to the six box faces.
    pub fn textures(&self) -> [Option<&R>; FACE_COUNT] {
        core::array::from_fn(|i| self.slots[i].rendered())
    }

    /// Place `source` in the first empty slot and render it.
    ///
    /// On any error the layout is unchanged.
    pub fn assign<D>(
        &mut self,
        source: S,
        surface: &mut D,
    ) -> Result<Assigned<'_, R>, AssignError<D::Error>>
    where
        S: SourceImage,
        D: DrawingSurface<S, Output = R>,
    {
        let Some(face) = self.next_free() else {
            log::debug!("cube full, rejecting {:?} image", source.size());
            return Err(AssignError::CubeFull);
        };

        let size = source.size();
        let layout = face
            .constraint()
            .compute(size.width, size.height)
            .map_err(AssignError::InvalidDimension)?;
        let rendered = surface
            .compose(&layout, &source)
            .map_err(AssignError::Render)?;

        log::debug!(
            "{face}: {}x{} -> {:.1}x{:.1} at ({:.1}, {:.1})",
            size.width,
            size.height,
            layout.fit.width,
            layout.fit.height,
            layout.fit.x,
            layout.fit.y
        );

        let slot = &mut self.slots[face.index()];
        slot.revision = next_revision();
        let content = slot.content.insert(SlotContent {
            source,
            layout,
            rendered,
        });
        Ok(Assigned {
            face,
            fit: content.layout.fit,
            rendered: &content.rendered,
        })
    }

    /// Assign an ordered batch, one image at a time.
    ///
    /// With [`OverflowPolicy::Ignore`], images beyond the free slots are
    /// dropped and counted. With [`OverflowPolicy::Reject`], a batch larger
    /// than the free slot count returns [`AssignError::CubeFull`] before any
    /// slot is touched. Images that fail individually are reported in
    /// [`BatchOutcome::failed`] and do not consume a slot.
    #[cfg(feature = "alloc")]
    pub fn assign_batch<I, D>(
        &mut self,
        images: I,
        surface: &mut D,
    ) -> Result<BatchOutcome<D::Error>, AssignError<D::Error>>
    where
        I: IntoIterator<Item = S>,
        S: SourceImage,
        D: DrawingSurface<S, Output = R>,
    {
        let images: Vec<S> = images.into_iter().collect();
        let free = self.free_count();
        if self.overflow == OverflowPolicy::Reject && images.len() > free {
            log::warn!(
                "rejecting batch of {} images, only {free} faces free",
                images.len()
            );
            return Err(AssignError::CubeFull);
        }

        let mut outcome = BatchOutcome::new();
        for (i, image) in images.into_iter().enumerate() {
            if self.is_full() {
                outcome.dropped += 1;
                continue;
            }
            match self.assign(image, surface) {
                Ok(assigned) => outcome.assigned.push(assigned.face),
                Err(e) => outcome.failed.push((i, e)),
            }
        }

        if outcome.dropped > 0 {
            log::warn!("cube full, dropped {} images", outcome.dropped);
        }
        Ok(outcome)
    }

    /// Empty a slot, returning what it held. Other slots are untouched.
    /// Removing an empty slot is a no-op.
    pub fn remove(&mut self, face: Face) -> Option<SlotContent<S, R>> {
        let removed = self.slots[face.index()].content.take();
        if removed.is_some() {
            log::debug!("{face}: cleared");
        }
        removed
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.content = None;
        }
    }
}
