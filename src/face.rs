//! Cube faces, their bounding boxes, and aspect classes.
//!
//! ```text
//!     Face      Box        Class
//!     Front     400×300    wide-short (4:3)
//!     Back      400×300    wide-short (4:3)
//!     Top       400×200    wide-flat  (4:2)
//!     Bottom    400×200    wide-flat  (4:2)
//!     Left      200×300    tall-narrow (2:3)
//!     Right     200×300    tall-narrow (2:3)
//! ```

use crate::constraint::{Constraint, FitPolicy, Placement, Size};

/// Number of faces on the cube.
pub const FACE_COUNT: usize = 6;

/// One of the six face positions, in fill order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Face {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    /// All faces in scan order.
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    /// Position in scan order (0-5).
    pub const fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Top => 2,
            Face::Bottom => 3,
            Face::Left => 4,
            Face::Right => 5,
        }
    }

    /// Face at a scan-order position.
    pub const fn from_index(index: usize) -> Option<Face> {
        if index < FACE_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Face::Front => "Front",
            Face::Back => "Back",
            Face::Top => "Top",
            Face::Bottom => "Bottom",
            Face::Left => "Left",
            Face::Right => "Right",
        }
    }

    /// Aspect class of this face.
    pub const fn aspect_class(self) -> AspectClass {
        match self {
            Face::Front | Face::Back => AspectClass::WideShort,
            Face::Top | Face::Bottom => AspectClass::WideFlat,
            Face::Left | Face::Right => AspectClass::TallNarrow,
        }
    }

    /// Bounding box images on this face are fitted into.
    pub const fn bounding_box(self) -> Size {
        self.aspect_class().bounding_box()
    }

    /// Fit constraint for this face: uniform scale-to-fit on white, with
    /// side margins on narrow faces.
    pub fn constraint(self) -> Constraint {
        Constraint::new(self.bounding_box().width, self.bounding_box().height)
            .policy(FitPolicy::Uniform)
            .placement(self.aspect_class().placement())
    }
}

impl core::fmt::Display for Face {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three distinct face proportions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AspectClass {
    /// 400×300 (4:3).
    WideShort,
    /// 400×200 (4:2).
    WideFlat,
    /// 200×300 (2:3).
    TallNarrow,
}

impl AspectClass {
    pub const fn bounding_box(self) -> Size {
        match self {
            AspectClass::WideShort => Size::new(400, 300),
            AspectClass::WideFlat => Size::new(400, 200),
            AspectClass::TallNarrow => Size::new(200, 300),
        }
    }

    /// Placement rule for the class. Narrow faces put margins on the sides.
    pub const fn placement(self) -> Placement {
        match self {
            AspectClass::TallNarrow => Placement::SideMargins,
            AspectClass::WideShort | AspectClass::WideFlat => Placement::Center,
        }
    }

    /// Human-readable ratio, as shown on the face group headings.
    pub const fn ratio_label(self) -> &'static str {
        match self {
            AspectClass::WideShort => "4:3",
            AspectClass::WideFlat => "4:2",
            AspectClass::TallNarrow => "2:3",
        }
    }
}
