//! Fit computation for placing a source image inside a bounding box.
//!
//! Computes the scaled size and the top-left offset of a source image on a
//! fixed-size canvas. Pure geometry: no pixel operations, no allocations,
//! `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use cubefit::{Constraint, FitPolicy, Size};
//!
//! let layout = Constraint::new(400, 300)
//!     .policy(FitPolicy::Uniform)
//!     .compute(600, 600)
//!     .unwrap();
//!
//! // Square source letterboxed into a 4:3 box: 300×300 with 50px side margins.
//! assert_eq!(layout.fit.width, 300.0);
//! assert_eq!(layout.fit.x, 50.0);
//! assert_eq!(layout.resize_to(), Size::new(300, 300));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// How a source image is scaled into a bounding box.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum FitPolicy {
    /// Scale uniformly by `min(box_w / src_w, box_h / src_h)`.
    /// Upscales or downscales as needed; the result always fits the box and
    /// keeps the source aspect ratio.
    #[default]
    Uniform,

    /// Historical behavior: landscape sources shrink to the box width when
    /// wider than it, everything else shrinks to the box height when taller
    /// than it. Never upscales.
    ///
    /// A landscape source can still overflow the box vertically (e.g. 400×390
    /// into 400×300). Prefer [`Uniform`](Self::Uniform).
    AxisPriority,

    /// Stretch to the exact box dimensions, ignoring aspect ratio.
    Distort,
}

/// How the offset of the scaled image is derived.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Placement {
    /// `x = (box_w - w) / 2`, `y = (box_h - h) / 2`. Never clamped.
    #[default]
    Center,
    /// The axis the image fills is pinned to offset zero and the whole margin
    /// goes to the other axis. Used for narrow faces so that a tall source
    /// gets side margins instead of top/bottom letterboxing.
    SideMargins,
}

/// Canvas background color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum CanvasColor {
    /// Transparent black `[0, 0, 0, 0]`.
    Transparent,
    /// sRGB color with alpha (8-bit per channel).
    Srgb { r: u8, g: u8, b: u8, a: u8 },
    /// Opaque white, the letterbox background.
    #[default]
    White,
}

impl CanvasColor {
    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::White
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::Srgb {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }

    /// RGBA bytes for this color.
    pub const fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Transparent => [0, 0, 0, 0],
            Self::Srgb { r, g, b, a } => [r, g, b, a],
            Self::White => [255, 255, 255, 255],
        }
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Scaled dimensions and top-left offset of a source placed inside a box.
///
/// Offsets are not clamped: with [`FitPolicy::AxisPriority`] an oversized
/// source yields a negative offset on the overflowing axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitResult {
    /// Scaled width.
    pub width: f64,
    /// Scaled height.
    pub height: f64,
    /// Horizontal offset of the left edge inside the box.
    pub x: f64,
    /// Vertical offset of the top edge inside the box.
    pub y: f64,
}

impl FitResult {
    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the placed rectangle lies inside `(0, 0, box_w, box_h)`,
    /// allowing `epsilon` of floating-point slack.
    pub fn fits_within(&self, box_w: f64, box_h: f64, epsilon: f64) -> bool {
        self.x >= -epsilon
            && self.y >= -epsilon
            && self.right() <= box_w + epsilon
            && self.bottom() <= box_h + epsilon
    }
}

/// Integer rectangle used for drawing onto a raster canvas.
///
/// `x`/`y` are signed because unclamped offsets may be negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Fit specification for one bounding box.
///
/// # Example
///
/// ```
/// use cubefit::{CanvasColor, Constraint, Placement, Size};
///
/// let layout = Constraint::new(200, 300)
///     .placement(Placement::SideMargins)
///     .canvas_color(CanvasColor::white())
///     .compute(100, 400)
///     .unwrap();
///
/// assert_eq!(layout.canvas, Size::new(200, 300));
/// assert_eq!((layout.fit.x, layout.fit.y), (62.5, 0.0));
/// assert!(layout.needs_padding());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub canvas: Size,
    pub policy: FitPolicy,
    pub placement: Placement,
    pub canvas_color: CanvasColor,
}

impl Constraint {
    /// Uniform, centered fit into a `width` × `height` box on white.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Size::new(width, height),
            policy: FitPolicy::Uniform,
            placement: Placement::Center,
            canvas_color: CanvasColor::White,
        }
    }

    /// Set the scaling policy.
    pub fn policy(mut self, policy: FitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set how offsets are derived.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set canvas background color.
    pub fn canvas_color(mut self, color: CanvasColor) -> Self {
        self.canvas_color = color;
        self
    }

    /// Compute the layout for a source image of the given dimensions.
    pub fn compute(&self, source_w: u32, source_h: u32) -> Result<Layout, LayoutError> {
        if source_w == 0 || source_h == 0 {
            return Err(LayoutError::InvalidSourceDimension);
        }
        if self.canvas.is_empty() {
            return Err(LayoutError::InvalidTargetDimension);
        }
        let fit = fit_with(
            self.policy,
            self.placement,
            source_w as f64,
            source_h as f64,
            self.canvas.width as f64,
            self.canvas.height as f64,
        )?;
        Ok(Layout {
            source: Size::new(source_w, source_h),
            canvas: self.canvas,
            policy: self.policy,
            placement: self.placement,
            fit,
            canvas_color: self.canvas_color,
        })
    }
}

/// Computed placement of one source inside one canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Original source dimensions.
    pub source: Size,
    /// Canvas (bounding box) dimensions.
    pub canvas: Size,
    /// Policy the fit was computed with.
    pub policy: FitPolicy,
    /// Placement rule the offsets were computed with.
    pub placement: Placement,
    /// Exact floating-point placement.
    pub fit: FitResult,
    /// Canvas background color.
    pub canvas_color: CanvasColor,
}

impl Layout {
    /// Integer dimensions to resample the source to.
    ///
    /// Uniform fits use snap-aware rounding so the limiting axis matches the
    /// canvas exactly and the free axis never loses a pixel to cascading
    /// rounding (1200×400 into 100×33 gives 100×33, not 99×33).
    pub fn resize_to(&self) -> Size {
        match self.policy {
            FitPolicy::Uniform => {
                let (w, h) = fit_inside(
                    self.source.width,
                    self.source.height,
                    self.canvas.width,
                    self.canvas.height,
                );
                Size::new(w, h)
            }
            FitPolicy::AxisPriority | FitPolicy::Distort => Size::new(
                round_dimension(self.fit.width),
                round_dimension(self.fit.height),
            ),
        }
    }

    /// Integer rectangle for drawing the resized source onto the canvas.
    pub fn pixel_rect(&self) -> PixelRect {
        let resized = self.resize_to();
        let x = pixel_offset(self.canvas.width, resized.width, self.fit.x);
        let y = pixel_offset(self.canvas.height, resized.height, self.fit.y);
        PixelRect {
            x,
            y,
            width: resized.width,
            height: resized.height,
        }
    }

    /// Whether resampling is needed (dimensions change).
    pub fn needs_resize(&self) -> bool {
        self.resize_to() != self.source
    }

    /// Whether padding is visible (image smaller than the canvas).
    pub fn needs_padding(&self) -> bool {
        self.resize_to() != self.canvas
    }
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Source width or height is zero, negative, or not finite.
    InvalidSourceDimension,
    /// Box width or height is zero, negative, or not finite.
    InvalidTargetDimension,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSourceDimension => {
                f.write_str("source dimensions must be positive and finite")
            }
            Self::InvalidTargetDimension => f.write_str("box dimensions must be positive and finite"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

/// Uniform scale-to-fit with centered placement.
///
/// ```
/// let r = cubefit::fit(800.0, 600.0, 400.0, 300.0).unwrap();
/// assert_eq!((r.width, r.height, r.x, r.y), (400.0, 300.0, 0.0, 0.0));
/// ```
pub fn fit(
    source_w: f64,
    source_h: f64,
    box_w: f64,
    box_h: f64,
) -> Result<FitResult, LayoutError> {
    fit_with(
        FitPolicy::Uniform,
        Placement::Center,
        source_w,
        source_h,
        box_w,
        box_h,
    )
}

/// Fit with an explicit policy and placement rule.
pub fn fit_with(
    policy: FitPolicy,
    placement: Placement,
    source_w: f64,
    source_h: f64,
    box_w: f64,
    box_h: f64,
) -> Result<FitResult, LayoutError> {
    if !is_valid_dimension(source_w) || !is_valid_dimension(source_h) {
        return Err(LayoutError::InvalidSourceDimension);
    }
    if !is_valid_dimension(box_w) || !is_valid_dimension(box_h) {
        return Err(LayoutError::InvalidTargetDimension);
    }

    let (width, height) = match policy {
        FitPolicy::Uniform => {
            let ratio_w = box_w / source_w;
            let ratio_h = box_h / source_h;
            if ratio_w <= ratio_h {
                // Width constrains; pin it so the box edge is exact.
                (box_w, source_h * ratio_w)
            } else {
                (source_w * ratio_h, box_h)
            }
        }
        FitPolicy::AxisPriority => {
            if source_w > source_h {
                if source_w > box_w {
                    (box_w, source_h * (box_w / source_w))
                } else {
                    (source_w, source_h)
                }
            } else if source_h > box_h {
                (source_w * (box_h / source_h), box_h)
            } else {
                (source_w, source_h)
            }
        }
        FitPolicy::Distort => (box_w, box_h),
    };

    let (x, y) = match placement {
        Placement::Center => ((box_w - width) / 2.0, (box_h - height) / 2.0),
        Placement::SideMargins => {
            let x = if width == box_w {
                0.0
            } else {
                (box_w - width) / 2.0
            };
            let y = if height == box_h {
                0.0
            } else {
                (box_h - height) / 2.0
            };
            (x, y)
        }
    };

    Ok(FitResult {
        width,
        height,
        x,
        y,
    })
}

fn is_valid_dimension(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn round_dimension(v: f64) -> u32 {
    let r = v.round();
    if r < 1.0 { 1 } else { r as u32 }
}

/// Integer offset for a resized image on a canvas.
///
/// Smaller images are centered by splitting the integer free space, so the
/// two bars differ by at most one pixel (the odd pixel goes after the image).
/// Oversized images keep their rounded, negative offset.
fn pixel_offset(canvas: u32, resized: u32, exact: f64) -> i64 {
    if resized <= canvas {
        ((canvas - resized) / 2) as i64
    } else {
        exact.round() as i64
    }
}

// ── Snap-aware integer fitting ──────────────────────────────────────────

/// Integer size inside `box_w`×`box_h` with the source aspect ratio. The
/// constraining axis equals the box; the other never exceeds it.
fn fit_inside(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    let aspect = src_w as f64 / src_h as f64;
    if box_w as f64 / src_w as f64 <= box_h as f64 / src_h as f64 {
        let exact = box_w as f64 / aspect;
        let slack = height_rounding_loss(aspect, src_w, src_h, box_h);
        (box_w, snap(exact, src_h, box_h, slack).min(box_h))
    } else {
        let exact = aspect * box_h as f64;
        let slack = width_rounding_loss(aspect, src_w, src_h, box_w);
        (snap(exact, src_w, box_w, slack).min(box_w), box_h)
    }
}

/// Round `exact`, preferring the source or box dimension when either lies
/// within `slack` of it. Never returns zero.
fn snap(exact: f64, source: u32, target: u32, slack: f64) -> u32 {
    let to_source = (exact - source as f64).abs();
    let to_target = (exact - target as f64).abs();
    let v = if to_source <= slack && to_source <= to_target {
        source
    } else if to_target <= slack {
        target
    } else {
        exact.round() as u32
    };
    v.max(1)
}

/// Drift of the box height after a round trip through a rounded width.
fn height_rounding_loss(aspect: f64, src_w: u32, src_h: u32, box_h: u32) -> f64 {
    let width = (src_w as f64 * (box_h as f64 / src_h as f64)).round();
    (box_h as f64 - width / aspect).abs()
}

/// Drift of the box width after a round trip through a rounded height.
fn width_rounding_loss(aspect: f64, src_w: u32, src_h: u32, box_w: u32) -> f64 {
    let height = (src_h as f64 * (box_w as f64 / src_w as f64)).round();
    (box_w as f64 - height * aspect).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // ── Uniform ─────────────────────────────────────────────────────────

    #[test]
    fn uniform_same_aspect_downscale() {
        let r = fit(800.0, 600.0, 400.0, 300.0).unwrap();
        assert_eq!(
            r,
            FitResult {
                width: 400.0,
                height: 300.0,
                x: 0.0,
                y: 0.0
            }
        );
    }

    #[test]
    fn uniform_square_into_landscape() {
        let r = fit(600.0, 600.0, 400.0, 300.0).unwrap();
        assert_eq!((r.width, r.height, r.x, r.y), (300.0, 300.0, 50.0, 0.0));
    }

    #[test]
    fn uniform_tall_into_narrow() {
        let r = fit(100.0, 400.0, 200.0, 300.0).unwrap();
        assert_eq!((r.width, r.height), (75.0, 300.0));
        assert_eq!((r.x, r.y), (62.5, 0.0));
    }

    #[test]
    fn uniform_upscales_small_source() {
        // 40×30 into 400×200 → height constrains at 200/30
        let r = fit(40.0, 30.0, 400.0, 200.0).unwrap();
        assert_eq!(r.height, 200.0);
        assert!((r.width - 266.666_666_666).abs() < 1e-6);
        assert!(r.fits_within(400.0, 200.0, EPS));
    }

    #[test]
    fn uniform_wide_into_flat() {
        // 1000×200 (5:1) into 400×200 → width constrains → 400×80
        let r = fit(1000.0, 200.0, 400.0, 200.0).unwrap();
        assert_eq!((r.width, r.height, r.x, r.y), (400.0, 80.0, 0.0, 60.0));
    }

    // ── AxisPriority ────────────────────────────────────────────────────

    #[test]
    fn axis_priority_never_upscales() {
        let r = fit_with(
            FitPolicy::AxisPriority,
            Placement::Center,
            100.0,
            50.0,
            400.0,
            300.0,
        )
        .unwrap();
        assert_eq!((r.width, r.height, r.x, r.y), (100.0, 50.0, 150.0, 125.0));
    }

    #[test]
    fn axis_priority_can_overflow_box() {
        // Landscape source only checks width; height stays 390 > 300.
        let r = fit_with(
            FitPolicy::AxisPriority,
            Placement::Center,
            400.0,
            390.0,
            400.0,
            300.0,
        )
        .unwrap();
        assert_eq!(r.height, 390.0);
        assert_eq!(r.y, -45.0);
        assert!(!r.fits_within(400.0, 300.0, EPS));
    }

    #[test]
    fn axis_priority_portrait_shrinks_to_height() {
        let r = fit_with(
            FitPolicy::AxisPriority,
            Placement::Center,
            300.0,
            600.0,
            400.0,
            300.0,
        )
        .unwrap();
        assert_eq!((r.width, r.height, r.x, r.y), (150.0, 300.0, 125.0, 0.0));
    }

    // ── Distort ─────────────────────────────────────────────────────────

    #[test]
    fn distort_ignores_aspect() {
        let r = fit_with(
            FitPolicy::Distort,
            Placement::Center,
            1000.0,
            10.0,
            400.0,
            300.0,
        )
        .unwrap();
        assert_eq!((r.width, r.height, r.x, r.y), (400.0, 300.0, 0.0, 0.0));
    }

    // ── SideMargins ─────────────────────────────────────────────────────

    #[test]
    fn side_margins_pins_filled_axis() {
        let r = fit_with(
            FitPolicy::Uniform,
            Placement::SideMargins,
            100.0,
            400.0,
            200.0,
            300.0,
        )
        .unwrap();
        assert_eq!(r.y, 0.0);
        assert_eq!(r.x, 62.5);
    }

    #[test]
    fn side_margins_matches_center_for_uniform() {
        for (sw, sh) in [(640.0, 480.0), (33.0, 1000.0), (1.0, 1.0), (1920.0, 1080.0)] {
            let c = fit_with(FitPolicy::Uniform, Placement::Center, sw, sh, 200.0, 300.0).unwrap();
            let s = fit_with(
                FitPolicy::Uniform,
                Placement::SideMargins,
                sw,
                sh,
                200.0,
                300.0,
            )
            .unwrap();
            assert!((c.x - s.x).abs() < EPS, "{sw}x{sh}");
            assert!((c.y - s.y).abs() < EPS, "{sw}x{sh}");
        }
    }

    // ── Error cases ─────────────────────────────────────────────────────

    #[test]
    fn zero_source_errors() {
        assert_eq!(
            fit(0.0, 100.0, 400.0, 300.0),
            Err(LayoutError::InvalidSourceDimension)
        );
    }

    #[test]
    fn negative_box_errors() {
        assert_eq!(
            fit(100.0, 100.0, -400.0, 300.0),
            Err(LayoutError::InvalidTargetDimension)
        );
    }

    #[test]
    fn non_finite_errors() {
        assert_eq!(
            fit(f64::NAN, 100.0, 400.0, 300.0),
            Err(LayoutError::InvalidSourceDimension)
        );
        assert_eq!(
            fit(100.0, 100.0, 400.0, f64::INFINITY),
            Err(LayoutError::InvalidTargetDimension)
        );
    }

    #[test]
    fn constraint_zero_canvas_errors() {
        assert_eq!(
            Constraint::new(0, 300).compute(100, 100),
            Err(LayoutError::InvalidTargetDimension)
        );
    }

    // ── fit_inside (snap rounding) ──────────────────────────────────────

    #[test]
    fn fit_inside_landscape_into_landscape() {
        assert_eq!(fit_inside(1000, 500, 400, 300), (400, 200));
    }

    #[test]
    fn fit_inside_portrait_into_landscape() {
        assert_eq!(fit_inside(500, 1000, 400, 300), (150, 300));
    }

    #[test]
    fn fit_inside_snap_rounding() {
        // Unsnapped, 33 * 3 rounds to a 99px width.
        assert_eq!(fit_inside(1200, 400, 100, 33), (100, 33));
    }

    #[test]
    fn fit_inside_never_zero() {
        assert_eq!(fit_inside(10_000, 1, 200, 300), (200, 1));
    }

    // ── Layout helpers ──────────────────────────────────────────────────

    #[test]
    fn pixel_rect_centers_narrow_face() {
        let l = Constraint::new(200, 300)
            .placement(Placement::SideMargins)
            .compute(100, 400)
            .unwrap();
        assert_eq!(
            l.pixel_rect(),
            PixelRect {
                x: 62,
                y: 0,
                width: 75,
                height: 300
            }
        );
    }

    #[test]
    fn pixel_rect_bars_split_integer_space() {
        // 1×7 on a front face: 43px wide, 357px of bars.
        let l = Constraint::new(400, 300).compute(1, 7).unwrap();
        let r = l.pixel_rect();
        assert_eq!(r.width, 43);
        let left = r.x;
        let right = 400 - r.x - r.width as i64;
        assert_eq!((left, right), (178, 179));
        assert_eq!(r.y, 0);
    }

    #[test]
    fn pixel_rect_keeps_negative_overflow() {
        let l = Constraint::new(400, 300)
            .policy(FitPolicy::AxisPriority)
            .compute(400, 390)
            .unwrap();
        let r = l.pixel_rect();
        assert_eq!(r.height, 390);
        assert_eq!(r.y, -45);
    }

    #[test]
    fn needs_padding_false_when_aspect_matches() {
        let l = Constraint::new(400, 300).compute(800, 600).unwrap();
        assert!(!l.needs_padding());
        assert!(l.needs_resize());
    }

    #[test]
    fn needs_resize_false_for_identity() {
        let l = Constraint::new(400, 300).compute(400, 300).unwrap();
        assert!(!l.needs_resize());
    }

    #[test]
    fn canvas_color_rgba() {
        assert_eq!(CanvasColor::white().to_rgba(), [255, 255, 255, 255]);
        assert_eq!(CanvasColor::black().to_rgba(), [0, 0, 0, 255]);
        assert_eq!(CanvasColor::Transparent.to_rgba(), [0, 0, 0, 0]);
    }
}
