//! SVG diagram of a cube layout.
//!
//! One panel per face, grouped by aspect class in rows of two, in the order
//! the faces fill: Front/Back, Top/Bottom, Left/Right. Each panel shows the
//! face's bounding box, the placed image rectangle, and the fit numbers.
//!
//! # Example
//!
//! ```
//! use cubefit::{CubeLayout, DrawingSurface, Layout, Size, svg::render_cube_svg};
//!
//! struct Geometry;
//!
//! impl DrawingSurface<Size> for Geometry {
//!     type Output = ();
//!     type Error = core::convert::Infallible;
//!
//!     fn compose(&mut self, _layout: &Layout, _source: &Size) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! let mut cube = CubeLayout::new();
//! cube.assign(Size::new(1600, 900), &mut Geometry).unwrap();
//!
//! let svg = render_cube_svg(&cube);
//! assert!(svg.contains("Front  400×300"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::constraint::{FitResult, Size};
use crate::face::{FACE_COUNT, Face};
use crate::layout::CubeLayout;

/// Panel scale relative to face pixels.
const PANEL_SCALE: f64 = 0.5;
/// Widest face box, in pixels.
const MAX_FACE_W: f64 = 400.0;
/// Tallest face box, in pixels.
const MAX_FACE_H: f64 = 300.0;
/// Gap between panels, both axes.
const PANEL_GAP: f64 = 40.0;
const MARGIN: f64 = 30.0;
/// Label line above each panel.
const LABEL_H: f64 = 22.0;
/// Height of annotation text area below each panel.
const ANNOTATION_H: f64 = 20.0;

/// What one panel draws.
struct Panel {
    label: String,
    outer: Size,
    /// Placed image; `None` for an empty face.
    inner: Option<FitResult>,
    annotation: String,
}

/// Render a complete SVG document showing all six faces.
pub fn render_cube_svg<S, R>(layout: &CubeLayout<S, R>) -> String {
    let panels = build_panels(layout);
    render_panels(&panels)
}

fn build_panels<S, R>(layout: &CubeLayout<S, R>) -> [Panel; FACE_COUNT] {
    Face::ALL.map(|face| {
        let slot = layout.slot(face);
        let outer = face.bounding_box();
        let (inner, annotation) = match slot.content() {
            Some(content) => {
                let fit = content.layout.fit;
                (
                    Some(fit),
                    format!(
                        "{}×{} → {:.1}×{:.1} at ({:.1}, {:.1})",
                        content.layout.source.width,
                        content.layout.source.height,
                        fit.width,
                        fit.height,
                        fit.x,
                        fit.y
                    ),
                )
            }
            None => (None, String::from("empty")),
        };
        Panel {
            label: format!("{}  {}×{}", face.label(), outer.width, outer.height),
            outer,
            inner,
            annotation,
        }
    })
}

fn render_panels(panels: &[Panel; FACE_COUNT]) -> String {
    let cell_w = MAX_FACE_W * PANEL_SCALE;
    let cell_h = LABEL_H + MAX_FACE_H * PANEL_SCALE + ANNOTATION_H;
    let rows = FACE_COUNT / 2;
    let total_w = 2.0 * MARGIN + 2.0 * cell_w + PANEL_GAP;
    let total_h = 2.0 * MARGIN + rows as f64 * cell_h + (rows - 1) as f64 * PANEL_GAP;

    let mut out = String::new();

    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    out.push('\n');

    out.push_str(
        r##"<style>
  text { font-family: ui-monospace, "DejaVu Sans Mono", monospace; }
  .face-label { font-size: 12px; font-weight: 600; fill: #222; }
  .fit-note { font-size: 10px; fill: #555; }
  .face { fill: #fff; stroke: #888; stroke-width: 1; }
  .vacant { fill: #f4f4f4; stroke: #aaa; stroke-width: 1; stroke-dasharray: 4,3; }
  .placed { fill: #8fbf7f; fill-opacity: 0.85; stroke: #4d7f3d; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .face-label { fill: #ddd; }
    .fit-note { fill: #999; }
    .face { fill: #262626; stroke: #666; }
    .vacant { fill: #1c1c1c; stroke: #555; }
    .placed { fill: #5f8f4f; stroke: #9fcf8f; }
  }
</style>
"##,
    );

    for (i, panel) in panels.iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let cell_x = MARGIN + col * (cell_w + PANEL_GAP);
        let cell_y = MARGIN + row * (cell_h + PANEL_GAP);
        let center_x = cell_x + cell_w / 2.0;

        out.push_str(&format!(
            r#"<text x="{}" y="{}" class="face-label" text-anchor="middle">{}</text>"#,
            center_x,
            cell_y + 14.0,
            escape_xml(&panel.label)
        ));
        out.push('\n');

        let pw = panel.outer.width as f64 * PANEL_SCALE;
        let ph = panel.outer.height as f64 * PANEL_SCALE;
        let panel_x = center_x - pw / 2.0;
        let panel_y = cell_y + LABEL_H;

        let class = if panel.inner.is_some() { "face" } else { "vacant" };
        out.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}"/>"#,
            panel_x, panel_y, pw, ph, class
        ));
        out.push('\n');

        if let Some(fit) = &panel.inner {
            out.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="placed"/>"#,
                panel_x + fit.x * PANEL_SCALE,
                panel_y + fit.y * PANEL_SCALE,
                fit.width * PANEL_SCALE,
                fit.height * PANEL_SCALE
            ));
            out.push('\n');
        }

        out.push_str(&format!(
            r#"<text x="{}" y="{:.1}" class="fit-note" text-anchor="middle">{}</text>"#,
            center_x,
            panel_y + ph + 14.0,
            escape_xml(&panel.annotation)
        ));
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
