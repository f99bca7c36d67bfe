//! SVG document assembly.
//!
//! Three documents come out of one run:
//! - a layered drawing (stroked outline + detail layers, tagged so
//!   Inkscape shows them as editable layers),
//! - a standalone filled silhouette (solid fills import cleanly into
//!   OpenSCAD),
//! - a standalone compound detail path with even-odd filling, so
//!   nested contours keep their holes.

use std::path::Path;

use svg::node::element::{Group, Path as SvgPath};
use svg::Document;

use crate::error::PipelineError;
use crate::geom::Polygon;

const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Path data for one closed ring: `M x,y L x,y ... Z`, two decimals.
/// Empty rings produce no data.
pub fn path_data(polygon: &Polygon) -> Option<String> {
    let mut pts = polygon.points.iter();
    let first = pts.next()?;
    let mut d = format!("M {:.2},{:.2}", first.x, first.y);
    for p in pts {
        d.push_str(&format!(" L {:.2},{:.2}", p.x, p.y));
    }
    d.push_str(" Z");
    Some(d)
}

/// One `d` string with a subpath per ring. Under even-odd filling the
/// nesting parity decides what is solid and what is a hole.
pub fn compound_path_data(polygons: &[Polygon]) -> Option<String> {
    let parts: Vec<String> = polygons.iter().filter_map(path_data).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn base_document(width: u32, height: u32) -> Document {
    Document::new()
        .set("width", format!("{width}px"))
        .set("height", format!("{height}px"))
        .set("viewBox", (0, 0, width, height))
}

fn stroked(d: String) -> SvgPath {
    SvgPath::new()
        .set("d", d)
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", 1)
}

fn layer(id: &str, polygons: &[Polygon]) -> Group {
    let mut group = Group::new()
        .set("id", id)
        .set("inkscape:groupmode", "layer")
        .set("inkscape:label", id);
    for d in polygons.iter().filter_map(path_data) {
        group = group.add(stroked(d));
    }
    group
}

/// The layered drawing: an `outline` layer and a `detail` layer, both
/// stroked, for interactive cleanup in a vector editor.
pub fn layered_document(
    width: u32,
    height: u32,
    outline: &[Polygon],
    detail: &[Polygon],
) -> Document {
    base_document(width, height)
        .set("xmlns:inkscape", INKSCAPE_NS)
        .add(layer("outline", outline))
        .add(layer("detail", detail))
}

/// The silhouette alone, filled solid black with no stroke.
pub fn outline_document(width: u32, height: u32, outline: &[Polygon]) -> Document {
    let mut doc = base_document(width, height);
    for d in outline.iter().filter_map(path_data) {
        doc = doc.add(SvgPath::new().set("d", d).set("fill", "black").set("stroke", "none"));
    }
    doc
}

/// All detail contours as one compound path with `fill-rule="evenodd"`.
pub fn detail_document(width: u32, height: u32, detail: &[Polygon]) -> Document {
    let mut doc = base_document(width, height);
    if let Some(d) = compound_path_data(detail) {
        doc = doc.add(
            SvgPath::new()
                .set("d", d)
                .set("fill", "black")
                .set("stroke", "none")
                .set("fill-rule", "evenodd"),
        );
    }
    doc
}

pub fn save(path: &Path, document: &Document) -> Result<(), PipelineError> {
    svg::save(path, document)?;
    Ok(())
}
