use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

use anyhow::Context;
use kurbo::{Arc, Circle, Ellipse, Line, Rect, Shape};
use usvg::roxmltree;

use crate::foundation::core::{BezPath, Canvas, PointSequence};
use crate::foundation::error::{MorphError, MorphResult};
use crate::geometry::outline::PathOutline;
use crate::geometry::sampler::sample_path;

/// Named path boundaries and canvases a morph can refer to by id.
#[derive(Clone, Debug, Default)]
pub struct Document {
    paths: BTreeMap<String, PathOutline>,
    canvases: BTreeMap<String, Canvas>,
    viewport: Option<Canvas>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every identified `<path>` and basic shape element of an SVG document.
    ///
    /// Lookup works like `getElementById`: elements are found wherever they sit in the markup,
    /// including `<defs>` and hidden subtrees. Geometry stays in the element's own user space
    /// (ancestor transforms are not applied), the same space a path length query reports in.
    /// When an id repeats, the first element in document order wins.
    pub fn from_svg_data(bytes: &[u8]) -> MorphResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MorphError::geometry(format!("svg is not valid utf-8: {e}")))?;
        let xml = roxmltree::Document::parse_with_options(
            text,
            roxmltree::ParsingOptions {
                allow_dtd: true,
                ..Default::default()
            },
        )
        .map_err(|e| MorphError::geometry(format!("parse svg xml: {e}")))?;

        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_xmltree(&xml, &opts)
            .map_err(|e| MorphError::geometry(format!("parse svg tree: {e}")))?;

        let mut doc = Self::new();
        collect_elements(&xml, &mut doc.paths);

        let size = tree.size();
        doc.viewport = Canvas::new(
            size.width().ceil() as u32,
            size.height().ceil() as u32,
        )
        .ok();

        tracing::debug!(
            paths = doc.paths.len(),
            viewport = ?doc.viewport,
            "loaded svg document"
        );
        Ok(doc)
    }

    pub fn from_svg_file(path: &Path) -> MorphResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::from_svg_data(&bytes)
    }

    /// Register SVG path data (`d` attribute syntax) under `id`.
    pub fn insert_path_data(&mut self, id: impl Into<String>, d: &str) -> MorphResult<()> {
        let id = id.into();
        let outline = PathOutline::from_svg_path_data(d)
            .map_err(|e| MorphError::geometry(format!("path '{id}': {e}")))?;
        self.paths.insert(id, outline);
        Ok(())
    }

    pub fn insert_canvas(&mut self, id: impl Into<String>, canvas: Canvas) {
        self.canvases.insert(id.into(), canvas);
    }

    pub fn with_canvas(mut self, id: impl Into<String>, canvas: Canvas) -> Self {
        self.insert_canvas(id, canvas);
        self
    }

    pub fn path(&self, id: &str) -> MorphResult<&PathOutline> {
        self.paths
            .get(id)
            .ok_or_else(|| MorphError::geometry(format!("no path with id '{id}'")))
    }

    pub fn canvas(&self, id: &str) -> MorphResult<Canvas> {
        self.canvases
            .get(id)
            .copied()
            .ok_or_else(|| MorphError::configuration(format!("no canvas with id '{id}'")))
    }

    /// Size of the SVG viewport this document was loaded from, if any.
    pub fn viewport(&self) -> Option<Canvas> {
        self.viewport
    }

    pub fn path_ids(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Sample the path `id` into `steps` points evenly spaced by arc length.
    pub fn sample(&self, id: &str, steps: usize) -> MorphResult<PointSequence> {
        let outline = self.path(id)?;
        sample_path(outline, steps).map_err(|e| match e {
            MorphError::Geometry(msg) => MorphError::geometry(format!("path '{id}': {msg}")),
            other => other,
        })
    }
}

fn collect_elements(xml: &roxmltree::Document<'_>, out: &mut BTreeMap<String, PathOutline>) {
    for node in xml.descendants().filter(|n| n.is_element()) {
        let Some(id) = node.attribute("id").filter(|id| !id.is_empty()) else {
            continue;
        };
        if out.contains_key(id) {
            continue;
        }
        match element_path(node) {
            Some(Ok(path)) => {
                out.insert(id.to_owned(), PathOutline::new(path));
            }
            Some(Err(err)) => {
                tracing::warn!(id, element = node.tag_name().name(), "skipping element: {err}");
            }
            None => {}
        }
    }
}

/// Outline of a path or basic shape element; `None` for any other element.
fn element_path(node: roxmltree::Node<'_, '_>) -> Option<MorphResult<BezPath>> {
    let num = |name: &str| length_attr(node, name);
    let path = match node.tag_name().name() {
        "path" => {
            let d = node.attribute("d").unwrap_or_default();
            return Some(PathOutline::from_svg_path_data(d).map(|o| o.path().clone()));
        }
        "rect" => rect_path(
            num("x"),
            num("y"),
            num("width"),
            num("height"),
            node.attribute("rx").and_then(parse_length),
            node.attribute("ry").and_then(parse_length),
        ),
        "circle" => {
            let r = num("r");
            if r <= 0.0 {
                BezPath::new()
            } else {
                Circle::new((num("cx"), num("cy")), r).to_path(SHAPE_TOLERANCE)
            }
        }
        "ellipse" => {
            let (rx, ry) = (num("rx"), num("ry"));
            if rx <= 0.0 || ry <= 0.0 {
                BezPath::new()
            } else {
                Ellipse::new((num("cx"), num("cy")), (rx, ry), 0.0).to_path(SHAPE_TOLERANCE)
            }
        }
        "line" => {
            Line::new((num("x1"), num("y1")), (num("x2"), num("y2"))).to_path(SHAPE_TOLERANCE)
        }
        "polyline" | "polygon" => {
            let closed = node.tag_name().name() == "polygon";
            poly_path(node.attribute("points").unwrap_or_default(), closed)
        }
        _ => return None,
    };
    Some(Ok(path))
}

const SHAPE_TOLERANCE: f64 = 1e-4;

fn length_attr(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name).and_then(parse_length).unwrap_or(0.0)
}

/// Plain user-unit lengths (`12`, `12.5px`); anything else is treated as absent.
fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rectangle outline starting at the end of the top-left corner, drawn clockwise.
fn rect_path(x: f64, y: f64, w: f64, h: f64, rx: Option<f64>, ry: Option<f64>) -> BezPath {
    if w <= 0.0 || h <= 0.0 {
        return BezPath::new();
    }
    // A single given radius applies to both axes.
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.clamp(0.0, w / 2.0);
    let ry = ry.clamp(0.0, h / 2.0);
    if rx == 0.0 || ry == 0.0 {
        return Rect::new(x, y, x + w, y + h).to_path(SHAPE_TOLERANCE);
    }

    let mut p = BezPath::new();
    let corner = |p: &mut BezPath, cx: f64, cy: f64, start: f64| {
        Arc::new((cx, cy), (rx, ry), start, FRAC_PI_2, 0.0)
            .to_cubic_beziers(SHAPE_TOLERANCE, |p1, p2, p3| p.curve_to(p1, p2, p3));
    };
    p.move_to((x + rx, y));
    p.line_to((x + w - rx, y));
    corner(&mut p, x + w - rx, y + ry, -FRAC_PI_2);
    p.line_to((x + w, y + h - ry));
    corner(&mut p, x + w - rx, y + h - ry, 0.0);
    p.line_to((x + rx, y + h));
    corner(&mut p, x + rx, y + h - ry, FRAC_PI_2);
    p.line_to((x, y + ry));
    corner(&mut p, x + rx, y + ry, PI);
    p.close_path();
    p
}

fn poly_path(points: &str, closed: bool) -> BezPath {
    let coords: Vec<f64> = points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map_while(|t| t.parse::<f64>().ok())
        .collect();

    let mut p = BezPath::new();
    for (i, xy) in coords.chunks_exact(2).enumerate() {
        if i == 0 {
            p.move_to((xy[0], xy[1]));
        } else {
            p.line_to((xy[0], xy[1]));
        }
    }
    if closed && !p.elements().is_empty() {
        p.close_path();
    }
    p
}
