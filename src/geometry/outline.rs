use kurbo::{ParamCurve, ParamCurveArclen, PathSeg, Shape};

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{MorphError, MorphResult};

/// Arc-length accuracy used for every length query on an outline.
pub const ARCLEN_ACCURACY: f64 = 1e-6;

/// A vector outline exposing arc-length queries.
pub trait PathGeometry {
    /// Total drawn length. Move-to gaps between subpaths do not count.
    fn total_length(&self) -> f64;

    /// Point at `distance` along the outline, clamped into `[0, total_length]`.
    ///
    /// Returns `None` when the outline has no drawable segments.
    fn point_at_length(&self, distance: f64) -> Option<Point>;
}

/// A [`BezPath`] with its segment lengths measured once up front.
#[derive(Clone, Debug)]
pub struct PathOutline {
    path: BezPath,
    segments: Vec<(PathSeg, f64)>,
    total_length: f64,
}

impl PathOutline {
    pub fn new(path: BezPath) -> Self {
        let segments: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
            .collect();
        let total_length = segments.iter().map(|(_, len)| len).sum();
        Self {
            path,
            segments,
            total_length,
        }
    }

    /// Parse SVG path data (the `d` attribute).
    pub fn from_svg_path_data(d: &str) -> MorphResult<Self> {
        let path = BezPath::from_svg(d.trim())
            .map_err(|e| MorphError::geometry(format!("invalid svg path data: {e}")))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn bounding_box(&self) -> kurbo::Rect {
        self.path.bounding_box()
    }
}

impl PathGeometry for PathOutline {
    fn total_length(&self) -> f64 {
        self.total_length
    }

    fn point_at_length(&self, distance: f64) -> Option<Point> {
        let (last_seg, _) = self.segments.last()?;
        let mut remaining = distance.clamp(0.0, self.total_length);
        for (seg, len) in &self.segments {
            // Zero-length segments cannot be inverted.
            if *len <= 0.0 {
                continue;
            }
            if remaining <= *len {
                let t = seg.inv_arclen(remaining, ARCLEN_ACCURACY);
                return Some(seg.eval(t));
            }
            remaining -= len;
        }
        Some(last_seg.end())
    }
}
