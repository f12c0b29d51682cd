use kurbo::PathEl;

use crate::assets::color::Color;
use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::MorphResult;
use crate::render::surface::DrawSurface;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, width: f64, color: Color },
    Present,
}

impl DrawCall {
    pub fn path(&self) -> Option<&BezPath> {
        match self {
            Self::Fill { path, .. } | Self::Stroke { path, .. } => Some(path),
            Self::Clear | Self::Present => None,
        }
    }
}

/// Surface that records draw calls instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls since (and including) the most recent `Clear`.
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear))
            .unwrap_or(0);
        &self.calls[start..]
    }

    /// Number of presented frames.
    pub fn presented(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Present))
            .count()
    }

    /// Vertices of the last drawn polyline, in drawing order after the initial move.
    pub fn last_polyline(&self) -> Option<Vec<Point>> {
        let path = self.calls.iter().rev().find_map(DrawCall::path)?;
        Some(polyline_vertices(path))
    }
}

impl DrawSurface for RecordingSurface {
    fn for_canvas(canvas: Canvas, _background: Color) -> MorphResult<Self> {
        Ok(Self::new(canvas))
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> MorphResult<()> {
        self.calls.push(DrawCall::Fill {
            path: path.clone(),
            color,
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) -> MorphResult<()> {
        self.calls.push(DrawCall::Stroke {
            path: path.clone(),
            width,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> MorphResult<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}

/// Line-to targets of a polyline path; the leading move-to and close are skipped.
pub fn polyline_vertices(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect()
}
