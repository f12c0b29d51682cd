use crate::assets::color::Color;
use crate::foundation::core::{BezPath, PointSequence};
use crate::foundation::error::MorphResult;
use crate::render::surface::DrawSurface;

/// How a point sequence is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintStyle {
    pub fill: bool,
    pub color: Color,
    pub stroke_width: f64,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            fill: false,
            color: Color::default(),
            stroke_width: 1.0,
        }
    }
}

/// Closed polyline through `points`: starts at the last point, visits each point in order, closes.
pub fn polyline_path(points: &PointSequence) -> BezPath {
    let mut path = BezPath::new();
    let Some(&end) = points.points().last() else {
        return path;
    };
    path.move_to(end);
    for &p in points {
        path.line_to(p);
    }
    path.close_path();
    path
}

/// Clear `surface` and paint `points` as one closed polyline.
pub fn render_points<S>(
    surface: &mut S,
    points: &PointSequence,
    style: &PaintStyle,
) -> MorphResult<()>
where
    S: DrawSurface + ?Sized,
{
    surface.clear();
    if !points.is_empty() {
        let path = polyline_path(points);
        if style.fill {
            surface.fill_path(&path, style.color)?;
        } else {
            surface.stroke_path(&path, style.stroke_width, style.color)?;
        }
    }
    surface.present()
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;
    use crate::foundation::core::{Canvas, Point};
    use crate::render::cpu::CpuSurface;
    use crate::render::recording::{DrawCall, RecordingSurface};

    fn triangle() -> PointSequence {
        PointSequence::from(&[(2.0, 2.0), (14.0, 2.0), (8.0, 14.0)][..])
    }

    #[test]
    fn path_starts_at_last_point_and_closes() {
        let path = polyline_path(&triangle());
        let els = path.elements();
        assert_eq!(els.len(), 5);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(8.0, 14.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(2.0, 2.0)));
        assert_eq!(els[3], PathEl::LineTo(Point::new(8.0, 14.0)));
        assert_eq!(els[4], PathEl::ClosePath);
    }

    #[test]
    fn stroke_mode_clears_then_strokes() {
        let mut s = RecordingSurface::new(Canvas::new(16, 16).unwrap());
        let style = PaintStyle {
            stroke_width: 2.5,
            ..PaintStyle::default()
        };
        render_points(&mut s, &triangle(), &style).unwrap();

        let frame = s.last_frame();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame[0], DrawCall::Clear);
        assert!(matches!(frame[1], DrawCall::Stroke { width, .. } if width == 2.5));
        assert_eq!(frame[2], DrawCall::Present);
        assert_eq!(s.last_polyline().unwrap(), triangle().into_inner());
    }

    #[test]
    fn fill_mode_fills() {
        let mut s = RecordingSurface::new(Canvas::new(16, 16).unwrap());
        let style = PaintStyle {
            fill: true,
            ..PaintStyle::default()
        };
        render_points(&mut s, &triangle(), &style).unwrap();
        assert!(matches!(s.last_frame()[1], DrawCall::Fill { .. }));
    }

    #[test]
    fn empty_sequence_only_clears() {
        let mut s = RecordingSurface::new(Canvas::new(16, 16).unwrap());
        render_points(&mut s, &PointSequence::default(), &PaintStyle::default()).unwrap();
        assert_eq!(s.calls(), &[DrawCall::Clear, DrawCall::Present]);
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let mut s = CpuSurface::new(Canvas::new(16, 16).unwrap(), Color::transparent()).unwrap();
        let style = PaintStyle {
            fill: true,
            ..PaintStyle::default()
        };
        render_points(&mut s, &triangle(), &style).unwrap();
        let first = s.snapshot();
        render_points(&mut s, &triangle(), &style).unwrap();
        assert_eq!(first, s.snapshot());
        assert_eq!(s.pixel(8, 6), Some([0, 0, 0, 255]));
    }
}
