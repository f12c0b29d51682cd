use crate::assets::color::Color;
use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::surface::{DrawSurface, FrameRGBA};

/// CPU raster surface backed by `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Color,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    dirty: bool,
}

impl CpuSurface {
    pub fn new(canvas: Canvas, background: Color) -> MorphResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MorphError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MorphError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(MorphError::render("surface size must be non-zero"));
        }

        let mut surface = Self {
            width,
            height,
            background,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            dirty: false,
        };
        surface.clear();
        surface.present()?;
        Ok(surface)
    }

    /// Copy of the presented pixels (premultiplied RGBA8).
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Premultiplied RGBA8 of one presented pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let idx = ((y as usize) * usize::from(self.width) + (x as usize)) * 4;
        let data = self.pixmap.data_as_u8_slice();
        Some([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
    }

    fn set_paint(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }
}

impl DrawSurface for CpuSurface {
    fn for_canvas(canvas: Canvas, background: Color) -> MorphResult<Self> {
        Self::new(canvas, background)
    }

    fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn clear(&mut self) {
        self.ctx.reset();
        if self.background.a > 0.0 {
            self.set_paint(self.background);
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        self.dirty = true;
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> MorphResult<()> {
        self.set_paint(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.dirty = true;
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) -> MorphResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(MorphError::render(format!(
                "stroke width must be positive, got {width}"
            )));
        }
        self.set_paint(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
        self.dirty = true;
        Ok(())
    }

    fn present(&mut self) -> MorphResult<()> {
        if !self.dirty {
            return Ok(());
        }
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.dirty = false;
        Ok(())
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((x0, y0));
        p.line_to((x1, y0));
        p.line_to((x1, y1));
        p.line_to((x0, y1));
        p.close_path();
        p
    }

    #[test]
    fn new_surface_is_cleared_to_background() {
        let s = CpuSurface::new(Canvas::new(4, 4).unwrap(), Color::rgba(1.0, 0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn fill_covers_interior_only() {
        let mut s = CpuSurface::new(Canvas::new(16, 16).unwrap(), Color::transparent()).unwrap();
        s.clear();
        s.fill_path(&rect_path(4.0, 4.0, 12.0, 12.0), Color::default())
            .unwrap();
        s.present().unwrap();
        assert_eq!(s.pixel(8, 8), Some([0, 0, 0, 255]));
        assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn clear_discards_previous_frame() {
        let mut s = CpuSurface::new(Canvas::new(16, 16).unwrap(), Color::transparent()).unwrap();
        s.clear();
        s.fill_path(&rect_path(0.0, 0.0, 16.0, 16.0), Color::default())
            .unwrap();
        s.present().unwrap();
        assert_eq!(s.pixel(8, 8), Some([0, 0, 0, 255]));

        s.clear();
        s.present().unwrap();
        assert_eq!(s.pixel(8, 8), Some([0, 0, 0, 0]));
    }

    #[test]
    fn rejects_oversized_and_bad_stroke() {
        assert!(CpuSurface::new(
            Canvas {
                width: 70_000,
                height: 1
            },
            Color::transparent()
        )
        .is_err());

        let mut s = CpuSurface::new(Canvas::new(4, 4).unwrap(), Color::transparent()).unwrap();
        assert!(
            s.stroke_path(&rect_path(0.0, 0.0, 2.0, 2.0), 0.0, Color::default())
                .is_err()
        );
    }
}
