use crate::assets::color::Color;
use crate::foundation::core::{BezPath, Canvas};
use crate::foundation::error::MorphResult;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// A 2D drawing surface.
///
/// One frame is `clear`, any number of `fill_path`/`stroke_path` calls, then `present`.
/// Nothing drawn before the last `clear` survives it.
pub trait DrawSurface {
    /// Create a surface sized for `canvas`, cleared to `background`.
    fn for_canvas(canvas: Canvas, background: Color) -> MorphResult<Self>
    where
        Self: Sized;

    fn canvas(&self) -> Canvas;

    fn clear(&mut self);

    fn fill_path(&mut self, path: &BezPath, color: Color) -> MorphResult<()>;

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) -> MorphResult<()>;

    /// Commit everything drawn since the last `clear` to the visible output.
    fn present(&mut self) -> MorphResult<()>;
}
