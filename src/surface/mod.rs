//! The raster surface the drawing core paints on.
//!
//! `RasterSurface` is the contract the tool dispatcher consumes. It mirrors a
//! 2D canvas context: path building, stroke/fill, pixel snapshots, and a few
//! drawing attributes. Coordinates are surface-local pixels, origin top-left,
//! y growing downward.

use std::sync::Arc;

use egui::Pos2;
use image::Rgba;
use serde::{Deserialize, Serialize};
use tiny_skia::PremultipliedColorU8;

pub mod color;
mod path;
mod pixel_canvas;

pub use pixel_canvas::PixelCanvas;

/// How the ends of stroked segments are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// How consecutive segments of one stroked subpath meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        }
    }
}

/// A full copy of a surface's pixels, premultiplied RGBA8 in row-major order.
///
/// The pixels are shared, so cloning a buffer does not copy them.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// A fully transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_premultiplied(width, height, vec![0; width as usize * height as usize * 4])
    }

    pub(crate) fn from_premultiplied(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data: Arc::new(data),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn premultiplied(&self) -> &[u8] {
        &self.data
    }

    /// The straight-alpha color at `(x, y)`; transparent outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        if x >= self.width || y >= self.height {
            return Rgba([0, 0, 0, 0]);
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        demultiply(&self.data[i..i + 4])
    }
}

/// Converts one premultiplied RGBA8 pixel back to straight alpha.
pub(crate) fn demultiply(px: &[u8]) -> Rgba<u8> {
    match PremultipliedColorU8::from_rgba(px[0], px[1], px[2], px[3]) {
        Some(color) => {
            let c = color.demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        }
        None => Rgba([0, 0, 0, 0]),
    }
}

/// The primitive operations the drawing core needs from a raster target.
///
/// Attribute setters take effect for subsequent `stroke`/`fill` calls only.
/// Implementations silently ignore values they cannot use, keeping the
/// previous one, rather than reporting an error.
pub trait RasterSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Copies every pixel of the surface
    fn snapshot(&self) -> PixelBuffer;

    /// Writes a snapshot back at the origin, clipped to the surface
    fn restore(&mut self, buffer: &PixelBuffer);

    /// Discards the current path
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Pos2);
    fn line_to(&mut self, point: Pos2);

    /// Adds a clockwise arc from `start_angle` to `end_angle` (radians)
    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32);

    /// Paints the outline of the current path with the stroke attributes
    fn stroke(&mut self);

    /// Paints the interior of the current path with the fill color
    fn fill(&mut self);

    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_global_alpha(&mut self, alpha: f32);
}
