use egui::Pos2;
use image::Rgba;
use log::{trace, warn};
use tiny_skia::{Color, FillRule, Paint, Pixmap, Stroke, Transform};

use super::color::parse_color;
use super::path::CanvasPath;
use super::{LineCap, LineJoin, PixelBuffer, RasterSurface, demultiply};
use crate::error::{PaintError, PaintResult};

/// An in-memory RGBA surface with canvas-like drawing semantics, rendered
/// anti-aliased by tiny-skia.
pub struct PixelCanvas {
    pixmap: Pixmap,
    path: CanvasPath,
    stroke_color: Rgba<u8>,
    fill_color: Rgba<u8>,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    global_alpha: f32,
    /// Bumped on every pixel mutation
    revision: u64,
}

impl std::fmt::Debug for PixelCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("stroke_color", &self.stroke_color)
            .field("fill_color", &self.fill_color)
            .field("line_width", &self.line_width)
            .field("line_cap", &self.line_cap)
            .field("line_join", &self.line_join)
            .field("global_alpha", &self.global_alpha)
            .field("revision", &self.revision)
            .finish()
    }
}

impl PixelCanvas {
    /// Creates a transparent canvas with default attributes: black, 1px, butt caps, miter joins.
    pub fn new(width: u32, height: u32) -> PaintResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(PaintError::InvalidCanvasSize { width, height })?;
        Ok(Self {
            pixmap,
            path: CanvasPath::default(),
            stroke_color: Rgba([0, 0, 0, 255]),
            fill_color: Rgba([0, 0, 0, 255]),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            global_alpha: 1.0,
            revision: 0,
        })
    }

    /// Premultiplied RGBA8 pixels in row-major order
    pub fn premultiplied_data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// The straight-alpha color at `(x, y)`; transparent outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return Rgba([0, 0, 0, 0]);
        }
        let i = (y as usize * self.pixmap.width() as usize + x as usize) * 4;
        demultiply(&self.pixmap.data()[i..i + 4])
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stroke_color(&self) -> Rgba<u8> {
        self.stroke_color
    }

    pub fn fill_color(&self) -> Rgba<u8> {
        self.fill_color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// Erases every pixel back to transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.revision += 1;
    }

    /// Paint for `color` with the global alpha folded into its alpha channel.
    fn paint(&self, color: Rgba<u8>) -> Option<Paint<'static>> {
        let alpha = (color.0[3] as f32 * self.global_alpha).round().clamp(0.0, 255.0) as u8;
        if alpha == 0 {
            return None;
        }
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.0[0], color.0[1], color.0[2], alpha);
        paint.anti_alias = true;
        Some(paint)
    }
}

impl RasterSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn snapshot(&self) -> PixelBuffer {
        PixelBuffer::from_premultiplied(self.pixmap.width(), self.pixmap.height(), self.pixmap.data().to_vec())
    }

    fn restore(&mut self, buffer: &PixelBuffer) {
        let dst_stride = self.pixmap.width() as usize * 4;
        let src_stride = buffer.width() as usize * 4;
        let row = dst_stride.min(src_stride);
        let rows = self.pixmap.height().min(buffer.height()) as usize;

        let src = buffer.premultiplied();
        let dst = self.pixmap.data_mut();
        for y in 0..rows {
            dst[y * dst_stride..y * dst_stride + row].copy_from_slice(&src[y * src_stride..y * src_stride + row]);
        }
        self.revision += 1;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Pos2) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Pos2) {
        self.path.line_to(point);
    }

    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32) {
        if !radius.is_finite() || radius < 0.0 || !start_angle.is_finite() || !end_angle.is_finite() {
            warn!("Ignoring arc with radius {radius} from {start_angle} to {end_angle}");
            return;
        }
        self.path.arc(center, radius, start_angle, end_angle);
    }

    fn stroke(&mut self) {
        let (Some(path), Some(paint)) = (self.path.to_skia(), self.paint(self.stroke_color)) else {
            return;
        };
        let stroke = Stroke {
            width: self.line_width,
            line_cap: self.line_cap.into(),
            line_join: self.line_join.into(),
            ..Stroke::default()
        };
        trace!("stroke {:?} at width {}", path.bounds(), self.line_width);
        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        self.revision += 1;
    }

    fn fill(&mut self) {
        let (Some(path), Some(paint)) = (self.path.to_skia(), self.paint(self.fill_color)) else {
            return;
        };
        trace!("fill {:?}", path.bounds());
        self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        self.revision += 1;
    }

    fn set_stroke_color(&mut self, color: &str) {
        match parse_color(color) {
            Some(parsed) => self.stroke_color = parsed,
            None => warn!("Ignoring invalid stroke color {color:?}"),
        }
    }

    fn set_fill_color(&mut self, color: &str) {
        match parse_color(color) {
            Some(parsed) => self.fill_color = parsed,
            None => warn!("Ignoring invalid fill color {color:?}"),
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        } else {
            warn!("Ignoring invalid line width {width}");
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.line_join = join;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.global_alpha = alpha;
        } else {
            warn!("Ignoring global alpha {alpha} outside [0, 1]");
        }
    }
}
