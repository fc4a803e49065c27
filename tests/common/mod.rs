#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use canvas_paint::surface::{LineCap, LineJoin};
use canvas_paint::{DrawingState, PixelBuffer, RasterSurface, ToolDispatcher};
use egui::Pos2;

/// One call made on a `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Restore(u32),
    BeginPath,
    MoveTo(Pos2),
    LineTo(Pos2),
    Arc { center: Pos2, radius: f32 },
    Stroke,
    Fill,
    StrokeColor(String),
    FillColor(String),
    LineWidth(f32),
    LineCap(LineCap),
    LineJoin(LineJoin),
    GlobalAlpha(f32),
}

/// A surface that draws nothing and records every call.
///
/// Snapshot `n` (counting from 0) is a transparent `(n + 1) x 1` buffer, so
/// tests can tell which snapshot a restore brought back.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    snapshots: Cell<u32>,
}

impl RecordingSurface {
    pub fn take_ops(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    /// How many snapshots have been taken so far
    pub fn snapshots_taken(&self) -> u32 {
        self.snapshots.get()
    }

    /// The calls that touch pixels or the path, without the style setters.
    pub fn drawing_ops(&self) -> Vec<Op> {
        self.ops
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    Op::Restore(_) | Op::BeginPath | Op::MoveTo(_) | Op::LineTo(_) | Op::Arc { .. } | Op::Stroke | Op::Fill
                )
            })
            .cloned()
            .collect()
    }
}

pub fn marker(buffer: &PixelBuffer) -> u32 {
    buffer.width() - 1
}

impl RasterSurface for RecordingSurface {
    fn width(&self) -> u32 {
        100
    }

    fn height(&self) -> u32 {
        100
    }

    fn snapshot(&self) -> PixelBuffer {
        let n = self.snapshots.get();
        self.snapshots.set(n + 1);
        PixelBuffer::new(n + 1, 1)
    }

    fn restore(&mut self, buffer: &PixelBuffer) {
        self.ops.push(Op::Restore(marker(buffer)));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn move_to(&mut self, point: Pos2) {
        self.ops.push(Op::MoveTo(point));
    }

    fn line_to(&mut self, point: Pos2) {
        self.ops.push(Op::LineTo(point));
    }

    fn arc(&mut self, center: Pos2, radius: f32, _start_angle: f32, _end_angle: f32) {
        self.ops.push(Op::Arc { center, radius });
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(Op::StrokeColor(color.to_string()));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(Op::FillColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(Op::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(Op::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(Op::LineJoin(join));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::GlobalAlpha(alpha));
    }
}

pub fn recording_dispatcher() -> ToolDispatcher<RecordingSurface> {
    ToolDispatcher::new(DrawingState::new(100, 100), Rc::new(RefCell::new(RecordingSurface::default())))
}
