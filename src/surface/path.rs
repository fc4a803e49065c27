//! The current path of a `PixelCanvas`, kept in canvas terms until it is drawn.

use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Pos2, Vec2};
use tiny_skia::PathBuilder;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    MoveTo(Pos2),
    LineTo(Pos2),
    CubicTo(Pos2, Pos2, Pos2),
}

#[derive(Debug, Clone, Default)]
pub struct CanvasPath {
    segments: Vec<Segment>,
}

impl CanvasPath {
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.segments.push(Segment::MoveTo(point));
    }

    /// Without a current point this behaves like `move_to`.
    pub fn line_to(&mut self, point: Pos2) {
        if self.segments.is_empty() {
            self.move_to(point);
        } else {
            self.segments.push(Segment::LineTo(point));
        }
    }

    /// Appends a clockwise arc as cubic Béziers of at most a quarter turn each.
    /// The current point, if any, is first connected to the arc's start.
    pub fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32) {
        let mut sweep = end_angle - start_angle;
        if sweep >= TAU {
            sweep = TAU;
        } else if sweep < 0.0 {
            sweep = sweep.rem_euclid(TAU);
        }

        let point_at = |angle: f32| center + radius * Vec2::angled(angle);
        let tangent_at = |angle: f32| radius * Vec2::new(-angle.sin(), angle.cos());

        self.line_to(point_at(start_angle));
        if sweep == 0.0 || radius == 0.0 {
            return;
        }

        let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / pieces as f32;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        for i in 0..pieces {
            let a0 = start_angle + step * i as f32;
            let a1 = a0 + step;
            let (p0, p3) = (point_at(a0), point_at(a1));
            self.segments
                .push(Segment::CubicTo(p0 + k * tangent_at(a0), p3 - k * tangent_at(a1), p3));
        }
    }

    /// Builds the drawable path, or `None` when there is nothing to draw.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => builder.move_to(p.x, p.y),
                Segment::LineTo(p) => builder.line_to(p.x, p.y),
                Segment::CubicTo(c1, c2, p) => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            }
        }
        builder.finish()
    }
}
