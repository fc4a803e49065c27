//! The primitive routines the tool table is assembled from.

use std::cell::RefCell;
use std::f32::consts::TAU;

use egui::Pos2;
use log::trace;

use crate::state::DrawingState;
use crate::surface::RasterSurface;

/// Distance from the anchor to the cursor, the radius of circle tools.
pub fn radius(anchor: Pos2, cursor: Pos2) -> f32 {
    let dx = anchor.x - cursor.x;
    let dy = anchor.y - cursor.y;
    (dx * dx + dy * dy).sqrt()
}

/// Snapshots the surface and starts the gesture at `at`.
pub fn press<S: RasterSurface>(state: &mut DrawingState, surface: &RefCell<S>, at: Pos2) {
    let snapshot = surface.borrow().snapshot();
    state.begin(at.x, at.y, snapshot);
}

/// Snapshots the finished surface and ends the gesture at `at`.
pub fn release<S: RasterSurface>(state: &mut DrawingState, surface: &RefCell<S>, at: Pos2) {
    let snapshot = surface.borrow().snapshot();
    state.end(at.x, at.y, snapshot);
}

/// Freehand segments are committed as they render, so there is nothing to erase.
pub fn track_freehand<S: RasterSurface>(state: &mut DrawingState, _surface: &RefCell<S>, at: Pos2) {
    state.update(at.x, at.y, None);
}

/// Shapes keep erasing back to the surface as it was when the gesture began.
pub fn track_shape<S: RasterSurface>(state: &mut DrawingState, _surface: &RefCell<S>, at: Pos2) {
    let base = state.pre_snapshot().cloned();
    state.update(at.x, at.y, base);
}

/// Commits the segment anchor→cursor and makes the result the new base.
/// A zero-length segment paints nothing.
pub fn render_segment<S: RasterSurface>(state: &mut DrawingState, surface: &mut S) {
    if state.anchor() != state.cursor() {
        surface.begin_path();
        surface.move_to(state.anchor());
        surface.line_to(state.cursor());
        surface.stroke();
    }

    state.advance_anchor();
    state.rebase(surface.snapshot());
}

pub fn render_line<S: RasterSurface>(state: &mut DrawingState, surface: &mut S) {
    erase_preview(state, surface);
    if state.anchor() == state.cursor() {
        return;
    }
    surface.begin_path();
    surface.move_to(state.anchor());
    surface.line_to(state.cursor());
    surface.stroke();
}

pub fn render_circle<S: RasterSurface>(state: &mut DrawingState, surface: &mut S) {
    if trace_circle(state, surface) {
        surface.stroke();
    }
}

pub fn render_filled_circle<S: RasterSurface>(state: &mut DrawingState, surface: &mut S) {
    if trace_circle(state, surface) {
        surface.fill();
    }
}

fn erase_preview<S: RasterSurface>(state: &DrawingState, surface: &mut S) {
    if let Some(base) = state.pre_snapshot() {
        surface.restore(base);
    }
}

/// Erases the last preview and lays out the circle path. A zero radius
/// leaves the path empty and returns false.
fn trace_circle<S: RasterSurface>(state: &DrawingState, surface: &mut S) -> bool {
    erase_preview(state, surface);

    let r = radius(state.anchor(), state.cursor());
    if r == 0.0 {
        trace!("zero-radius circle at {:?}", state.anchor());
        return false;
    }
    surface.begin_path();
    surface.arc(state.anchor(), r, 0.0, TAU);
    true
}
