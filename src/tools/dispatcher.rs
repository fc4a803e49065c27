use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::{PointerButton, Pos2};
use log::{debug, trace};

use super::{ToolOps, ToolTable};
use crate::input::InputEvent;
use crate::panels::ToolbarEvent;
use crate::state::DrawingState;
use crate::surface::RasterSurface;

/// Turns pointer gestures into raster-surface operations for the active tool.
///
/// The dispatcher owns the `DrawingState` and shares the surface with the
/// handlers it registers on it at construction:
/// - `stroke-updated` runs the active tool's `on_render`,
/// - `stroke-ended` counts the committed gesture,
/// - the style notifications copy color, width and opacity onto the surface.
pub struct ToolDispatcher<S: RasterSurface + 'static> {
    state: DrawingState,
    surface: Rc<RefCell<S>>,
    table: Rc<ToolTable<S>>,
    committed: Rc<Cell<usize>>,
}

impl<S: RasterSurface + 'static> std::fmt::Debug for ToolDispatcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("state", &self.state)
            .field("committed", &self.committed.get())
            .finish_non_exhaustive()
    }
}

impl<S: RasterSurface + 'static> ToolDispatcher<S> {
    pub fn new(mut state: DrawingState, surface: Rc<RefCell<S>>) -> Self {
        let table: Rc<ToolTable<S>> = Rc::new(ToolTable::new());
        let committed = Rc::new(Cell::new(0));

        {
            let table = Rc::clone(&table);
            let surface = Rc::clone(&surface);
            state.on_stroke_updated(move |state, _| {
                let ops = table.ops(state.tool());
                (ops.on_render)(state, &mut *surface.borrow_mut());
            });
        }
        {
            let committed = Rc::clone(&committed);
            state.on_stroke_ended(move |state, _| {
                committed.set(committed.get() + 1);
                debug!("{:?} stroke committed at {:?}", state.tool(), state.cursor());
            });
        }
        {
            let surface = Rc::clone(&surface);
            state.on_color_changed(move |_, color| {
                let mut surface = surface.borrow_mut();
                surface.set_stroke_color(color);
                surface.set_fill_color(color);
            });
        }
        {
            let surface = Rc::clone(&surface);
            state.on_width_changed(move |_, width| surface.borrow_mut().set_line_width(*width));
        }
        {
            let surface = Rc::clone(&surface);
            state.on_opacity_changed(move |_, opacity| surface.borrow_mut().set_global_alpha(*opacity));
        }

        let dispatcher = Self {
            state,
            surface,
            table,
            committed,
        };
        dispatcher.sync_style();
        dispatcher
    }

    /// Copies every style attribute of the state onto the surface.
    fn sync_style(&self) {
        let mut surface = self.surface.borrow_mut();
        surface.set_stroke_color(self.state.color());
        surface.set_fill_color(self.state.color());
        surface.set_line_width(self.state.stroke_width());
        surface.set_global_alpha(self.state.opacity());
    }

    fn active_ops(&self) -> ToolOps<S> {
        self.table.ops(self.state.tool())
    }

    /// Routes one normalized pointer event.
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position, button } => self.pointer_down(position, button),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position, button } => self.pointer_up(position, button),
        }
    }

    /// Starts a gesture. Only the primary button draws.
    pub fn pointer_down(&mut self, at: Pos2, button: PointerButton) {
        if button != PointerButton::Primary {
            trace!("ignoring {button:?} press");
            return;
        }
        let ops = self.active_ops();
        (ops.on_press)(&mut self.state, &self.surface, at);
    }

    pub fn pointer_move(&mut self, at: Pos2) {
        if !self.state.is_active() {
            return;
        }
        let ops = self.active_ops();
        (ops.on_move)(&mut self.state, &self.surface, at);
    }

    /// Renders the gesture's final segment or shape at `at`, then commits it.
    pub fn pointer_up(&mut self, at: Pos2, button: PointerButton) {
        if button != PointerButton::Primary || !self.state.is_active() {
            return;
        }
        let ops = self.active_ops();
        (ops.on_move)(&mut self.state, &self.surface, at);
        (ops.on_release)(&mut self.state, &self.surface, at);
    }

    /// Applies a configuration-panel change to the drawing state.
    pub fn apply(&mut self, event: ToolbarEvent) {
        event.apply(&mut self.state);
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    /// Number of gestures committed so far
    pub fn committed_strokes(&self) -> usize {
        self.committed.get()
    }
}
