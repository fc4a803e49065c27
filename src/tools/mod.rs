//! Drawing tools and their dispatch.
//!
//! Every tool is described by the same four operation slots:
//!
//! | Tool | on_move | on_render |
//! |------|---------|-----------|
//! | Freehand | move the cursor | stroke anchor→cursor, commit, advance the anchor |
//! | StraightLine | move the cursor, keep the stroke-start base | restore the base, stroke anchor→cursor |
//! | Circle | same as StraightLine | restore the base, stroke a circle around the anchor |
//! | FilledCircle | same as StraightLine | restore the base, fill a circle around the anchor |
//!
//! `on_press` and `on_release` are shared: they snapshot the surface and begin
//! or end the gesture on `DrawingState`.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::error::PaintError;
use crate::state::DrawingState;
use crate::surface::RasterSurface;

mod dispatcher;
pub mod routines;

pub use dispatcher::ToolDispatcher;

/// The active drawing mode. Serialized with the toolbar's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    #[serde(rename = "brush")]
    Freehand,
    #[serde(rename = "line")]
    StraightLine,
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "circleFill")]
    FilledCircle,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Self::Freehand, Self::StraightLine, Self::Circle, Self::FilledCircle];

    /// The token the configuration panel uses for this tool
    pub fn token(self) -> &'static str {
        match self {
            Self::Freehand => "brush",
            Self::StraightLine => "line",
            Self::Circle => "circle",
            Self::FilledCircle => "circleFill",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Freehand => "🖌 Brush",
            Self::StraightLine => "╱ Line",
            Self::Circle => "○ Circle",
            Self::FilledCircle => "● Filled circle",
        }
    }

    /// Shape tools preview against a snapshot instead of committing each move.
    pub fn is_shape(self) -> bool {
        !matches!(self, Self::Freehand)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Tool {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.token() == s)
            .ok_or_else(|| PaintError::UnknownTool(s.to_string()))
    }
}

/// Pointer-driven operation: the surface is borrowed only for as long as the
/// routine needs it, since `DrawingState` notifications borrow it again.
pub type PointerOp<S> = fn(&mut DrawingState, &RefCell<S>, Pos2);

/// Rendering operation, run from the `stroke-updated` notification.
pub type RenderOp<S> = fn(&mut DrawingState, &mut S);

/// The four operation slots of one tool.
pub struct ToolOps<S> {
    pub on_press: PointerOp<S>,
    pub on_move: PointerOp<S>,
    pub on_render: RenderOp<S>,
    pub on_release: PointerOp<S>,
}

impl<S> Clone for ToolOps<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ToolOps<S> {}

/// Operation slots for every tool, resolved once.
pub struct ToolTable<S> {
    entries: [ToolOps<S>; 4],
}

impl<S: RasterSurface> Default for ToolTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RasterSurface> ToolTable<S> {
    pub fn new() -> Self {
        let entries = Tool::ALL.map(|tool| {
            let on_move: PointerOp<S> = if tool.is_shape() {
                routines::track_shape::<S>
            } else {
                routines::track_freehand::<S>
            };
            let on_render: RenderOp<S> = match tool {
                Tool::Freehand => routines::render_segment::<S>,
                Tool::StraightLine => routines::render_line::<S>,
                Tool::Circle => routines::render_circle::<S>,
                Tool::FilledCircle => routines::render_filled_circle::<S>,
            };
            ToolOps {
                on_press: routines::press::<S>,
                on_move,
                on_render,
                on_release: routines::release::<S>,
            }
        });

        Self { entries }
    }

    pub fn ops(&self, tool: Tool) -> ToolOps<S> {
        self.entries[tool.index()]
    }
}
