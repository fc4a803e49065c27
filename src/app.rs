use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::{PaintConfig, StyleConfig};
use crate::error::PaintResult;
use crate::input::InputHandler;
use crate::panels::{ToolbarEvent, central_panel, tools_panel};
use crate::state::DrawingState;
use crate::surface::{PixelCanvas, RasterSurface};
use crate::texture::CanvasTexture;
use crate::tools::{Tool, ToolDispatcher};

/// Storage key for the toolbar settings.
const STYLE_KEY: &str = "canvas_paint_style";

/// Wires a surface, a drawing state and a dispatcher together and applies the
/// configured starting style.
pub fn build_canvas(config: &PaintConfig) -> PaintResult<ToolDispatcher<PixelCanvas>> {
    let mut canvas = PixelCanvas::new(config.canvas.width, config.canvas.height)?;
    canvas.set_line_cap(config.style.line_cap);
    canvas.set_line_join(config.style.line_join);

    let state = DrawingState::new(config.canvas.width, config.canvas.height);
    let mut dispatcher = ToolDispatcher::new(state, Rc::new(RefCell::new(canvas)));

    let style = &config.style;
    for event in [
        ToolbarEvent::ToolSelected(style.tool),
        ToolbarEvent::ColorChanged(style.color.clone()),
        ToolbarEvent::LineWidthChanged(style.line_width),
        ToolbarEvent::OpacityChanged(style.opacity),
    ] {
        dispatcher.apply(event);
    }

    log::info!(
        "Canvas ready: {}x{}, {} tool",
        config.canvas.width,
        config.canvas.height,
        style.tool
    );
    Ok(dispatcher)
}

/// The toolbar settings remembered between runs. Line cap and join are not
/// editable in the toolbar, so they always come from the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SavedToolbar {
    tool: Tool,
    color: String,
    line_width: f32,
    opacity: f32,
}

impl SavedToolbar {
    fn from_style(style: &StyleConfig) -> Self {
        Self {
            tool: style.tool,
            color: style.color.clone(),
            line_width: style.line_width,
            opacity: style.opacity,
        }
    }

    fn apply_to(self, style: &mut StyleConfig) {
        style.tool = self.tool;
        style.color = self.color;
        style.line_width = self.line_width;
        style.opacity = self.opacity;
    }
}

pub struct PaintApp {
    dispatcher: ToolDispatcher<PixelCanvas>,
    style: StyleConfig,
    input: InputHandler,
    texture: CanvasTexture,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, mut config: PaintConfig) -> PaintResult<Self> {
        if let Some(saved) = cc.storage.and_then(|storage| eframe::get_value::<SavedToolbar>(storage, STYLE_KEY)) {
            log::debug!("Restored toolbar style: {:?}", saved);
            saved.apply_to(&mut config.style);
        }
        Self::with_config(config)
    }

    pub fn with_config(config: PaintConfig) -> PaintResult<Self> {
        Ok(Self {
            dispatcher: build_canvas(&config)?,
            style: config.style,
            input: InputHandler::new(),
            texture: CanvasTexture::new(),
        })
    }

    pub fn dispatcher(&self) -> &ToolDispatcher<PixelCanvas> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut ToolDispatcher<PixelCanvas> {
        &mut self.dispatcher
    }

    /// Wipes the surface. Refused while a gesture is in progress.
    pub fn clear_canvas(&mut self) -> bool {
        if self.dispatcher.state().is_active() {
            log::warn!("Ignoring clear during an active stroke");
            return false;
        }
        self.dispatcher.surface().borrow_mut().clear();
        log::info!("Canvas cleared");
        true
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STYLE_KEY, &SavedToolbar::from_style(&self.style));
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let drawing = self.dispatcher.state().is_active();
        let output = tools_panel(ctx, &mut self.style, drawing);
        for event in output.events {
            self.dispatcher.apply(event);
        }
        if output.clear_requested {
            self.clear_canvas();
        }

        central_panel(ctx, &mut self.dispatcher, &mut self.input, &mut self.texture);
    }
}
