use egui::{Color32, Slider};
use image::Rgba;

use crate::config::StyleConfig;
use crate::error::{PaintError, PaintResult};
use crate::state::DrawingState;
use crate::surface::color::{parse_color, to_hex};
use crate::tools::Tool;

/// A discrete change emitted by the configuration panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarEvent {
    ToolSelected(Tool),
    ColorChanged(String),
    LineWidthChanged(f32),
    OpacityChanged(f32),
}

impl ToolbarEvent {
    /// Interprets a raw control change: `drawTool`, `color`, `lineWidth` or `opacity`.
    pub fn parse(control: &str, value: &str) -> PaintResult<Self> {
        let number = |control: &'static str| {
            value.trim().parse::<f32>().map_err(|_| PaintError::InvalidNumber {
                control,
                value: value.to_string(),
            })
        };

        match control {
            "drawTool" => Ok(Self::ToolSelected(value.parse()?)),
            "color" => Ok(Self::ColorChanged(value.to_string())),
            "lineWidth" => Ok(Self::LineWidthChanged(number("lineWidth")?)),
            "opacity" => Ok(Self::OpacityChanged(number("opacity")?)),
            other => Err(PaintError::UnknownControl(other.to_string())),
        }
    }

    /// Forwards the change to the matching `DrawingState` setter.
    pub fn apply(self, state: &mut DrawingState) {
        match self {
            Self::ToolSelected(tool) => state.set_tool(tool),
            Self::ColorChanged(color) => state.set_color(color),
            Self::LineWidthChanged(width) => state.set_stroke_width(width),
            Self::OpacityChanged(opacity) => state.set_opacity(opacity),
        }
    }
}

/// What the user did in the tools panel this frame.
#[derive(Debug, Default)]
pub struct ToolbarOutput {
    pub events: Vec<ToolbarEvent>,
    pub clear_requested: bool,
}

/// Shows the tool selector and style controls, editing `style` in place.
///
/// `drawing` disables the controls that must not run mid-gesture.
pub fn tools_panel(ctx: &egui::Context, style: &mut StyleConfig, drawing: bool) -> ToolbarOutput {
    let mut output = ToolbarOutput::default();

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            for tool in Tool::ALL {
                if ui.selectable_label(style.tool == tool, tool.label()).clicked() && style.tool != tool {
                    log::info!("Tool selected from UI: {}", tool);
                    style.tool = tool;
                    output.events.push(ToolbarEvent::ToolSelected(tool));
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = parse_color(&style.color)
                    .map(|c| Color32::from_rgb(c.0[0], c.0[1], c.0[2]))
                    .unwrap_or(Color32::BLACK);
                if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                    .changed()
                {
                    style.color = to_hex(Rgba([color.r(), color.g(), color.b(), 255]));
                    output.events.push(ToolbarEvent::ColorChanged(style.color.clone()));
                }
            });

            if ui.add(Slider::new(&mut style.line_width, 1.0..=50.0).text("Width")).changed() {
                output.events.push(ToolbarEvent::LineWidthChanged(style.line_width));
            }
            if ui.add(Slider::new(&mut style.opacity, 0.0..=1.0).text("Opacity")).changed() {
                output.events.push(ToolbarEvent::OpacityChanged(style.opacity));
            }

            ui.separator();

            if ui.add_enabled(!drawing, egui::Button::new("Clear")).clicked() {
                output.clear_requested = true;
            }
        });

    output
}
