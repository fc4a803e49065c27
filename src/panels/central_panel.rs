use egui::{Color32, Rect, Sense, vec2};

use crate::input::InputHandler;
use crate::surface::PixelCanvas;
use crate::texture::CanvasTexture;
use crate::tools::ToolDispatcher;

/// Lays out the drawing surface, feeds it this frame's pointer input and paints it.
pub fn central_panel(
    ctx: &egui::Context,
    dispatcher: &mut ToolDispatcher<PixelCanvas>,
    input: &mut InputHandler,
    texture: &mut CanvasTexture,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = vec2(
            dispatcher.state().surface_width() as f32,
            dispatcher.state().surface_height() as f32,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let canvas_rect = response.rect;

        for event in input.process_input(ctx, canvas_rect) {
            dispatcher.handle(&event);
        }

        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
        let texture_id = texture.texture_id(ctx, &dispatcher.surface().borrow());
        painter.image(
            texture_id,
            canvas_rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        if dispatcher.state().is_active() {
            ctx.request_repaint();
        }
    });
}
