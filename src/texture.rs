use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::{PixelCanvas, RasterSurface};

/// Keeps one GPU texture in step with a `PixelCanvas`.
///
/// The canvas pixels are re-uploaded only when its revision moves.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    revision: Option<u64>,
    uploads: usize,
}

impl std::fmt::Debug for CanvasTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasTexture")
            .field("revision", &self.revision)
            .field("uploads", &self.uploads)
            .finish_non_exhaustive()
    }
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for the canvas, uploading its pixels first if they changed.
    pub fn texture_id(&mut self, ctx: &Context, canvas: &PixelCanvas) -> TextureId {
        let revision = canvas.revision();

        match &mut self.handle {
            Some(handle) if self.revision == Some(revision) => return handle.id(),
            Some(handle) => handle.set(canvas_image(canvas), TextureOptions::NEAREST),
            None => self.handle = Some(ctx.load_texture("canvas", canvas_image(canvas), TextureOptions::NEAREST)),
        }

        self.revision = Some(revision);
        self.uploads += 1;
        log::trace!("uploaded canvas revision {revision}");

        match &self.handle {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }

    /// How many times the pixels have been sent to the GPU
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

fn canvas_image(canvas: &PixelCanvas) -> ColorImage {
    let size = [canvas.width() as usize, canvas.height() as usize];
    ColorImage::from_rgba_premultiplied(size, canvas.premultiplied_data())
}
