#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod panels;
pub mod state;
pub mod surface;
pub mod texture;
pub mod tools;

pub use app::{PaintApp, build_canvas};
pub use config::PaintConfig;
pub use error::{PaintError, PaintResult};
pub use event::{EventChannel, Notification};
pub use input::{InputEvent, InputHandler};
pub use panels::ToolbarEvent;
pub use state::DrawingState;
pub use surface::{PixelBuffer, PixelCanvas, RasterSurface};
pub use tools::{Tool, ToolDispatcher};
