use thiserror::Error;

/// Errors raised at the edges of the application: config files, canvas
/// allocation and toolbar values.
///
/// The drawing core itself never fails; see `DrawingState` and `ToolDispatcher`.
#[derive(Error, Debug)]
pub enum PaintError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown drawing tool: {0:?}")]
    UnknownTool(String),
    #[error("Unknown toolbar control: {0:?}")]
    UnknownControl(String),
    #[error("Unknown notification: {0:?}")]
    UnknownNotification(String),
    #[error("Cannot allocate a {width}x{height} canvas")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("Invalid number for {control}: {value:?}")]
    InvalidNumber { control: &'static str, value: String },
}

pub type PaintResult<T> = Result<T, PaintError>;
