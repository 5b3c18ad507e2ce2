use crate::clipboard::ClipboardError;
use crate::editor::ToolError;
use crate::state::StateError;
use crate::surface::SurfaceError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}
