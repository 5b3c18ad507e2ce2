pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod logging;
pub mod selection;
pub mod state;
pub mod surface;

pub use clipboard::{ClipboardBackend, ClipboardImage, MemoryClipboard};
pub use config::CanvasConfig;
pub use editor::{CanvasController, CanvasEvent, EditAction};
pub use error::{AppError, AppResult};
pub use geometry::{CanvasPoint, Color, PixelRect};
pub use surface::PixelSurface;

/// Entrypoint used by shells: installs logging and builds a controller from
/// the user's `canvas.json`.
pub fn open_canvas<C: ClipboardBackend>(clipboard: C) -> CanvasController<C> {
    logging::init();
    let config = config::load_canvas_config();
    tracing::info!(
        width = config.initial_width,
        height = config.initial_height,
        history = config.history_capacity,
        "opening canvas"
    );
    CanvasController::new(config, clipboard)
}
