//! Canvas controller: routes pointer input to tools and owns the document.

pub mod handles;
mod region;
mod state;
pub mod tools;

use crate::clipboard::ClipboardBackend;
use crate::config::CanvasConfig;
use crate::error::AppResult;
use crate::geometry::{CanvasPoint, Color, PixelRect};
use crate::history::UndoHistory;
use crate::surface::{BlendMode, PixelSurface};

pub use handles::{handle_at, ResizeHandle};
pub use state::CanvasState;
pub use tools::{
    CursorGlyph, DragState, DrawContext, PointerButton, Tool, ToolChest, ToolCommit, ToolError,
    ToolKind,
};

const CHECKER_SIZE: u32 = 8;
const CHECKER_LIGHT: Color = Color::rgb(255, 255, 255);
const CHECKER_DARK: Color = Color::rgb(204, 204, 204);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Undo,
    Redo,
    Crop,
}

/// Notifications drained by the shell after each call into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    ColorPicked(Color),
    SensitivityChanged { action: EditAction, sensitive: bool },
    RepaintRequested,
}

#[derive(Debug)]
pub struct CanvasController<C: ClipboardBackend> {
    config: CanvasConfig,
    state: CanvasState,
    history: UndoHistory,
    tools: ToolChest,
    active: ToolKind,
    previous: ToolKind,
    clipboard: C,
    background_initialized: bool,
    modified: bool,
    picked_color: Option<Color>,
}

impl<C: ClipboardBackend> CanvasController<C> {
    /// Blank canvas filled with the secondary colour, using the built-in tools.
    pub fn new(config: CanvasConfig, clipboard: C) -> Self {
        Self::with_tools(config, clipboard, ToolChest::with_builtin())
    }

    pub fn with_tools(config: CanvasConfig, clipboard: C, tools: ToolChest) -> Self {
        let config = config.sanitized();
        let mut controller = Self {
            state: CanvasState::new(&config),
            history: UndoHistory::new(config.history_capacity),
            tools,
            active: ToolKind::Inert,
            previous: ToolKind::Inert,
            clipboard,
            background_initialized: false,
            modified: false,
            picked_color: None,
            config,
        };
        controller.print();
        controller.state.drain_events();
        tracing::debug!(
            width = controller.config.initial_width,
            height = controller.config.initial_height,
            "canvas created"
        );
        controller
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn tools_mut(&mut self) -> &mut ToolChest {
        &mut self.tools
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.state.canvas_size()
    }

    /// The committed pixels.
    pub fn image(&self) -> &PixelSurface {
        &self.state.surface
    }

    pub fn overlay(&self) -> &PixelSurface {
        &self.state.overlay
    }

    pub fn cursor(&self) -> CursorGlyph {
        self.state.cursor()
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active
    }

    pub fn picked_color(&self) -> Option<Color> {
        self.picked_color
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn primary(&self) -> Color {
        self.state.primary()
    }

    pub fn secondary(&self) -> Color {
        self.state.secondary()
    }

    pub fn set_primary(&mut self, color: Color) {
        self.state.set_primary(color);
    }

    pub fn set_secondary(&mut self, color: Color) {
        self.state.set_secondary(color);
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        self.state.drain_events()
    }

    pub fn set_active_tool(&mut self, kind: ToolKind) -> Result<(), ToolError> {
        if !self.tools.contains(kind) {
            tracing::error!(tool = %kind, "tool is not registered");
            return Err(ToolError::Unregistered(kind));
        }
        if let Some(tool) = self.tools.get_mut(self.active) {
            tool.drag_state_mut().cancel();
        }
        self.active = kind;
        self.previous = kind;
        tracing::debug!(tool = %kind, "active tool changed");
        Ok(())
    }

    /// Activates a tool by its identifier, e.g. `"rect-select"`.
    pub fn set_active_tool_by_name(&mut self, name: &str) -> AppResult<()> {
        let kind = name.parse::<ToolKind>().inspect_err(|err| {
            tracing::error!(%err, "cannot activate tool");
        })?;
        self.set_active_tool(kind)?;
        Ok(())
    }

    fn active_is_drawing(&self) -> bool {
        self.tools
            .get(self.active)
            .is_some_and(|tool| tool.mode().is_drawing())
    }

    fn with_active_tool<R>(
        &mut self,
        apply: impl FnOnce(&mut dyn Tool, &mut CanvasState) -> R,
    ) -> Option<R> {
        let tool = self.tools.get_mut(self.active)?;
        Some(apply(tool, &mut self.state))
    }

    pub fn pointer_pressed(&mut self, point: CanvasPoint, button: PointerButton) {
        self.previous = self.active;
        let (width, height) = self.state.canvas_size();
        if point.x >= f64::from(width) || point.y >= f64::from(height) {
            self.active = handle_at(point, width, height, self.config.handle_size)
                .map_or(ToolKind::Inert, ResizeHandle::tool_kind);
        }
        if !self.tools.contains(self.active) {
            tracing::error!(tool = %self.active, "press routed to unregistered tool");
            return;
        }
        let was_drawing = self.active_is_drawing();
        self.with_active_tool(|tool, state| tool.begin(state, point, button));
        if self.active == ToolKind::Airbrush && !was_drawing && self.active_is_drawing() {
            self.record_snapshot();
        }
        self.refresh();
    }

    pub fn pointer_moved(&mut self, point: CanvasPoint) {
        if self.active_is_drawing() {
            self.with_active_tool(|tool, state| tool.drag(state, point));
            if self.active == ToolKind::ColorPicker {
                self.publish_picked_color();
            }
        } else {
            self.update_hover(point);
        }
        self.refresh();
    }

    pub fn pointer_released(&mut self, point: CanvasPoint) {
        if !self.active_is_drawing() {
            self.active = self.previous;
            return;
        }
        self.with_active_tool(|tool, state| tool.end(state, point));
        self.refresh();

        let effect = self
            .with_active_tool(|tool, state| tool.commit(state))
            .unwrap_or(ToolCommit::Nothing);
        match effect {
            // Airbrush frames are already in the surface; its snapshot was taken on press.
            ToolCommit::Render if self.active == ToolKind::Airbrush => {}
            ToolCommit::Render => {
                self.record_snapshot();
                self.print();
            }
            ToolCommit::Nothing => {}
        }
        self.with_active_tool(|tool, _| tool.finish());

        if self.active == ToolKind::ColorPicker {
            self.publish_picked_color();
        }
        self.active = self.previous;
        self.refresh();
    }

    fn update_hover(&mut self, point: CanvasPoint) {
        let (width, height) = self.state.canvas_size();
        let hovered = handle_at(point, width, height, self.config.handle_size)
            .map_or(self.active, ResizeHandle::tool_kind);
        if let Some(tool) = self.tools.get(hovered) {
            tool.select(&mut self.state);
        }
        let off_canvas = point.x > f64::from(width) || point.y > f64::from(height);
        if hovered == self.active && off_canvas {
            self.state.set_cursor(CursorGlyph::Default);
        }
    }

    fn publish_picked_color(&mut self) {
        let Some(color) = self.tools.get(self.active).and_then(|tool| tool.picked_color()) else {
            return;
        };
        self.picked_color = Some(color);
        self.state.push_event(CanvasEvent::ColorPicked(color));
    }

    /// Requests a repaint; airbrush frames drawn mid-gesture are promoted into the surface.
    fn refresh(&mut self) {
        if self.active == ToolKind::Airbrush && self.active_is_drawing() {
            let frame = self.render_working();
            self.state.surface = frame;
            self.modified = true;
        }
        self.state.push_event(CanvasEvent::RepaintRequested);
    }

    /// Background, surface, and the active tool's drawing at the logical canvas size.
    fn render_working(&mut self) -> PixelSurface {
        let (width, height) = self.state.canvas_size();
        let mut frame = PixelSurface::new(width, height);
        self.draw_background(&mut frame);
        frame.blit(self.state.surface.view(), 0, 0, BlendMode::Over);

        let context = self.state.draw_context();
        if let Some(tool) = self.tools.get(self.active) {
            if tool.draws_to_overlay() {
                if self.state.overlay.dimensions() != (width, height) {
                    self.state.overlay = PixelSurface::new(width, height);
                }
                tool.draw(&context, &mut self.state.overlay);
            } else {
                tool.draw(&context, &mut frame);
            }
        }
        frame
    }

    /// First print covers the whole canvas; later ones only what lies beyond the surface.
    fn draw_background(&mut self, frame: &mut PixelSurface) {
        let fill = self.state.secondary();
        if !self.background_initialized {
            frame.fill(fill);
            self.background_initialized = true;
            return;
        }
        let (width, height) = frame.dimensions();
        let (surface_width, surface_height) = self.state.surface.dimensions();
        if width > surface_width {
            frame.fill_rect(
                PixelRect::new(to_i32(surface_width), 0, width - surface_width, height),
                fill,
                BlendMode::Replace,
            );
        }
        if height > surface_height {
            frame.fill_rect(
                PixelRect::new(0, to_i32(surface_height), width, height - surface_height),
                fill,
                BlendMode::Replace,
            );
        }
    }

    /// Recomposes the working frame into a fresh surface and clears the overlay.
    pub fn print(&mut self) {
        self.state.clear_overlay();
        let frame = self.render_working();
        self.state.surface = frame;
    }

    /// Frame for display: checkerboard, surface, overlay, and handle chrome in the margin.
    pub fn compose_frame(&mut self) -> PixelSurface {
        let (width, height) = self.state.canvas_size();
        let margin = self.config.margin;
        let mut frame = PixelSurface::new(width + margin, height + margin);
        draw_checkerboard(&mut frame, width, height);
        let working = self.render_working();
        frame.blit(working.view(), 0, 0, BlendMode::Over);
        frame.blit(self.state.overlay.view(), 0, 0, BlendMode::Over);
        handles::draw_handles(&mut frame, width, height, self.config.handle_size);
        frame
    }

    /// Snapshots the surface before a destructive change.
    fn record_snapshot(&mut self) {
        self.history.push(&self.state.surface);
        self.modified = true;
        self.state.push_event(CanvasEvent::SensitivityChanged {
            action: EditAction::Undo,
            sensitive: true,
        });
        self.state.push_event(CanvasEvent::SensitivityChanged {
            action: EditAction::Redo,
            sensitive: false,
        });
    }

    pub fn has_undo(&self) -> bool {
        self.history.has_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.history.has_redo()
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn undo(&mut self) -> bool {
        let before = self.state.surface.dimensions();
        if !self.history.undo(&mut self.state.surface) {
            return false;
        }
        self.after_restore(before);
        self.state.push_event(CanvasEvent::SensitivityChanged {
            action: EditAction::Redo,
            sensitive: true,
        });
        if !self.history.has_undo() {
            self.state.push_event(CanvasEvent::SensitivityChanged {
                action: EditAction::Undo,
                sensitive: false,
            });
        }
        true
    }

    pub fn redo(&mut self) -> bool {
        let before = self.state.surface.dimensions();
        if !self.history.redo(&mut self.state.surface) {
            return false;
        }
        self.after_restore(before);
        self.state.push_event(CanvasEvent::SensitivityChanged {
            action: EditAction::Undo,
            sensitive: true,
        });
        if !self.history.has_redo() {
            self.state.push_event(CanvasEvent::SensitivityChanged {
                action: EditAction::Redo,
                sensitive: false,
            });
        }
        true
    }

    fn after_restore(&mut self, before: (u32, u32)) {
        let (width, height) = self.state.surface.dimensions();
        self.state.set_canvas_size(width, height);
        if (width, height) != before {
            self.state.clear_overlay();
        }
        self.modified = true;
        self.refresh();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        for action in [EditAction::Undo, EditAction::Redo] {
            self.state.push_event(CanvasEvent::SensitivityChanged {
                action,
                sensitive: false,
            });
        }
    }

    /// Replaces the document with a blank `width` x `height` canvas.
    pub fn new_document(&mut self, width: u32, height: u32) {
        self.clear_history();
        self.state.set_canvas_size(width, height);
        let (width, height) = self.state.canvas_size();
        self.state.surface = PixelSurface::new(width, height);
        self.background_initialized = false;
        self.print();
        self.modified = false;
        self.refresh();
    }

    /// Replaces the document with `image` as loaded from disk.
    pub fn load_image(&mut self, image: PixelSurface) {
        self.clear_history();
        let (width, height) = image.dimensions();
        self.state.set_canvas_size(width, height);
        self.state.surface = image;
        self.background_initialized = true;
        self.state.clear_overlay();
        self.modified = false;
        self.refresh();
    }

    /// Loads raw premultiplied BGRA rows.
    pub fn load_raw(&mut self, width: u32, height: u32, stride: usize, data: Vec<u8>) -> AppResult<()> {
        let image = PixelSurface::from_raw(width, height, stride, data)?;
        self.load_image(image);
        Ok(())
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn draw_checkerboard(frame: &mut PixelSurface, width: u32, height: u32) {
    frame.fill_rect(PixelRect::new(0, 0, width, height), CHECKER_LIGHT, BlendMode::Replace);
    for row in 0..height.div_ceil(CHECKER_SIZE) {
        for column in 0..width.div_ceil(CHECKER_SIZE) {
            if (row + column) % 2 == 0 {
                continue;
            }
            let x = column * CHECKER_SIZE;
            let y = row * CHECKER_SIZE;
            frame.fill_rect(
                PixelRect::new(
                    to_i32(x),
                    to_i32(y),
                    CHECKER_SIZE.min(width - x),
                    CHECKER_SIZE.min(height - y),
                ),
                CHECKER_DARK,
                BlendMode::Replace,
            );
        }
    }
}
