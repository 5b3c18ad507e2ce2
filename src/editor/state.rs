use super::tools::{CursorGlyph, DrawContext};
use super::{CanvasEvent, EditAction};
use crate::config::CanvasConfig;
use crate::geometry::Color;
use crate::selection::{Selection, SelectionState};
use crate::surface::PixelSurface;

/// Everything tools may read or change while handling a gesture.
#[derive(Debug)]
pub struct CanvasState {
    width: u32,
    height: u32,
    pub(crate) surface: PixelSurface,
    pub(crate) overlay: PixelSurface,
    selection: SelectionState,
    primary: Color,
    secondary: Color,
    cursor: CursorGlyph,
    events: Vec<CanvasEvent>,
}

impl CanvasState {
    pub fn new(config: &CanvasConfig) -> Self {
        let width = config.initial_width.max(1);
        let height = config.initial_height.max(1);
        Self {
            width,
            height,
            surface: PixelSurface::new(width, height),
            overlay: PixelSurface::new(width, height),
            selection: SelectionState::new(),
            primary: config.primary,
            secondary: config.secondary,
            cursor: CursorGlyph::Default,
            events: Vec::new(),
        }
    }

    /// Logical size; differs from the surface only while a resize is in flight.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn overlay(&self) -> &PixelSurface {
        &self.overlay
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        if self.selection.set(selection) {
            self.push_event(CanvasEvent::SensitivityChanged {
                action: EditAction::Crop,
                sensitive: true,
            });
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.push_event(CanvasEvent::SensitivityChanged {
                action: EditAction::Crop,
                sensitive: false,
            });
        }
    }

    /// Empties the overlay at the current canvas size and drops the selection.
    pub fn clear_overlay(&mut self) {
        self.overlay = PixelSurface::new(self.width, self.height);
        self.clear_selection();
    }

    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }

    pub(crate) fn set_primary(&mut self, color: Color) {
        self.primary = color;
    }

    pub(crate) fn set_secondary(&mut self, color: Color) {
        self.secondary = color;
    }

    pub fn cursor(&self) -> CursorGlyph {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorGlyph) {
        self.cursor = cursor;
    }

    pub fn draw_context(&self) -> DrawContext {
        DrawContext {
            width: self.width,
            height: self.height,
            primary: self.primary,
            secondary: self.secondary,
        }
    }

    /// Queues an event for the shell. Consecutive repaint requests collapse.
    pub fn push_event(&mut self, event: CanvasEvent) {
        if event == CanvasEvent::RepaintRequested
            && self.events.last() == Some(&CanvasEvent::RepaintRequested)
        {
            return;
        }
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasPoint;

    fn small_state() -> CanvasState {
        CanvasState::new(&CanvasConfig {
            initial_width: 8,
            initial_height: 6,
            ..CanvasConfig::default()
        })
    }

    #[test]
    fn selection_changes_emit_crop_sensitivity_once() {
        let mut state = small_state();
        let selection = Selection::new(CanvasPoint::new(1.0, 1.0), CanvasPoint::new(4.0, 4.0));
        state.set_selection(selection);
        state.set_selection(selection);
        state.clear_overlay();
        state.clear_selection();

        assert_eq!(
            state.drain_events(),
            vec![
                CanvasEvent::SensitivityChanged {
                    action: EditAction::Crop,
                    sensitive: true
                },
                CanvasEvent::SensitivityChanged {
                    action: EditAction::Crop,
                    sensitive: false
                },
            ]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn repaint_requests_coalesce() {
        let mut state = small_state();
        state.push_event(CanvasEvent::RepaintRequested);
        state.push_event(CanvasEvent::RepaintRequested);
        state.push_event(CanvasEvent::ColorPicked(Color::WHITE));
        state.push_event(CanvasEvent::RepaintRequested);
        assert_eq!(state.drain_events().len(), 3);
    }

    #[test]
    fn canvas_size_never_reaches_zero() {
        let mut state = small_state();
        state.set_canvas_size(0, 12);
        assert_eq!(state.canvas_size(), (1, 12));
        state.clear_overlay();
        assert_eq!(state.overlay().dimensions(), (1, 12));
    }
}
