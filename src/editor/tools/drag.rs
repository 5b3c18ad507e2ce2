use super::PointerButton;
use crate::geometry::CanvasPoint;
use crate::state::{InteractionEvent, InteractionMachine, ToolMode};

/// Press/drag/release bookkeeping shared by drag-and-drop tools.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    machine: InteractionMachine,
    initial: CanvasPoint,
    current: CanvasPoint,
    button: PointerButton,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ToolMode {
        self.machine.mode()
    }

    pub fn is_drawing(&self) -> bool {
        self.mode().is_drawing()
    }

    pub fn initial(&self) -> CanvasPoint {
        self.initial
    }

    /// Latest pointer position; the final one after `end`.
    pub fn current(&self) -> CanvasPoint {
        self.current
    }

    pub fn button(&self) -> PointerButton {
        self.button
    }

    /// Starts a gesture. Ignored while one is already in progress.
    pub fn begin(&mut self, point: CanvasPoint, button: PointerButton) -> bool {
        if self.machine.transition(InteractionEvent::Press).is_err() {
            return false;
        }
        self.initial = point;
        self.current = point;
        self.button = button;
        true
    }

    pub fn drag(&mut self, point: CanvasPoint) -> bool {
        if self.machine.transition(InteractionEvent::Drag).is_err() {
            return false;
        }
        self.current = point;
        true
    }

    /// Records the release position; the gesture stays live until `finish`.
    pub fn end(&mut self, point: CanvasPoint) -> bool {
        self.drag(point)
    }

    pub fn finish(&mut self) -> bool {
        self.machine.transition(InteractionEvent::Release).is_ok()
    }

    pub fn cancel(&mut self) {
        self.machine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_tracks_points_until_finished() {
        let mut drag = DragState::new();
        assert!(drag.begin(CanvasPoint::new(1.0, 2.0), PointerButton::Secondary));
        assert!(drag.drag(CanvasPoint::new(3.0, 4.0)));
        assert!(drag.end(CanvasPoint::new(5.0, 6.0)));
        assert!(drag.is_drawing());
        assert_eq!(drag.initial(), CanvasPoint::new(1.0, 2.0));
        assert_eq!(drag.current(), CanvasPoint::new(5.0, 6.0));
        assert_eq!(drag.button(), PointerButton::Secondary);

        assert!(drag.finish());
        assert_eq!(drag.mode(), ToolMode::Ready);
        assert!(!drag.finish());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut drag = DragState::new();
        assert!(!drag.drag(CanvasPoint::new(3.0, 3.0)));
        assert_eq!(drag.current(), CanvasPoint::default());
    }

    #[test]
    fn second_press_mid_gesture_keeps_first_anchor() {
        let mut drag = DragState::new();
        drag.begin(CanvasPoint::new(1.0, 1.0), PointerButton::Primary);
        assert!(!drag.begin(CanvasPoint::new(9.0, 9.0), PointerButton::Middle));
        assert_eq!(drag.initial(), CanvasPoint::new(1.0, 1.0));
        drag.cancel();
        assert!(!drag.is_drawing());
    }
}
