use super::error::{StateError, StateResult};
use super::{event::StateTransition, InteractionEvent, ToolMode};

#[derive(Debug, Clone, Default)]
pub struct InteractionMachine {
    mode: ToolMode,
    last_transition: Option<StateTransition>,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self {
            mode: ToolMode::default(),
            last_transition: None,
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn last_transition(&self) -> Option<StateTransition> {
        self.last_transition
    }

    pub fn can_transition(&self, event: InteractionEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: InteractionEvent) -> Option<ToolMode> {
        use InteractionEvent::*;
        match (self.mode, event) {
            (ToolMode::Ready, Press) => Some(ToolMode::Drawing),
            (ToolMode::Drawing, Drag) => Some(ToolMode::Drawing),
            (ToolMode::Drawing, Release) => Some(ToolMode::Ready),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: InteractionEvent) -> StateResult<ToolMode> {
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.mode;
            tracing::debug!(from = ?from, event = ?event, "ignored tool transition");
            StateError::InvalidStateTransition { from, event }
        })?;

        self.last_transition = Some(StateTransition::new(Some(self.mode), event, next));
        self.mode = next;
        Ok(self.mode)
    }

    /// Forces the machine back to `Ready`, as when a tool is swapped mid-gesture.
    pub fn reset(&mut self) {
        self.mode = ToolMode::Ready;
        self.last_transition = None;
    }
}

impl std::fmt::Display for InteractionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ToolMode::{:?}", self.mode)
    }
}
