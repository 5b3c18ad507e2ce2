use super::model::ToolMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    Press,
    Drag,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Option<ToolMode>,
    pub event: InteractionEvent,
    pub to: ToolMode,
}

impl StateTransition {
    pub const fn new(from: Option<ToolMode>, event: InteractionEvent, to: ToolMode) -> Self {
        Self { from, event, to }
    }
}
