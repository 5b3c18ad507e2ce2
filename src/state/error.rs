use super::event::InteractionEvent;
use super::model::ToolMode;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("invalid tool transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: ToolMode,
        event: InteractionEvent,
    },
}
