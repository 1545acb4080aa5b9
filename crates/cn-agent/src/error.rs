use thiserror::Error;

use crate::AgentState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    /// The requested transition is not allowed from the agent's current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: AgentState },

    /// Every timetable entry has already been processed.
    #[error("timetable exhausted")]
    TimetableExhausted,
}

pub type AgentResult<T> = Result<T, AgentError>;
