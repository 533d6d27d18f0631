use thiserror::Error;

use crate::timer::TimerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollapseError {
    /// Completion cannot be signalled without a timer
    #[error("cannot arm completion timer: {0}")]
    Timer(#[from] TimerError),
}

pub type Result<T> = std::result::Result<T, CollapseError>;
