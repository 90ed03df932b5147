use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board position {0}")]
    InvalidPosition(crate::Position),
}

pub type Result<T> = core::result::Result<T, GameError>;
