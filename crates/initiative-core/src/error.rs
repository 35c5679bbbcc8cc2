use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitiativeError {
    #[error("action not found: {0}")]
    ActionNotFound(String),

    #[error("unknown action id: {0}")]
    UnknownAction(u32),

    #[error("invalid duration {0}: must be greater than zero")]
    InvalidDuration(u32),

    #[error("invalid die in '{0}': a die needs at least one side")]
    InvalidDieSides(String),

    #[error("too many dice: {0} (limit is {max})", max = crate::dice::MAX_ROLL_COUNT)]
    TooManyDice(u32),

    #[error("config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, InitiativeError>;
