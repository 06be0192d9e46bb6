use thiserror::Error;

/// Result alias for race operations.
pub type RaceResult<T> = Result<T, RaceError>;

/// Errors raised when a race is set up or driven incorrectly.
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("a race needs at least one car")]
    EmptyLineup,
    #[error("move probability must lie strictly between 0 and 1, got {0}")]
    InvalidProbability(f64),
    #[error("no race has been initialized")]
    NoActiveRace,
    #[error("invalid race config: {0}")]
    Config(#[from] serde_json::Error),
}
