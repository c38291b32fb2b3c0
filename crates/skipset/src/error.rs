use skipset_levels::LevelConfigError;
use thiserror::Error;

/// Errors reported by skip set construction and structure checks.
///
/// Lookups and mutations never fail; absence is reported through
/// [`Position::END`](crate::Position::END), `None`, `false` or `0`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipSetError {
    #[error(transparent)]
    Levels(#[from] LevelConfigError),
    #[error("input is not strictly ascending at position {position}")]
    Unsorted { position: usize },
    #[error("level {level} is corrupted: {reason}")]
    Corrupted { level: usize, reason: &'static str },
}
