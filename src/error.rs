use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// The resource does not exist upstream (unknown account, expired match).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure, 5xx, or a rate limit that recurred after the courtesy wait.
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Player is not currently in a game: {0}")]
    NotInGame(String),

    #[error("Player {0} is not a participant of this game")]
    SelfNotInGame(String),

    #[error("Scouting was cancelled")]
    Cancelled,

    #[error("Invalid Riot ID format. Use format: Name#TAG")]
    InvalidRiotId,

    #[error("No ranked games found for this player")]
    NoRankedGames,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Coach error: {0}")]
    CoachError(String),
}

impl AppError {
    /// Errors that describe an unreachable or misbehaving remote, as opposed to
    /// a definitive answer such as "does not exist".
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, AppError::RemoteUnavailable(_) | AppError::JsonError(_))
    }
}
