/// Failure reading from the remote order service.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("order service responded with status {0}")]
    Status(u16),

    #[error("malformed order payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Collapses the error to its kind, for store snapshots and assertions.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Status(_) => FetchErrorKind::Status,
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Status,
    Parse,
}

/// Failure creating an order. `InvalidItemCount` and `InFlight` are rejected
/// before any network write happens.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("order service responded with status {0}")]
    Status(u16),

    #[error("item count must be at least 1, got {0}")]
    InvalidItemCount(u32),

    #[error("another submission is already in flight")]
    InFlight,
}
