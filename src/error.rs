use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("{field} {reason}")]
    InvalidRequest {
        field: &'static str,
        reason: &'static str,
    },
}

impl RankError {
    /// Machine-readable code surfaced to HTTP clients.
    pub fn code(&self) -> &'static str {
        match self {
            RankError::InvalidRequest { .. } => "invalid_request",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            RankError::InvalidRequest { field, .. } => field,
        }
    }
}
