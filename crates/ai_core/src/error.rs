//! Generation errors

use thiserror::Error;

/// Errors that can occur while calling the remote generator
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credential configured
    #[error("Missing API credentials")]
    MissingCredentials,

    /// Non-success HTTP status
    #[error("Status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Connection or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded its deadline
    #[error("Request timed out")]
    Timeout,
}

impl GenerationError {
    /// Short stable label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::Status { .. } => "status",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Transport(_) => "transport",
            Self::Timeout => "timeout",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            GenerationError::MissingCredentials.kind(),
            GenerationError::Status {
                status: 500,
                body: String::new(),
            }
            .kind(),
            GenerationError::MalformedResponse(String::new()).kind(),
            GenerationError::Transport(String::new()).kind(),
            GenerationError::Timeout.kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn status_display_includes_body() {
        let err = GenerationError::Status {
            status: 401,
            body: "invalid key".to_string(),
        };
        assert_eq!(err.to_string(), "Status 401: invalid key");
    }
}
