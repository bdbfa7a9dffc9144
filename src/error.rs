use thiserror::Error;

/// Failure of a call against the training API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response arrived (network down, CORS, DNS...).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Session expired")]
    Unauthorized { message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Error for a non-success answer. A 401 keeps its body as well.
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    /// Text for the screen: the server's error body when it sent one,
    /// otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Unauthorized { message }
                if !message.trim().is_empty() =>
            {
                message.trim().to_string()
            }
            _ => fallback.to_string(),
        }
    }

    /// True when the request never got an answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// A persisted token that could not be read as a JWT.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not a claims object: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_body() {
        let err = ApiError::Status {
            status: 400,
            message: "Login already taken".to_string(),
        };
        assert_eq!(err.user_message("Failed to create user"), "Login already taken");
    }

    #[test]
    fn test_user_message_blank_body_uses_fallback() {
        let err = ApiError::Status {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message("Failed to load"), "Failed to load");
    }

    #[test]
    fn test_user_message_other_variants_use_fallback() {
        let unauthorized = ApiError::from_status(401, String::new());
        assert_eq!(unauthorized.user_message("x"), "x");
        assert_eq!(ApiError::Decode("bad".into()).user_message("y"), "y");
    }

    #[test]
    fn test_from_status_keeps_unauthorized_body() {
        let err = ApiError::from_status(401, "Wrong password".into());
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.user_message("Invalid login or password"), "Wrong password");

        let err = ApiError::from_status(404, "Not found".into());
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn test_transport_flag() {
        let err = ApiError::from_status(401, String::new());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Session expired");
    }
}
