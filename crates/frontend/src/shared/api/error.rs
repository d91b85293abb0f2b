use contracts::shared::server_errors::ServerErrors;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found")]
    NotFound,

    #[error("{}", http_message(.status, .errors))]
    Http { status: u16, errors: ServerErrors },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Could not encode request: {0}")]
    Encode(String),
}

fn http_message(status: impl std::fmt::Display, errors: &ServerErrors) -> String {
    if errors.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, errors.summary())
    }
}

impl ApiError {
    /// Server-side validation errors, if this is a rejected write
    pub fn server_errors(&self) -> Option<&ServerErrors> {
        match self {
            ApiError::Http { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NotFound => Some(404),
            _ => None,
        }
    }

    /// True when the current user may not perform the request
    pub fn is_forbidden(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_includes_server_errors() {
        let err = ApiError::Http {
            status: 400,
            errors: ServerErrors::parse(r#"{"name": ["Required"]}"#),
        };
        assert_eq!(err.to_string(), "HTTP 400: name: Required");

        let bare = ApiError::Http {
            status: 500,
            errors: ServerErrors::default(),
        };
        assert_eq!(bare.to_string(), "HTTP 500");
    }

    #[test]
    fn test_forbidden() {
        let err = ApiError::Http {
            status: 403,
            errors: ServerErrors::default(),
        };
        assert!(err.is_forbidden());
        assert!(!ApiError::NotFound.is_forbidden());
        assert_eq!(ApiError::NotFound.status(), Some(404));
    }
}
