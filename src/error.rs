use std::fmt;

/// Failure surfaced by a gateway call. `NotAuthenticated` is raised before
/// any request goes out; the rest map the response or transport outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotAuthenticated,
    Http { status: u16, message: String },
    Network(String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotAuthenticated => write!(f, "User is not authenticated"),
            ApiError::Http { status, message } => {
                if message.is_empty() {
                    write!(f, "Request failed with status {}", status)
                } else {
                    write!(f, "Error {}: {}", status, message)
                }
            }
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_server_message() {
        let err = ApiError::Http {
            status: 422,
            message: "The date field is required".to_string(),
        };
        assert_eq!(err.to_string(), "Error 422: The date field is required");
    }

    #[test]
    fn test_http_error_without_body_falls_back_to_status() {
        let err = ApiError::Http {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "Request failed with status 500");
    }
}
