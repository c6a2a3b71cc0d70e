use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogRequestError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("ResponseRead: {source}")]
    ResponseRead { source: reqwest::Error },

    #[error("Rejected: catalog answered {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody { source: serde_json::Error },
}

impl CatalogRequestError {
    /// Transport trouble, throttling or a server-side error; a later attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestSend { .. } | Self::ResponseRead { .. } => true,
            Self::Rejected { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::DeserializeResponseBody { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: StatusCode) -> CatalogRequestError {
        CatalogRequestError::Rejected {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn server_errors_and_throttling_are_transient() {
        assert!(rejected(StatusCode::BAD_GATEWAY).is_transient());
        assert!(rejected(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(!rejected(StatusCode::FORBIDDEN).is_transient());
    }

    #[test]
    fn malformed_body_is_permanent() {
        let source = serde_json::from_str::<u32>("{").unwrap_err();
        assert!(!CatalogRequestError::DeserializeResponseBody { source }.is_transient());
    }
}
