use axum::http::StatusCode;
use mongodb::error::ErrorKind;
use thiserror::Error;

use super::{impl_into_response, AppError};

/// Errors returned by the collection accessor.
///
/// `InvalidArgument` is always raised locally, before the store is contacted. The other
/// two variants wrap the driver error untouched; they differ only in whether the store
/// could be reached at all.
#[derive(Error, Debug)]
pub enum AccessorError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Document store unavailable: {source}")]
    StoreUnavailable {
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Document store error: {source}")]
    Store {
        #[source]
        source: mongodb::error::Error,
    },
}

impl From<mongodb::error::Error> for AccessorError {
    fn from(source: mongodb::error::Error) -> Self {
        let unreachable = matches!(
            *source.kind,
            ErrorKind::ServerSelection { .. }
                | ErrorKind::Io { .. }
                | ErrorKind::ConnectionPoolCleared { .. }
                | ErrorKind::DnsResolve { .. }
        );

        if unreachable {
            Self::StoreUnavailable { source }
        } else {
            Self::Store { source }
        }
    }
}

impl AppError for AccessorError {
    fn status_code(&self) -> StatusCode {
        match self {
            AccessorError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            AccessorError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AccessorError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            AccessorError::InvalidArgument { message } => message.clone(),
            AccessorError::StoreUnavailable { .. } => {
                "The document store is unavailable".to_string()
            }
            AccessorError::Store { .. } => "The document store rejected the request".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AccessorError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            AccessorError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            AccessorError::Store { .. } => "STORE_ERROR",
        }
    }
}

impl_into_response!(AccessorError);

impl AccessorError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AccessorError::InvalidArgument { .. })
    }
}
