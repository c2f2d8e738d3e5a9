use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guestbook_log::GuestbookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] guestbook_store::StoreError),

    #[error("notifier error: {0}")]
    Notifier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A guestbook failure on its way back to an HTTP caller.
#[derive(Debug)]
pub struct ApiError(pub GuestbookError);

impl From<GuestbookError> for ApiError {
    fn from(e: GuestbookError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GuestbookError::EmptyDrawing
            | GuestbookError::MissingSecret
            | GuestbookError::MissingIndex
            | GuestbookError::InvalidIndex(_)
            | GuestbookError::IndexOutOfBounds { .. } => StatusCode::BAD_REQUEST,
            GuestbookError::InvalidSecret => StatusCode::FORBIDDEN,
            GuestbookError::EmptyLog => StatusCode::NOT_FOUND,
            GuestbookError::Blocked => StatusCode::SERVICE_UNAVAILABLE,
            GuestbookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            GuestbookError::Store(e) => {
                tracing::error!(error = %e, "storage failure while handling request");
                "Internal server error".to_string()
            }
            // Blocked submitters get nothing that tells them why.
            GuestbookError::Blocked => "Service temporarily unavailable".to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
