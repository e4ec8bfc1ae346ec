use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error type.
///
/// The route variants carry the fixed plain-text message this API returns to
/// callers; the underlying store/upstream error travels as the source and is
/// logged at the handler, never surfaced in the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro ao obter posts.")]
    ListPosts(#[source] anyhow::Error),

    #[error("Erro ao criar post.")]
    CreatePost(#[source] anyhow::Error),

    #[error("Erro ao atualizar post.")]
    UpdatePost(#[source] anyhow::Error),

    #[error("Erro ao apagar post.")]
    DeletePost(#[source] anyhow::Error),

    #[error("Erro ao obter dados da API.")]
    Quote(#[source] anyhow::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Database error: {0}")]
    Database(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            // Startup-path errors should never reach a handler; if one does,
            // keep the body generic.
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, message).into_response()
    }
}
