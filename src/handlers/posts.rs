use crate::error::AppError;
use crate::middleware::PostBody;
use crate::models::Post;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list posts");
        AppError::ListPosts(e)
    })?;

    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    PostBody(fields): PostBody,
) -> Result<String, AppError> {
    tracing::info!(fields = ?fields, "Received post data");

    let id = state.store.create(fields).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create post");
        AppError::CreatePost(e)
    })?;

    tracing::info!(post_id = %id, "Post created");
    Ok(format!("Post criado com o id {}", id))
}

pub async fn replace_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    PostBody(fields): PostBody,
) -> Result<StatusCode, AppError> {
    state.store.replace(&id, fields).await.map_err(|e| {
        tracing::error!(post_id = %id, error = %e, "Failed to replace post");
        AppError::UpdatePost(e)
    })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete(&id).await.map_err(|e| {
        tracing::error!(post_id = %id, error = %e, "Failed to delete post");
        AppError::DeletePost(e)
    })?;

    Ok("Post apagado com sucesso")
}
