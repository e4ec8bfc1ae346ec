use crate::error::AppError;
use crate::models::PostDocument;
use axum::async_trait;
use axum::extract::{Form, FromRequest, Json, Request};
use axum::http::header;
use serde_json::Value;
use std::collections::HashMap;

/// Request-body extractor for post documents.
///
/// Accepts both JSON objects and URL-encoded forms: form bodies decode to a
/// flat map of string values, everything else is parsed as a JSON object.
/// Undecodable bodies reject with 400.
#[derive(Debug, Clone)]
pub struct PostBody(pub PostDocument);

#[async_trait]
impl<S> FromRequest<S> for PostBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidBody(e.to_string()))?;

            let fields = fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            Ok(PostBody(fields))
        } else {
            let Json(fields) = Json::<PostDocument>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidBody(e.to_string()))?;
            Ok(PostBody(fields))
        }
    }
}
