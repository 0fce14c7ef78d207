use crate::common::error::AppError;
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::warn;

/// A JSON request body whose rejection is reported as [`AppError::DecodingRequestFailed`].
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                Err(AppError::DecodingRequestFailed)
            }
        }
    }
}

/// The `{id}` segment of a message route.
pub struct MessageId(pub i64);

impl<S> FromRequestParts<S> for MessageId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(message_id)) => Ok(Self(message_id)),
            Err(rejection) => {
                warn!("Rejected message id: {}", rejection.body_text());
                Err(AppError::DecodingRequestFailed)
            }
        }
    }
}
