use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, bounded, unexpected};
use crate::models::messages::Secret;
use tracing::warn;

/// bcrypt only looks at the first 72 bytes of its input.
const MAX_SECRET_BYTES: usize = 72;

pub fn validate_secret(secret: &Secret) -> ServiceResult<()> {
    let len = secret.expose().len();
    if len == 0 || len > MAX_SECRET_BYTES {
        return Err(AppError::MessagesInvalidPasswordLength);
    }
    Ok(())
}

/// Hashes `secret` with the configured cost on the blocking pool.
pub async fn hash<C: Context>(ctx: &C, secret: &Secret) -> ServiceResult<String> {
    let secret = secret.clone();
    let cost = ctx.settings().bcrypt_cost;
    match tokio::task::spawn_blocking(move || bcrypt::hash(secret.expose(), cost)).await {
        Ok(Ok(password_hash)) => Ok(password_hash),
        Ok(Err(e)) => unexpected(e),
        Err(e) => unexpected(e),
    }
}

/// Checks `secret` against the stored hash of an active message.
pub async fn verify<C: Context>(ctx: &C, message_id: i64, secret: &Secret) -> ServiceResult<()> {
    let stored = bounded(
        ctx.settings().query_timeout,
        "fetch_password",
        ctx.messages().fetch_password(message_id),
    )
    .await?;
    let Some(stored) = stored else {
        return Err(AppError::MessagesNotFound);
    };

    let password_hash = stored.into_string();
    let secret = secret.clone();
    let verified =
        tokio::task::spawn_blocking(move || bcrypt::verify(secret.expose(), &password_hash)).await;
    match verified {
        Ok(Ok(true)) => Ok(()),
        Ok(Ok(false)) => Err(AppError::MessagesInvalidPassword),
        Ok(Err(e)) => {
            warn!(message_id, "Stored password hash could not be parsed: {e}");
            Err(AppError::MessagesInvalidPassword)
        }
        Err(e) => unexpected(e),
    }
}
