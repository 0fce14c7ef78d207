use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, bounded};
use crate::entities::messages::{CreateMessageArgs, UpdateMessageArgs};
use crate::models::messages::{
    ChangePasswordRequest, CreateMessageRequest, DeleteMessageRequest, Message,
    UpdateMessageRequest,
};
use crate::usecases::credentials;
use std::net::IpAddr;
use tracing::info;

const NAME_MAX_LENGTH: usize = 64;
const MESSAGE_MAX_LENGTH: usize = 2000;

/// Returns the trimmed name and body, which is what gets stored.
fn validate_content<'a>(name: &'a str, message: &'a str) -> ServiceResult<(&'a str, &'a str)> {
    let name = name.trim();
    let name_length = name.chars().count();
    if name_length == 0 || name_length > NAME_MAX_LENGTH {
        return Err(AppError::MessagesInvalidNameLength);
    }

    let message = message.trim();
    let message_length = message.chars().count();
    if message_length == 0 || message_length > MESSAGE_MAX_LENGTH {
        return Err(AppError::MessagesInvalidContentLength);
    }
    Ok((name, message))
}

pub async fn create<C: Context>(
    ctx: &C,
    author_ip: IpAddr,
    args: CreateMessageRequest,
) -> ServiceResult<i64> {
    let (name, message) = validate_content(&args.name, &args.message)?;
    credentials::validate_secret(&args.password)?;

    let password_hash = credentials::hash(ctx, &args.password).await?;
    let author_ip = author_ip.to_string();
    let message_id = bounded(
        ctx.settings().query_timeout,
        "create",
        ctx.messages().create(CreateMessageArgs {
            name,
            password_hash: &password_hash,
            message,
            author_ip: &author_ip,
        }),
    )
    .await?;

    info!(message_id, author_ip = %author_ip, "Message created");
    Ok(message_id)
}

pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<Message>> {
    let messages = bounded(
        ctx.settings().query_timeout,
        "fetch_all",
        ctx.messages().fetch_all(),
    )
    .await?;
    Ok(messages.into_iter().map(Message::from).collect())
}

pub async fn fetch_one<C: Context>(ctx: &C, message_id: i64) -> ServiceResult<Message> {
    let message = bounded(
        ctx.settings().query_timeout,
        "fetch_one",
        ctx.messages().fetch_one(message_id),
    )
    .await?;
    match message {
        Some(message) => Ok(Message::from(message)),
        None => Err(AppError::MessagesNotFound),
    }
}

/// Rewrites name, body and author address. The stored password hash is
/// left as is; rotating it goes through [`change_password`].
pub async fn update<C: Context>(
    ctx: &C,
    message_id: i64,
    author_ip: IpAddr,
    args: UpdateMessageRequest,
) -> ServiceResult<()> {
    let (name, message) = validate_content(&args.name, &args.message)?;
    credentials::verify(ctx, message_id, &args.password).await?;

    let author_ip = author_ip.to_string();
    let rows_affected = bounded(
        ctx.settings().query_timeout,
        "update",
        ctx.messages().update(
            message_id,
            UpdateMessageArgs {
                name,
                message,
                author_ip: &author_ip,
            },
        ),
    )
    .await?;
    if rows_affected == 0 {
        return Err(AppError::MessagesNotFound);
    }

    info!(message_id, author_ip = %author_ip, "Message updated");
    Ok(())
}

pub async fn change_password<C: Context>(
    ctx: &C,
    message_id: i64,
    args: ChangePasswordRequest,
) -> ServiceResult<()> {
    credentials::validate_secret(&args.new_password)?;
    credentials::verify(ctx, message_id, &args.password).await?;

    let password_hash = credentials::hash(ctx, &args.new_password).await?;
    let rows_affected = bounded(
        ctx.settings().query_timeout,
        "update_password",
        ctx.messages().update_password(message_id, &password_hash),
    )
    .await?;
    if rows_affected == 0 {
        return Err(AppError::MessagesNotFound);
    }

    info!(message_id, "Message password changed");
    Ok(())
}

/// Soft-deletes an active message. When two deletes race, the store lets
/// only one of them flip `deleted_at`; the other sees no affected rows.
pub async fn delete<C: Context>(
    ctx: &C,
    message_id: i64,
    args: DeleteMessageRequest,
) -> ServiceResult<()> {
    credentials::verify(ctx, message_id, &args.password).await?;

    let rows_affected = bounded(
        ctx.settings().query_timeout,
        "soft_delete",
        ctx.messages().soft_delete(message_id),
    )
    .await?;
    if rows_affected == 0 {
        return Err(AppError::MessagesNotFound);
    }

    info!(message_id, "Message deleted");
    Ok(())
}
