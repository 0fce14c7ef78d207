use crate::api::RequestContext;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::common::extract::{JsonBody, MessageId};
use crate::common::state::AppState;
use crate::models::messages::{
    AcknowledgeResponse, ChangePasswordRequest, CreateMessageRequest, CreateMessageResponse,
    DeleteMessageRequest, Message, UpdateMessageRequest,
};
use crate::usecases::messages;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

pub async fn create(
    ctx: RequestContext,
    JsonBody(args): JsonBody<CreateMessageRequest>,
) -> ServiceResult<(StatusCode, Json<CreateMessageResponse>)> {
    let id = messages::create(&ctx, ctx.request_ip.ip_addr, args).await?;
    Ok((StatusCode::CREATED, Json(CreateMessageResponse { id })))
}

pub async fn fetch_all(State(state): State<AppState>) -> ServiceResponse<Vec<Message>> {
    let messages = messages::fetch_all(&state).await?;
    Ok(Json(messages))
}

pub async fn fetch_one(
    State(state): State<AppState>,
    MessageId(message_id): MessageId,
) -> ServiceResponse<Message> {
    let message = messages::fetch_one(&state, message_id).await?;
    Ok(Json(message))
}

pub async fn update(
    ctx: RequestContext,
    MessageId(message_id): MessageId,
    JsonBody(args): JsonBody<UpdateMessageRequest>,
) -> ServiceResponse<AcknowledgeResponse> {
    messages::update(&ctx, message_id, ctx.request_ip.ip_addr, args).await?;
    Ok(Json(AcknowledgeResponse::new("Message updated successfully")))
}

pub async fn change_password(
    State(state): State<AppState>,
    MessageId(message_id): MessageId,
    JsonBody(args): JsonBody<ChangePasswordRequest>,
) -> ServiceResponse<AcknowledgeResponse> {
    messages::change_password(&state, message_id, args).await?;
    Ok(Json(AcknowledgeResponse::new(
        "Message password changed successfully",
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    MessageId(message_id): MessageId,
    JsonBody(args): JsonBody<DeleteMessageRequest>,
) -> ServiceResponse<AcknowledgeResponse> {
    messages::delete(&state, message_id, args).await?;
    Ok(Json(AcknowledgeResponse::new("Message deleted successfully")))
}
