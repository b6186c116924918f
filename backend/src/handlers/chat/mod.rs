//! Chat endpoints: conversation listing, history retrieval, and the main
//! chat turn flow with AI reply generation.

#[cfg(test)]
mod tests;

use crate::database::models::Role;
use crate::database::repository::{ChatRepository, MessageRepository};
use crate::database::DbPool;
use crate::providers::ResponseGenerator;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{ChatHistoryResponse, ChatRequest, ChatResponse, ChatSummary, ErrorResponse};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// List all conversations, newest first
pub async fn list_chats(
    State(pool): State<DbPool>,
) -> Result<(StatusCode, Json<Vec<ChatSummary>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("[CHAT] Listing chats");

    match ChatRepository::list(&pool).await {
        Ok(chats) => {
            let summaries: Vec<ChatSummary> = chats.into_iter().map(Into::into).collect();
            Ok((StatusCode::OK, Json(summaries)))
        }
        Err(e) => {
            error!("[CHAT] Failed to list chats: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Internal server error",
                    e.to_string(),
                )),
            ))
        }
    }
}

/// Fetch the message history of one conversation, oldest first
pub async fn get_chat(
    State(pool): State<DbPool>,
    Path(chat_id): Path<i64>,
) -> Result<(StatusCode, Json<ChatHistoryResponse>), (StatusCode, Json<ErrorResponse>)> {
    debug!("[CHAT] Fetching chat {}", chat_id);

    match ChatRepository::find_by_id(&pool, chat_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("[CHAT] Chat not found: {}", chat_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Chat not found")),
            ));
        }
        Err(e) => {
            error!("[CHAT] Failed to fetch chat {}: {}", chat_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Internal server error",
                    e.to_string(),
                )),
            ));
        }
    }

    match MessageRepository::list_for_chat(&pool, chat_id).await {
        Ok(messages) => Ok((
            StatusCode::OK,
            Json(ChatHistoryResponse {
                messages: messages.into_iter().map(Into::into).collect(),
            }),
        )),
        Err(e) => {
            error!("[CHAT] Failed to load messages for chat {}: {}", chat_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Internal server error",
                    e.to_string(),
                )),
            ))
        }
    }
}

/// One chat turn: resolve or create the conversation, persist the user
/// message, generate an assistant reply, persist it, and return both ids.
pub async fn post_chat(
    State(pool): State<DbPool>,
    State(generator): State<Arc<ResponseGenerator>>,
    Json(req): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), (StatusCode, Json<ErrorResponse>)> {
    // Validate before touching the database
    let Some(user_message) = req.message else {
        warn!("[CHAT] Request body missing 'message'");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing 'message'")),
        ));
    };

    info!("[CHAT] New turn (chat_id: {:?})", req.chat_id);

    // Resolve the chat, creating one lazily when the id is absent or stale
    let existing = match req.chat_id {
        Some(chat_id) => match ChatRepository::find_by_id(&pool, chat_id).await {
            Ok(chat) => chat,
            Err(e) => {
                error!("[CHAT] Failed to resolve chat {}: {}", chat_id, e);
                return Err(internal_error(e));
            }
        },
        None => None,
    };

    let chat = match existing {
        Some(chat) => chat,
        None => match ChatRepository::create(&pool, Some(&user_message)).await {
            Ok(chat) => {
                debug!("[CHAT] Created chat {}", chat.id);
                chat
            }
            Err(e) => {
                error!("[CHAT] Failed to create chat: {}", e);
                return Err(internal_error(e));
            }
        },
    };

    if let Err(e) = MessageRepository::append(&pool, chat.id, Role::User, &user_message).await {
        error!("[CHAT] Failed to persist user message: {}", e);
        return Err(internal_error(e));
    }

    let ai_reply = generator.generate(&user_message).await;

    if let Err(e) = MessageRepository::append(&pool, chat.id, Role::Assistant, &ai_reply).await {
        error!("[CHAT] Failed to persist assistant message: {}", e);
        return Err(internal_error(e));
    }

    info!("[CHAT] Turn complete for chat {}", chat.id);

    Ok((
        StatusCode::OK,
        Json(ChatResponse {
            chat_id: chat.id,
            response: ai_reply,
        }),
    ))
}

fn internal_error(e: sqlx::Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::with_details(
            "Internal server error",
            e.to_string(),
        )),
    )
}
