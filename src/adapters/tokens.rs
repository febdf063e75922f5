use {
    super::api_errors::ApiError,
    crate::AppState,
    crate::domain::token::CardToken,
    crate::services::tokens::StoreCardTokensCommand,
    axum::{
        Json,
        extract::{Path, State},
    },
};

pub async fn store_tokens_handler(
    State(state): State<AppState>,
    Json(command): Json<StoreCardTokensCommand>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.store_card_tokens(command).await?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

pub async fn list_tokens_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CardToken>>, ApiError> {
    let tokens = state.service.card_tokens(&user_id).await?;
    Ok(Json(tokens))
}
