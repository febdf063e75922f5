use {
    super::api_errors::ApiError,
    crate::AppState,
    crate::domain::transaction::ProviderNotification,
    axum::{Json, extract::State},
};

/// Inbound provider webhook. Returning an error here makes the provider's
/// delivery mechanism redeliver; the processor is idempotent under that.
pub async fn notification_handler(
    State(state): State<AppState>,
    Json(notification): Json<ProviderNotification>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.handle_notification(notification).await?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}
