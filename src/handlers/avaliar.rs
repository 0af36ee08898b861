use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::handlers::atendimento::forward_to_webhook;
use crate::models::{now_local, RatingRequest, RatingTarget};
use crate::services::WebhookEvent;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// POST /avaliar - Nota de satisfação (1 a 5) por ticket ou telefone
pub async fn rate_ficha(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RatingRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    log_request_received("/avaliar", "POST");

    let Json(request) = payload
        .map_err(|e| AppError::ValidationError(format!("Dados inválidos: {}", e.body_text())))?;

    let (target, nota, comentario) = request
        .validate(&state.settings.form.country_prefix)
        .map_err(|e| {
            log_validation_error("avaliacao", &e.to_string());
            e
        })?;

    let ticket_id = state
        .store
        .rate(&target, nota, comentario.as_deref(), now_local())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(match &target {
                RatingTarget::Id(id) => format!("Ficha #{} não encontrada.", id),
                RatingTarget::Telefone(_) => "Nenhuma ficha encontrada para este telefone.".to_string(),
            })
        })?;

    log_info(&format!("⭐ Ficha #{} avaliada com nota {}", ticket_id, nota));

    forward_to_webhook(&state, ticket_id, WebhookEvent::Avaliacao).await;

    Ok(Json(json!({
        "success": true,
        "ticket_id": ticket_id,
        "message": "Avaliação registrada. Obrigado!"
    })))
}
