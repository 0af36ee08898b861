use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::Instant;

use crate::models::{now_local, AttendanceSubmission};
use crate::services::{WebhookEvent, WebhookPayload};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// POST / - Cria a ficha, ou edita quando o corpo traz `id`/`ticket_id`
pub async fn submit_ficha(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AttendanceSubmission>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let start_time = Instant::now();
    log_request_received("/", "POST");

    let Json(submission) = payload.map_err(|e| {
        log_validation_error("body", &e.body_text());
        AppError::ValidationError(format!("Dados inválidos: {}", e.body_text()))
    })?;

    let ticket = submission.id;
    let fields = submission
        .validate(&state.settings.form.country_prefix)
        .map_err(|e| {
            log_validation_error("ficha", &e.to_string());
            e
        })?;

    let (ticket_id, evento, message) = match ticket {
        Some(id) => {
            if !state.store.update(id, &fields, now_local()).await? {
                return Err(AppError::NotFound(format!("Ficha #{} não encontrada.", id)));
            }
            log_ficha_updated(id);
            (id, WebhookEvent::FichaAtualizada, "Ficha atualizada com sucesso!")
        }
        None => {
            let id = state.store.insert(&fields, now_local()).await?;
            log_ficha_created(id, &fields.nome_cliente);
            (id, WebhookEvent::NovaFicha, "Atendimento registrado com sucesso!")
        }
    };

    forward_to_webhook(&state, ticket_id, evento).await;

    let processing_time = start_time.elapsed().as_millis() as u64;
    log_request_processed("/", 200, processing_time);

    Ok(Json(json!({
        "success": true,
        "ticket_id": ticket_id,
        "message": message
    })))
}

/// Best-effort: recarrega a ficha gravada e dispara o webhook sem esperar
pub(crate) async fn forward_to_webhook(state: &AppState, ticket_id: i64, evento: WebhookEvent) {
    if !state.webhook.is_configured() {
        return;
    }

    match state.store.find_by_id(ticket_id).await {
        Ok(Some(record)) => state
            .webhook
            .dispatch(WebhookPayload::from_record(evento, &record)),
        Ok(None) => log_warning(&format!("⚠️ Ficha #{} sumiu antes do webhook", ticket_id)),
        Err(e) => log_warning(&format!(
            "⚠️ Não foi possível recarregar a ficha #{} para o webhook: {}",
            ticket_id, e
        )),
    }
}
