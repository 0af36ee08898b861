use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "ficha-atendimento",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    log_health_check();

    // Testa a conexão com o armazenamento
    let (database_status, error) = match state.store.ping().await {
        Ok(_) => ("connected", None),
        Err(e) => ("disconnected", Some(e.to_string())),
    };

    let ready = error.is_none();

    let response = json!({
        "ready": ready,
        "service": "ficha-atendimento",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.settings.environment,
        "dependencies": {
            "database": {
                "backend": state.store.backend(),
                "status": database_status,
                "error": error
            },
            "webhook": {
                "configured": state.webhook.is_configured()
            }
        }
    });

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
