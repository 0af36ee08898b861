use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::utils::AppResult;
use crate::AppState;

/// POST /admin/migrate - Reaplica as migrações aditivas (idempotente)
pub async fn apply_migrations(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    log_request_received("/admin/migrate", "POST");

    let report = state.store.migrate().await?;

    log_info(&format!(
        "🗄️ Migrações: {}/{} executadas, {} erro(s)",
        report.executed,
        report.total,
        report.errors.len()
    ));

    Ok(Json(json!({
        "success": report.is_clean(),
        "backend": state.store.backend(),
        "total_statements": report.total,
        "executed": report.executed,
        "errors": report.errors,
        "message": if report.is_clean() {
            "✅ All migrations applied successfully!"
        } else {
            "⚠️ Migrations applied with some warnings"
        }
    })))
}
