/// Middleware de autenticação para endpoints administrativos
///
/// Valida o header `X-Admin-Key` contra `ADMIN_API_KEY` (carregada em
/// `Settings.admin.api_key`).
///
/// - Key configurada: precisa bater, senão 401.
/// - Key ausente em desenvolvimento: libera com warning no log.
/// - Key ausente em produção (`RUN_MODE=production`): 503.
///
/// ```bash
/// curl -X POST -H "X-Admin-Key: $ADMIN_API_KEY" http://localhost:5000/admin/migrate
/// ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::AppState;

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    Granted,
    GrantedUnprotected,
    Denied,
    Misconfigured,
}

/// Decide o acesso sem efeitos colaterais
pub fn authorize(expected: Option<&str>, provided: Option<&str>, is_production: bool) -> AdminAccess {
    match (expected, provided, is_production) {
        (Some(expected), Some(provided), _) if constant_time_eq(expected.as_bytes(), provided.as_bytes()) => {
            AdminAccess::Granted
        }
        (Some(_), _, _) => AdminAccess::Denied,
        (None, _, false) => AdminAccess::GrantedUnprotected,
        (None, _, true) => AdminAccess::Misconfigured,
    }
}

pub async fn require_admin_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let provided = headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok());
    let expected = state.settings.admin.api_key.as_deref();

    match authorize(expected, provided, state.settings.is_production()) {
        AdminAccess::Granted => {
            tracing::debug!("✅ Admin access granted");
            next.run(request).await
        }
        AdminAccess::GrantedUnprotected => {
            tracing::warn!(
                "⚠️  ADMIN_API_KEY not configured - Allowing access in development mode. \
                 Configure ADMIN_API_KEY in production!"
            );
            next.run(request).await
        }
        AdminAccess::Denied => {
            tracing::warn!(
                "❌ Admin access denied - Invalid or missing X-Admin-Key: {:?}",
                provided.map(|_| "<redacted>")
            );
            error_response(StatusCode::UNAUTHORIZED, "Missing or invalid X-Admin-Key header")
        }
        AdminAccess::Misconfigured => {
            tracing::error!("🚨 ADMIN_API_KEY not configured in production! Blocking admin access.");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "ADMIN_API_KEY not configured on server")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "message": message,
        })),
    )
        .into_response()
}

// Comparação de tempo constante para evitar timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_with_configured_key() {
        assert_eq!(authorize(Some("k-123"), Some("k-123"), true), AdminAccess::Granted);
        assert_eq!(authorize(Some("k-123"), Some("errada"), false), AdminAccess::Denied);
        assert_eq!(authorize(Some("k-123"), None, false), AdminAccess::Denied);
    }

    #[test]
    fn test_authorize_without_configured_key() {
        assert_eq!(authorize(None, None, false), AdminAccess::GrantedUnprotected);
        assert_eq!(authorize(None, Some("qualquer"), true), AdminAccess::Misconfigured);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
