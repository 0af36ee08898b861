/// Middleware layer para o Axum router
///
/// - Autenticação de endpoints administrativos (/admin/*)

pub mod admin_auth;

pub use admin_auth::require_admin_key;
