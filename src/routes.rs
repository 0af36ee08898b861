use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    apply_migrations, get_ficha, health_check, ready_check, rate_ficha, render_form,
    search_fichas, submit_ficha,
};
use crate::middleware::require_admin_key;
use crate::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.settings.server.max_body_bytes;

    // Rotas administrativas protegidas com API key
    let admin_routes = Router::new()
        .route("/admin/migrate", post(apply_migrations))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin_key));

    Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))

        // Formulário
        .route("/", get(render_form).post(submit_ficha))
        .route("/buscar", get(search_fichas))
        .route("/buscar/:id", get(get_ficha))
        .route("/avaliar", post(rate_ficha))

        .merge(admin_routes)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
