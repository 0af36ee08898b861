// Biblioteca da Ficha de Atendimento
// Expõe módulos para uso em testes e no binário

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub store: Arc<dyn services::AttendanceStore>,
    pub webhook: services::WebhookNotifier,
}

impl AppState {
    pub fn new(
        settings: config::Settings,
        store: Arc<dyn services::AttendanceStore>,
    ) -> utils::AppResult<Self> {
        let webhook = services::WebhookNotifier::new(&settings.webhook)?;
        Ok(Self {
            settings,
            store,
            webhook,
        })
    }
}
