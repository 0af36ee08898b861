use tracing::{info, warn, error, debug};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_ficha_created(ticket_id: i64, nome: &str) {
    info!("📝 Ficha #{} registrada - Cliente: {}", ticket_id, nome);
}

pub fn log_ficha_updated(ticket_id: i64) {
    info!("✏️ Ficha #{} atualizada", ticket_id);
}

pub fn log_webhook_sent(url: &str, status: u16) {
    info!("📤 Webhook n8n entregue: {} - Status: {}", url, status);
}

pub fn log_webhook_error(url: &str, error: &str) {
    warn!("⚠️ Erro ao enviar webhook n8n ({}): {}", url, error);
}

pub fn log_migration_statement(index: usize, total: usize) {
    debug!("✅ Migração {}/{} executada", index, total);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Ficha de Atendimento starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
