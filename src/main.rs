/// Ficha de Atendimento: formulário do stand de vendas
///
/// - GET/POST `/` renderiza e grava a ficha (criação ou edição)
/// - `/buscar` e `/avaliar` consultam e avaliam fichas gravadas
/// - Cada gravação é repassada ao webhook do n8n sem bloquear a resposta
///
/// Sem DATABASE_URL o serviço sobe com armazenamento em memória.

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ficha_atendimento::{
    config::Settings,
    routes::build_router,
    services::{AttendanceStore, MemoryAttendanceStore, PgAttendanceStore},
    utils::logging::*,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 🔧 Carregar variáveis de ambiente do arquivo .env (se existir)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Inicializar tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv_loaded {
        tracing::info!("✅ Arquivo .env carregado com sucesso");
    } else {
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Carregar configurações
    let settings = Settings::new().context("Failed to load settings")?;
    log_config_loaded(&settings.environment);

    let store = build_store(&settings).await?;

    let port = settings.server.port;
    let address = format!("{}:{}", settings.server.host, port);

    let state = Arc::new(AppState::new(settings, store).context("Failed to build application state")?);
    if !state.webhook.is_configured() {
        log_warning("⚠️ N8N_WEBHOOK_URL não configurada - fichas não serão repassadas");
    }

    let app = build_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    log_server_startup(port);
    log_server_ready(port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Postgres quando há DATABASE_URL, memória caso contrário
async fn build_store(settings: &Settings) -> anyhow::Result<Arc<dyn AttendanceStore>> {
    let Some(url) = settings.database.url.as_deref() else {
        log_warning("⚠️ DATABASE_URL não configurada - usando armazenamento em memória (dados não persistem)");
        return Ok(Arc::new(MemoryAttendanceStore::new()));
    };

    let store = PgAttendanceStore::connect_lazy(url, &settings.database)
        .context("Failed to configure Postgres pool")?;

    // Migrações aditivas: falha aqui não impede o boot
    match store.migrate().await {
        Ok(report) if report.is_clean() => log_info(&format!(
            "✅ Migrações aplicadas ({}/{})",
            report.executed, report.total
        )),
        Ok(report) => log_warning(&format!(
            "⚠️ Migrações com erros ({}/{}): {:?}",
            report.executed, report.total, report.errors
        )),
        Err(e) => log_error(&format!("❌ Falha ao aplicar migrações no boot: {}", e)),
    }

    Ok(Arc::new(store))
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error(&format!("failed to install Ctrl+C handler: {}", e));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log_error(&format!("failed to install signal handler: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
