use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::config::settings::WebhookSettings;
use crate::models::{AttendanceRecord, TIMESTAMP_FORMAT};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
    NovaFicha,
    FichaAtualizada,
    Avaliacao,
}

/// Resumo enviado ao n8n. Foto e assinatura ficam de fora (base64 pesado).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    pub evento: WebhookEvent,
    pub ticket_id: i64,
    pub data_hora: String,
    pub nome_cliente: String,
    pub telefone: String,
    pub cidade: Option<String>,
    pub instagram: Option<String>,
    pub empreendimento: Option<String>,
    pub comprou_1o_lote: Option<String>,
    pub interesse: Option<String>,
    pub observacoes: Option<String>,
    pub visitou_stand: bool,
    pub possui_corretor: bool,
    pub nome_corretor: Option<String>,
    pub lista_transmissao: bool,
    pub quadra: Option<String>,
    pub lote: Option<String>,
    pub origem_lead: Option<String>,
    pub avaliacao: Option<i32>,
}

impl WebhookPayload {
    pub fn from_record(evento: WebhookEvent, record: &AttendanceRecord) -> Self {
        Self {
            evento,
            ticket_id: record.id,
            data_hora: record.data_hora.format(TIMESTAMP_FORMAT).to_string(),
            nome_cliente: record.nome_cliente.clone(),
            telefone: record.telefone.clone(),
            cidade: record.cidade.clone(),
            instagram: record.instagram.clone(),
            empreendimento: record.empreendimento.clone(),
            comprou_1o_lote: record.comprou_1o_lote.clone(),
            interesse: record.interesse.clone(),
            observacoes: record.observacoes.clone(),
            visitou_stand: record.visitou_stand,
            possui_corretor: record.possui_corretor,
            nome_corretor: record.nome_corretor.clone(),
            lista_transmissao: record.lista_transmissao,
            quadra: record.pre_contrato.quadra.clone(),
            lote: record.pre_contrato.lote.clone(),
            origem_lead: record.pre_contrato.origem_lead.clone(),
            avaliacao: record.avaliacao,
        }
    }
}

/// Encaminhamento best-effort para o webhook do n8n
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    /// Falha se o cliente HTTP não puder ser montado com o timeout configurado
    pub fn new(settings: &WebhookSettings) -> AppResult<Self> {
        let timeout = Duration::from_secs(settings.timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(3)))
            .build()
            .map_err(|e| {
                log_error(&format!("❌ Falha ao criar cliente HTTP do webhook: {}", e));
                e
            })?;

        let url = settings.url.clone().filter(|u| !u.trim().is_empty());
        match &url {
            Some(url) => log_info(&format!("🔗 Webhook n8n configurado: {}", url)),
            None => log_info("ℹ️ N8N_WEBHOOK_URL não configurada - encaminhamento desabilitado"),
        }

        Ok(Self { client, url })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Envia e devolve o status HTTP. Erro em falha de rede ou status não-2xx.
    pub async fn send(&self, payload: &WebhookPayload) -> AppResult<u16> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::ConfigError("N8N_WEBHOOK_URL não configurada".to_string()))?;

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();

        if status.is_success() {
            log_webhook_sent(url, status.as_u16());
            Ok(status.as_u16())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::WebhookError(format!("status {}: {}", status, body)))
        }
    }

    /// Dispara em background; o resultado só vai para o log
    pub fn dispatch(&self, payload: WebhookPayload) {
        let Some(url) = self.url.clone() else {
            tracing::debug!("Webhook não configurado, ficha #{} não encaminhada", payload.ticket_id);
            return;
        };

        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send(&payload).await {
                log_webhook_error(&url, &e.to_string());
            }
        });
    }
}
