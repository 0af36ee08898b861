use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub webhook: WebhookSettings,
    pub form: FormSettings,
    #[serde(default)]
    pub admin: AdminSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,  // Foto + assinatura em base64 passam fácil de 2MB
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebhookSettings {
    pub url: Option<String>,  // N8N_WEBHOOK_URL
    pub timeout_seconds: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AdminSettings {
    pub api_key: Option<String>,  // ADMIN_API_KEY
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FormSettings {
    pub empreendimentos: Vec<String>,
    pub country_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 5000,
                max_body_bytes: 10 * 1024 * 1024,
            },
            database: DatabaseSettings {
                url: None,
                max_connections: 5,
                acquire_timeout_seconds: 5,
            },
            webhook: WebhookSettings {
                url: None,
                timeout_seconds: 5,
            },
            form: FormSettings {
                empreendimentos: default_empreendimentos(),
                country_prefix: "55".to_string(),
            },
            admin: AdminSettings::default(),
        }
    }
}

fn default_empreendimentos() -> Vec<String> {
    [
        "Lançamento - Reserva do Bosque",
        "Lançamento - Altavista Premium",
        "Residencial Araguaia (Disponível)",
        "Jardim dos Ipês (> 10 Lotes)",
        "Vale do Sol (> 10 Lotes)",
        "Outros",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Settings {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("environment", run_mode.clone())?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("server.max_body_bytes", defaults.server.max_body_bytes as i64)?
            .set_default("database.max_connections", defaults.database.max_connections as i64)?
            .set_default("database.acquire_timeout_seconds", defaults.database.acquire_timeout_seconds as i64)?
            .set_default("webhook.timeout_seconds", defaults.webhook.timeout_seconds as i64)?
            .set_default("form.empreendimentos", defaults.form.empreendimentos)?
            .set_default("form.country_prefix", defaults.form.country_prefix)?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // FICHA__DATABASE__MAX_CONNECTIONS=10 etc.
            .add_source(Environment::with_prefix("FICHA").separator("__"));

        // Variáveis "clássicas" do deploy têm precedência
        if let Some(url) = non_empty_env("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
        if let Some(url) = non_empty_env("N8N_WEBHOOK_URL") {
            builder = builder.set_override("webhook.url", url)?;
        }
        if let Some(key) = non_empty_env("ADMIN_API_KEY") {
            builder = builder.set_override("admin.api_key", key)?;
        }
        if let Some(port) = non_empty_env("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        let s = builder.build()?;

        s.try_deserialize()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_boot_without_files() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.form.country_prefix, "55");
        assert!(settings.database.url.is_none());
        assert!(settings.webhook.url.is_none());
        assert!(!settings.is_production());
        assert!(settings.form.empreendimentos.contains(&"Outros".to_string()));
    }
}
