//! Funções de normalização dos campos da ficha
//!
//! Telefones viram formato internacional, flags aceitam as várias grafias
//! que o formulário envia e textos livres são comparados sem acentos.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::error::{AppError, AppResult};

/// Grafias aceitas como "verdadeiro" (comparação case-insensitive)
pub const TRUTHY_TOKENS: &[&str] = &["true", "1", "sim", "s", "yes", "y", "on", "checked", "x"];

/// Remove tudo que não for dígito ASCII
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normaliza telefone para o formato internacional
///
/// Aceita números locais de 10 ou 11 dígitos (DDD + número) e prefixa o
/// código do país. Qualquer outra quantidade de dígitos é inválida, inclusive
/// um número que já traga o prefixo.
///
/// # Exemplos
/// ```
/// use ficha_atendimento::utils::normalization::normalize_phone;
///
/// assert_eq!(normalize_phone("(62) 99876-5432", "55").unwrap(), "5562998765432");
/// assert_eq!(normalize_phone("62 3212-0000", "55").unwrap(), "556232120000");
/// assert!(normalize_phone("12345", "55").is_err());
/// assert!(normalize_phone("5562998765432", "55").is_err());
/// ```
pub fn normalize_phone(raw: &str, country_prefix: &str) -> AppResult<String> {
    let digits = digits_only(raw);

    match digits.len() {
        10 | 11 => Ok(format!("{}{}", country_prefix, digits)),
        _ => Err(AppError::ValidationError(format!(
            "Telefone inválido: informe DDD + número (10 ou 11 dígitos), recebido '{}'.",
            raw.trim()
        ))),
    }
}

/// Dígitos locais (DDD + número) de um telefone já normalizado.
///
/// Usado ao recarregar a ficha no formulário, para que o telefone volte a
/// passar por `normalize_phone` ao salvar.
pub fn local_phone_digits(stored: &str, country_prefix: &str) -> String {
    let digits = digits_only(stored);
    match digits.strip_prefix(country_prefix) {
        Some(local) if !country_prefix.is_empty() && matches!(local.len(), 10 | 11) => local.to_string(),
        _ => digits,
    }
}

/// Converte o valor de um checkbox/select em booleano
///
/// # Exemplos
/// ```
/// use ficha_atendimento::utils::normalization::parse_bool_flag;
///
/// assert!(parse_bool_flag(Some("Sim")));
/// assert!(parse_bool_flag(Some(" ON ")));
/// assert!(!parse_bool_flag(Some("não")));
/// assert!(!parse_bool_flag(None));
/// ```
pub fn parse_bool_flag(input: Option<&str>) -> bool {
    match input {
        Some(value) => {
            let value = value.trim().to_lowercase();
            TRUTHY_TOKENS.contains(&value.as_str())
        }
        None => false,
    }
}

/// Adaptador serde: aceita bool, número ou string e aplica `parse_bool_flag`.
/// Campo ausente ou `null` continua `None` (importante para updates parciais).
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => Some(parse_bool_flag(Some(&n.to_string()))),
        Some(Value::String(s)) => Some(parse_bool_flag(Some(&s))),
        Some(_) => Some(false),
    })
}

/// Remove espaços das pontas; string vazia vira `None`
pub fn blank_to_none(input: Option<String>) -> Option<String> {
    input
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Remove acentos, converte para lowercase e colapsa espaços (NFKD)
///
/// ```
/// use ficha_atendimento::utils::normalization::normalize_text;
///
/// assert_eq!(normalize_text("  João   Araújo "), "joao araujo");
/// ```
pub fn normalize_text(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
