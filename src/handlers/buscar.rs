use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::AttendanceRecord;
use crate::utils::logging::*;
use crate::utils::normalization::local_phone_digits;
use crate::utils::{AppError, AppResult};
use crate::AppState;

const DEFAULT_SEARCH_LIMIT: i64 = 20;
const MAX_SEARCH_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

/// Ficha gravada mais os telefones sem o código do país
#[derive(Debug, Serialize)]
pub struct FichaLookup {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub telefones_locais: BTreeMap<&'static str, String>,
}

impl FichaLookup {
    pub fn new(record: AttendanceRecord, country_prefix: &str) -> Self {
        let mut telefones_locais = BTreeMap::new();
        telefones_locais.insert("telefone", local_phone_digits(&record.telefone, country_prefix));

        let referencias = [
            ("referencia1_telefone", &record.pre_contrato.referencia1_telefone),
            ("referencia2_telefone", &record.pre_contrato.referencia2_telefone),
        ];
        for (campo, telefone) in referencias {
            if let Some(telefone) = telefone {
                telefones_locais.insert(campo, local_phone_digits(telefone, country_prefix));
            }
        }

        Self {
            record,
            telefones_locais,
        }
    }
}

/// GET /buscar/:id - Devolve a ficha gravada para reidratar o formulário
///
/// Além das colunas, traz `telefones_locais` (sem o código do país), que são
/// os valores que o formulário reenvia ao salvar.
pub async fn get_ficha(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<FichaLookup>> {
    log_request_received("/buscar/:id", "GET");

    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| AppError::ValidationError(format!("Identificador inválido: '{}'.", id)))?;

    let record = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ficha #{} não encontrada.", id)))?;

    Ok(Json(FichaLookup::new(record, &state.settings.form.country_prefix)))
}

/// GET /buscar?q=termo - Busca por nome, telefone ou número da ficha
pub async fn search_fichas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Value>> {
    log_request_received("/buscar", "GET");

    let term = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::ValidationError("Informe um termo de busca.".to_string()))?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let resultados = state.store.search(term, limit).await?;

    log_info(&format!("🔍 Busca '{}': {} ficha(s)", term, resultados.len()));

    Ok(Json(json!({
        "success": true,
        "total": resultados.len(),
        "resultados": resultados
    })))
}
