/// Armazenamento em memória
///
/// Usado quando DATABASE_URL não está configurada (os dados somem no restart)
/// e como dublê do Postgres nos testes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::models::{AttendanceFields, AttendanceRecord, AttendanceSummary, RatingTarget};
use crate::services::store::{AttendanceStore, MigrationReport};
use crate::utils::normalization::{digits_only, normalize_text};
use crate::utils::AppResult;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    records: Vec<AttendanceRecord>,
}

#[derive(Clone, Default)]
pub struct MemoryAttendanceStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn matches_term(record: &AttendanceRecord, term: &str) -> bool {
    let normalized = normalize_text(term);
    if !normalized.is_empty() && normalize_text(&record.nome_cliente).contains(&normalized) {
        return true;
    }

    let digits = digits_only(term);
    if !digits.is_empty() && record.telefone.contains(&digits) {
        return true;
    }

    term.trim().parse::<i64>().map_or(false, |id| id == record.id)
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn migrate(&self) -> AppResult<MigrationReport> {
        Ok(MigrationReport::default())
    }

    async fn insert(&self, fields: &AttendanceFields, created_at: NaiveDateTime) -> AppResult<i64> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;
        state.records.push(AttendanceRecord::from_fields(id, created_at, fields));
        Ok(id)
    }

    async fn update(
        &self,
        id: i64,
        fields: &AttendanceFields,
        updated_at: NaiveDateTime,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.apply_update(fields, updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AttendanceRecord>> {
        let state = self.state.read().await;
        Ok(state.records.iter().find(|r| r.id == id).cloned())
    }

    async fn search(&self, term: &str, limit: i64) -> AppResult<Vec<AttendanceSummary>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .rev()
            .filter(|r| matches_term(r, term))
            .take(limit.max(0) as usize)
            .map(AttendanceRecord::summary)
            .collect())
    }

    async fn rate(
        &self,
        target: &RatingTarget,
        nota: i32,
        comentario: Option<&str>,
        rated_at: NaiveDateTime,
    ) -> AppResult<Option<i64>> {
        let mut state = self.state.write().await;
        let record = match target {
            RatingTarget::Id(id) => state.records.iter_mut().find(|r| r.id == *id),
            RatingTarget::Telefone(telefone) => {
                state.records.iter_mut().rev().find(|r| &r.telefone == telefone)
            }
        };

        Ok(record.map(|record| {
            record.avaliacao = Some(nota);
            if let Some(comentario) = comentario {
                record.comentario_avaliacao = Some(comentario.to_string());
            }
            record.atualizado_em = Some(rated_at);
            record.id
        }))
    }
}
