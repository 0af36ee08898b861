/// Contrato de persistência das fichas
///
/// Duas implementações:
/// - `PgAttendanceStore`: Postgres via sqlx (produção)
/// - `MemoryAttendanceStore`: sem DATABASE_URL e nos testes

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{AttendanceFields, AttendanceRecord, AttendanceSummary, RatingTarget};
use crate::utils::AppResult;

/// Resultado da aplicação das migrações aditivas
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MigrationReport {
    pub total: usize,
    pub executed: usize,
    pub errors: Vec<String>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Nome do backend para /ready e logs
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> AppResult<()>;

    async fn migrate(&self) -> AppResult<MigrationReport>;

    /// Cria a ficha e devolve o id gerado
    async fn insert(&self, fields: &AttendanceFields, created_at: NaiveDateTime) -> AppResult<i64>;

    /// Edição parcial. `false` quando o id não existe.
    async fn update(
        &self,
        id: i64,
        fields: &AttendanceFields,
        updated_at: NaiveDateTime,
    ) -> AppResult<bool>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AttendanceRecord>>;

    /// Busca por nome, dígitos do telefone ou id exato; mais recentes primeiro
    async fn search(&self, term: &str, limit: i64) -> AppResult<Vec<AttendanceSummary>>;

    /// Grava a avaliação e devolve o id da ficha avaliada
    async fn rate(
        &self,
        target: &RatingTarget,
        nota: i32,
        comentario: Option<&str>,
        rated_at: NaiveDateTime,
    ) -> AppResult<Option<i64>>;
}
