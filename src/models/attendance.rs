//! Ficha de Atendimento
//!
//! Uma linha da tabela `atendimentos`: identificação do cliente, dados do
//! atendimento, mídia (foto e assinatura em data URL) e o bloco de
//! pré-contrato preenchido depois da confirmação da compra do lote.

use base64::Engine;
use chrono::{Local, NaiveDateTime, SubsecRound};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::utils::normalization::{blank_to_none, deserialize_flag, digits_only, normalize_phone};
use crate::utils::{AppError, AppResult};

/// Formato usado para datas no JSON de retorno e no webhook
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex")
});

static CEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{5}-?\d{3}$").expect("cep regex")
});

/// Horário local truncado em segundos (mesma precisão exibida na ficha)
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Valor tipado de uma coluna, usado para montar INSERT/UPDATE dinâmicos
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(Option<String>),
    Flag(bool),
}

/// INSERT grava todas as colunas; UPDATE só as informadas e nunca as de identidade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Insert,
    Update,
}

/// Colunas que não mudam depois que a ficha é criada
pub const IMMUTABLE_COLUMNS: &[&str] = &["nome_cliente", "nome_corretor"];

macro_rules! text_section {
    ($(#[$meta:meta])* $name:ident { $($field:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
        pub struct $name {
            $(
                #[serde(default)]
                pub $field: Option<String>,
            )*
        }

        impl $name {
            pub const COLUMNS: &'static [&'static str] = &[$(stringify!($field)),*];

            pub fn column_values(&self) -> Vec<(&'static str, Option<String>)> {
                vec![$((stringify!($field), self.$field.clone())),*]
            }

            /// Trim em todos os campos; vazio vira ausente
            pub fn trimmed(self) -> Self {
                Self { $($field: blank_to_none(self.$field)),* }
            }

            /// Copia apenas os campos presentes em `other`
            pub fn merge_from(&mut self, other: &Self) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            }
        }
    };
}

text_section! {
    /// Pré-contrato: lote, condições de pagamento, proponente, cônjuge e referências
    PreContrato {
        quadra,
        lote,
        valor_total,
        valor_entrada,
        qtd_parcelas,
        valor_parcela,
        forma_pagamento,
        vencimento_parcela,
        cpf,
        rg,
        data_nascimento,
        estado_civil,
        regime_bens,
        profissao,
        empresa,
        renda_mensal,
        email,
        endereco,
        cep,
        nome_conjuge,
        cpf_conjuge,
        data_nascimento_conjuge,
        profissao_conjuge,
        renda_conjuge,
        referencia1_nome,
        referencia1_telefone,
        referencia2_nome,
        referencia2_telefone,
        origem_lead,
    }
}

impl PreContrato {
    fn validate(mut self, country_prefix: &str) -> AppResult<Self> {
        if let Some(email) = &self.email {
            if !EMAIL_RE.is_match(email) {
                return Err(AppError::ValidationError(format!("E-mail inválido: '{}'.", email)));
            }
        }
        if let Some(cep) = &self.cep {
            if !CEP_RE.is_match(cep) {
                return Err(AppError::ValidationError(format!("CEP inválido: '{}'.", cep)));
            }
        }
        for (label, cpf) in [("CPF", &self.cpf), ("CPF do cônjuge", &self.cpf_conjuge)] {
            if let Some(cpf) = cpf {
                if digits_only(cpf).len() != 11 {
                    return Err(AppError::ValidationError(format!("{} deve ter 11 dígitos.", label)));
                }
            }
        }
        if let Some(phone) = self.referencia1_telefone.take() {
            self.referencia1_telefone = Some(normalize_phone(&phone, country_prefix)?);
        }
        if let Some(phone) = self.referencia2_telefone.take() {
            self.referencia2_telefone = Some(normalize_phone(&phone, country_prefix)?);
        }
        Ok(self)
    }
}

/// Corpo JSON do POST / (criação ou edição da ficha)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceSubmission {
    #[serde(default, alias = "ticket_id", deserialize_with = "deserialize_lenient_id")]
    pub id: Option<i64>,
    pub nome_cliente: Option<String>,
    pub telefone: Option<String>,
    pub cidade: Option<String>,
    pub instagram: Option<String>,
    pub empreendimento: Option<String>,
    pub comprou_1o_lote: Option<String>,
    pub interesse: Option<String>,
    pub observacoes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub visitou_stand: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub possui_corretor: Option<bool>,
    pub nome_corretor: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub lista_transmissao: Option<bool>,
    pub foto: Option<String>,
    pub assinatura: Option<String>,
    #[serde(flatten)]
    pub pre_contrato: PreContrato,
}

/// Campos já validados e normalizados, prontos para o armazenamento
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceFields {
    pub nome_cliente: String,
    pub telefone: String,
    pub cidade: String,
    pub instagram: Option<String>,
    pub empreendimento: Option<String>,
    pub comprou_1o_lote: Option<String>,
    pub interesse: Option<String>,
    pub observacoes: Option<String>,
    pub visitou_stand: Option<bool>,
    pub possui_corretor: Option<bool>,
    pub nome_corretor: Option<String>,
    pub lista_transmissao: Option<bool>,
    pub foto: Option<String>,
    pub assinatura: Option<String>,
    pub pre_contrato: PreContrato,
}

impl AttendanceSubmission {
    /// Valida a submissão. Nada é gravado se retornar erro.
    pub fn validate(self, country_prefix: &str) -> AppResult<AttendanceFields> {
        let nome_cliente = blank_to_none(self.nome_cliente)
            .ok_or_else(|| AppError::ValidationError("Nome do cliente é obrigatório.".to_string()))?;
        let cidade = blank_to_none(self.cidade)
            .ok_or_else(|| AppError::ValidationError("Cidade é obrigatória.".to_string()))?;
        let telefone = blank_to_none(self.telefone)
            .ok_or_else(|| AppError::ValidationError("Telefone é obrigatório.".to_string()))?;
        let telefone = normalize_phone(&telefone, country_prefix)?;

        let foto = blank_to_none(self.foto);
        if let Some(data) = &foto {
            validate_image_data_url("foto", data)?;
        }
        let assinatura = blank_to_none(self.assinatura);
        if let Some(data) = &assinatura {
            validate_image_data_url("assinatura", data)?;
        }

        Ok(AttendanceFields {
            nome_cliente,
            telefone,
            cidade,
            instagram: blank_to_none(self.instagram),
            empreendimento: blank_to_none(self.empreendimento),
            comprou_1o_lote: blank_to_none(self.comprou_1o_lote),
            interesse: blank_to_none(self.interesse),
            observacoes: blank_to_none(self.observacoes),
            visitou_stand: self.visitou_stand,
            possui_corretor: self.possui_corretor,
            nome_corretor: blank_to_none(self.nome_corretor),
            lista_transmissao: self.lista_transmissao,
            foto,
            assinatura,
            pre_contrato: self.pre_contrato.trimmed().validate(country_prefix)?,
        })
    }
}

impl AttendanceFields {
    /// Lista (coluna, valor) na ordem da tabela.
    ///
    /// Em `Update` ficam de fora as colunas imutáveis e os campos não informados.
    pub fn column_values(&self, mode: WriteMode) -> Vec<(&'static str, ColumnValue)> {
        let mut columns: Vec<(&'static str, ColumnValue)> = vec![
            ("nome_cliente", ColumnValue::Text(Some(self.nome_cliente.clone()))),
            ("telefone", ColumnValue::Text(Some(self.telefone.clone()))),
            ("cidade", ColumnValue::Text(Some(self.cidade.clone()))),
            ("instagram", ColumnValue::Text(self.instagram.clone())),
            ("empreendimento", ColumnValue::Text(self.empreendimento.clone())),
            ("comprou_1o_lote", ColumnValue::Text(self.comprou_1o_lote.clone())),
            ("interesse", ColumnValue::Text(self.interesse.clone())),
            ("observacoes", ColumnValue::Text(self.observacoes.clone())),
            ("nome_corretor", ColumnValue::Text(self.nome_corretor.clone())),
            ("foto", ColumnValue::Text(self.foto.clone())),
            ("assinatura", ColumnValue::Text(self.assinatura.clone())),
        ];

        for (column, value) in self.pre_contrato.column_values() {
            columns.push((column, ColumnValue::Text(value)));
        }

        let flags = [
            ("visitou_stand", self.visitou_stand),
            ("possui_corretor", self.possui_corretor),
            ("lista_transmissao", self.lista_transmissao),
        ];

        match mode {
            WriteMode::Insert => {
                for (column, flag) in flags {
                    columns.push((column, ColumnValue::Flag(flag.unwrap_or(false))));
                }
                columns
            }
            WriteMode::Update => {
                for (column, flag) in flags {
                    if let Some(flag) = flag {
                        columns.push((column, ColumnValue::Flag(flag)));
                    }
                }
                columns
                    .into_iter()
                    .filter(|(column, _)| !IMMUTABLE_COLUMNS.contains(column))
                    .filter(|(_, value)| !matches!(value, ColumnValue::Text(None)))
                    .collect()
            }
        }
    }
}

/// Linha completa da tabela `atendimentos`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub data_hora: NaiveDateTime,
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
    pub foto: Option<String>,
    pub assinatura: Option<String>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub pre_contrato: PreContrato,
    pub avaliacao: Option<i32>,
    pub comentario_avaliacao: Option<String>,
    #[serde(serialize_with = "serialize_opt_timestamp")]
    pub atualizado_em: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    pub fn from_fields(id: i64, data_hora: NaiveDateTime, fields: &AttendanceFields) -> Self {
        Self {
            id,
            data_hora,
            nome_cliente: fields.nome_cliente.clone(),
            telefone: fields.telefone.clone(),
            cidade: Some(fields.cidade.clone()),
            instagram: fields.instagram.clone(),
            empreendimento: fields.empreendimento.clone(),
            comprou_1o_lote: fields.comprou_1o_lote.clone(),
            interesse: fields.interesse.clone(),
            observacoes: fields.observacoes.clone(),
            visitou_stand: fields.visitou_stand.unwrap_or(false),
            possui_corretor: fields.possui_corretor.unwrap_or(false),
            nome_corretor: fields.nome_corretor.clone(),
            lista_transmissao: fields.lista_transmissao.unwrap_or(false),
            foto: fields.foto.clone(),
            assinatura: fields.assinatura.clone(),
            pre_contrato: fields.pre_contrato.clone(),
            avaliacao: None,
            comentario_avaliacao: None,
            atualizado_em: None,
        }
    }

    /// Edição parcial em memória; mesma regra do UPDATE em SQL
    pub fn apply_update(&mut self, fields: &AttendanceFields, updated_at: NaiveDateTime) {
        self.telefone = fields.telefone.clone();
        self.cidade = Some(fields.cidade.clone());

        let texts = [
            (&mut self.instagram, &fields.instagram),
            (&mut self.empreendimento, &fields.empreendimento),
            (&mut self.comprou_1o_lote, &fields.comprou_1o_lote),
            (&mut self.interesse, &fields.interesse),
            (&mut self.observacoes, &fields.observacoes),
            (&mut self.foto, &fields.foto),
            (&mut self.assinatura, &fields.assinatura),
        ];
        for (target, value) in texts {
            if value.is_some() {
                *target = value.clone();
            }
        }

        for (target, value) in [
            (&mut self.visitou_stand, fields.visitou_stand),
            (&mut self.possui_corretor, fields.possui_corretor),
            (&mut self.lista_transmissao, fields.lista_transmissao),
        ] {
            if let Some(value) = value {
                *target = value;
            }
        }

        self.pre_contrato.merge_from(&fields.pre_contrato);
        self.atualizado_em = Some(updated_at);
    }

    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary {
            id: self.id,
            data_hora: self.data_hora,
            nome_cliente: self.nome_cliente.clone(),
            telefone: self.telefone.clone(),
            cidade: self.cidade.clone(),
            empreendimento: self.empreendimento.clone(),
        }
    }
}

/// Resultado da busca textual (sem mídia)
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AttendanceSummary {
    pub id: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub data_hora: NaiveDateTime,
    pub nome_cliente: String,
    pub telefone: String,
    pub cidade: Option<String>,
    pub empreendimento: Option<String>,
}

/// Corpo do POST /avaliar
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingRequest {
    #[serde(default, alias = "id", deserialize_with = "deserialize_lenient_id")]
    pub ticket_id: Option<i64>,
    pub telefone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub nota: Option<i64>,
    pub comentario: Option<String>,
}

/// Ficha a ser avaliada: pelo número do ticket ou pelo telefone (ficha mais recente)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingTarget {
    Id(i64),
    Telefone(String),
}

impl RatingRequest {
    pub fn validate(self, country_prefix: &str) -> AppResult<(RatingTarget, i32, Option<String>)> {
        let nota = match self.nota {
            Some(n @ 1..=5) => n as i32,
            Some(n) => {
                return Err(AppError::ValidationError(format!(
                    "Nota deve estar entre 1 e 5 (recebido {}).",
                    n
                )))
            }
            None => return Err(AppError::ValidationError("Nota é obrigatória.".to_string())),
        };

        let target = match (self.ticket_id, blank_to_none(self.telefone)) {
            (Some(id), _) => RatingTarget::Id(id),
            (None, Some(phone)) => RatingTarget::Telefone(normalize_phone(&phone, country_prefix)?),
            (None, None) => {
                return Err(AppError::ValidationError(
                    "Informe o ticket_id ou o telefone da ficha.".to_string(),
                ))
            }
        };

        Ok((target, nota, blank_to_none(self.comentario)))
    }
}

/// Confere que a mídia é `data:image/<tipo>;base64,<payload>` decodificável
pub fn validate_image_data_url(field: &str, data: &str) -> AppResult<()> {
    let invalid = || AppError::ValidationError(format!("Imagem inválida no campo '{}'.", field));

    let rest = data.strip_prefix("data:image/").ok_or_else(invalid)?;
    let (_mime, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    if payload.is_empty() {
        return Err(invalid());
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map(|_| ())
        .map_err(|_| invalid())
}

/// Aceita número, string numérica ou vazio (campo de formulário)
fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("número inválido: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("número inválido: '{}'", s))),
        Some(other) => Err(D::Error::custom(format!("número inválido: {}", other))),
    }
}

pub fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
}

pub fn serialize_opt_timestamp<S: Serializer>(
    ts: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_timestamp(ts, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PNG_1X1: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    fn submission(body: Value) -> AttendanceSubmission {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate_minimal_submission() {
        let fields = submission(json!({
            "nome_cliente": "  Maria Araújo ",
            "telefone": "(62) 99876-5432",
            "cidade": "Goiânia",
            "visitou_stand": "Sim",
        }))
        .validate("55")
        .unwrap();

        assert_eq!(fields.nome_cliente, "Maria Araújo");
        assert_eq!(fields.telefone, "5562998765432");
        assert_eq!(fields.visitou_stand, Some(true));
        assert_eq!(fields.possui_corretor, None);
    }

    #[test]
    fn test_validate_requires_name_city_and_phone() {
        let missing_name = submission(json!({"telefone": "62998765432", "cidade": "Goiânia"}));
        assert!(matches!(missing_name.validate("55"), Err(AppError::ValidationError(_))));

        let blank_city = submission(json!({"nome_cliente": "Ana", "telefone": "62998765432", "cidade": "  "}));
        assert!(matches!(blank_city.validate("55"), Err(AppError::ValidationError(_))));

        let bad_phone = submission(json!({"nome_cliente": "Ana", "telefone": "1234", "cidade": "Goiânia"}));
        assert!(matches!(bad_phone.validate("55"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_ticket_id_alias_and_string_id() {
        let s = submission(json!({"ticket_id": "42", "nome_cliente": "Ana"}));
        assert_eq!(s.id, Some(42));

        let s = submission(json!({"id": 7}));
        assert_eq!(s.id, Some(7));

        let s = submission(json!({"id": ""}));
        assert_eq!(s.id, None);

        assert!(serde_json::from_value::<AttendanceSubmission>(json!({"id": "abc"})).is_err());
    }

    #[test]
    fn test_pre_contrato_fields_are_flattened_and_checked() {
        let fields = submission(json!({
            "nome_cliente": "Ana",
            "telefone": "62998765432",
            "cidade": "Anápolis",
            "quadra": "12",
            "lote": " 7 ",
            "cpf": "123.456.789-09",
            "email": "ana@example.com",
            "cep": "75000-000",
            "referencia1_telefone": "62 3212-0000",
        }))
        .validate("55")
        .unwrap();

        assert_eq!(fields.pre_contrato.quadra.as_deref(), Some("12"));
        assert_eq!(fields.pre_contrato.lote.as_deref(), Some("7"));
        assert_eq!(fields.pre_contrato.referencia1_telefone.as_deref(), Some("556232120000"));

        let bad_email = submission(json!({
            "nome_cliente": "Ana", "telefone": "62998765432", "cidade": "Anápolis", "email": "ana@",
        }));
        assert!(bad_email.validate("55").is_err());

        let bad_cpf = submission(json!({
            "nome_cliente": "Ana", "telefone": "62998765432", "cidade": "Anápolis", "cpf": "123",
        }));
        assert!(bad_cpf.validate("55").is_err());
    }

    #[test]
    fn test_image_data_url() {
        assert!(validate_image_data_url("foto", PNG_1X1).is_ok());
        assert!(validate_image_data_url("foto", "http://example.com/a.png").is_err());
        assert!(validate_image_data_url("foto", "data:image/png;base64,").is_err());
        assert!(validate_image_data_url("foto", "data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_update_columns_skip_identity_and_absent_fields() {
        let fields = submission(json!({
            "nome_cliente": "Ana",
            "telefone": "62998765432",
            "cidade": "Anápolis",
            "nome_corretor": "Carlos",
            "interesse": "Alto",
            "lista_transmissao": "on",
        }))
        .validate("55")
        .unwrap();

        let update = fields.column_values(WriteMode::Update);
        let columns: Vec<&str> = update.iter().map(|(c, _)| *c).collect();
        assert!(!columns.contains(&"nome_cliente"));
        assert!(!columns.contains(&"nome_corretor"));
        assert!(!columns.contains(&"observacoes"));
        assert!(!columns.contains(&"visitou_stand"));
        assert!(columns.contains(&"interesse"));
        assert!(update.contains(&("lista_transmissao", ColumnValue::Flag(true))));

        let insert = fields.column_values(WriteMode::Insert);
        assert!(insert.contains(&("visitou_stand", ColumnValue::Flag(false))));
        assert!(insert.contains(&("nome_corretor", ColumnValue::Text(Some("Carlos".into())))));
        assert_eq!(
            insert.len(),
            11 + PreContrato::COLUMNS.len() + 3
        );
    }

    #[test]
    fn test_apply_update_keeps_identity() {
        let created = now_local();
        let original = submission(json!({
            "nome_cliente": "Ana", "telefone": "62998765432", "cidade": "Anápolis",
            "nome_corretor": "Carlos", "observacoes": "primeira visita",
        }))
        .validate("55")
        .unwrap();
        let mut record = AttendanceRecord::from_fields(1, created, &original);

        let edit = submission(json!({
            "nome_cliente": "Outro Nome", "telefone": "62911112222", "cidade": "Goiânia",
            "nome_corretor": "Outro Corretor", "quadra": "3",
        }))
        .validate("55")
        .unwrap();
        record.apply_update(&edit, created);

        assert_eq!(record.nome_cliente, "Ana");
        assert_eq!(record.nome_corretor.as_deref(), Some("Carlos"));
        assert_eq!(record.data_hora, created);
        assert_eq!(record.telefone, "5562911112222");
        assert_eq!(record.cidade.as_deref(), Some("Goiânia"));
        assert_eq!(record.observacoes.as_deref(), Some("primeira visita"));
        assert_eq!(record.pre_contrato.quadra.as_deref(), Some("3"));
        assert!(record.atualizado_em.is_some());
    }

    #[test]
    fn test_record_serializes_timestamps_as_text() {
        let ts = NaiveDateTime::parse_from_str("2025-03-01 14:05:09", TIMESTAMP_FORMAT).unwrap();
        let fields = submission(json!({"nome_cliente": "Ana", "telefone": "62998765432", "cidade": "Anápolis"}))
            .validate("55")
            .unwrap();
        let record = AttendanceRecord::from_fields(9, ts, &fields);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["data_hora"], "2025-03-01 14:05:09");
        assert_eq!(value["atualizado_em"], Value::Null);
        assert_eq!(value["id"], 9);
        assert!(value.get("quadra").is_some(), "pré-contrato deve sair achatado");
    }

    #[test]
    fn test_rating_request_validation() {
        let req: RatingRequest = serde_json::from_value(json!({"ticket_id": 3, "nota": 5})).unwrap();
        assert_eq!(req.validate("55").unwrap(), (RatingTarget::Id(3), 5, None));

        let req: RatingRequest =
            serde_json::from_value(json!({"telefone": "(62) 99876-5432", "nota": "4", "comentario": "ótimo"}))
                .unwrap();
        assert_eq!(
            req.validate("55").unwrap(),
            (RatingTarget::Telefone("5562998765432".into()), 4, Some("ótimo".into()))
        );

        let req: RatingRequest = serde_json::from_value(json!({"ticket_id": 3, "nota": 9})).unwrap();
        assert!(req.validate("55").is_err());

        let req: RatingRequest = serde_json::from_value(json!({"nota": 3})).unwrap();
        assert!(req.validate("55").is_err());
    }
}
