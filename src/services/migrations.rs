//! Migrações aditivas da tabela `atendimentos`
//!
//! A primeira revisão criava só as colunas básicas; cada revisão seguinte
//! acrescentou colunas. Tudo é `IF NOT EXISTS`, então reaplicar é inofensivo.

use crate::models::PreContrato;

pub const TABLE: &str = "atendimentos";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS atendimentos (
    id BIGSERIAL PRIMARY KEY,
    data_hora TIMESTAMP NOT NULL DEFAULT NOW(),
    nome_cliente TEXT NOT NULL,
    telefone TEXT NOT NULL,
    empreendimento TEXT,
    comprou_1o_lote TEXT,
    interesse TEXT,
    observacoes TEXT
)
"#;

/// Colunas acrescentadas depois da primeira revisão (fora do pré-contrato)
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("cidade", "TEXT"),
    ("instagram", "TEXT"),
    ("visitou_stand", "BOOLEAN NOT NULL DEFAULT FALSE"),
    ("possui_corretor", "BOOLEAN NOT NULL DEFAULT FALSE"),
    ("nome_corretor", "TEXT"),
    ("lista_transmissao", "BOOLEAN NOT NULL DEFAULT FALSE"),
    ("foto", "TEXT"),
    ("assinatura", "TEXT"),
    ("avaliacao", "INTEGER"),
    ("comentario_avaliacao", "TEXT"),
    ("atualizado_em", "TIMESTAMP"),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_atendimentos_telefone ON atendimentos (telefone)",
];

/// Statements na ordem em que devem rodar
pub fn statements() -> Vec<String> {
    let mut statements = vec![CREATE_TABLE.trim().to_string()];

    let pre_contrato = PreContrato::COLUMNS.iter().map(|column| (*column, "TEXT"));

    for (column, ddl) in ADDITIVE_COLUMNS.iter().copied().chain(pre_contrato) {
        statements.push(format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
            TABLE, column, ddl
        ));
    }

    statements.extend(INDEXES.iter().map(|s| s.to_string()));
    statements
}

/// Lista de colunas do SELECT completo.
///
/// Tabelas antigas têm `id SERIAL` e colunas anuláveis, por isso o cast e os COALESCE.
pub fn select_columns() -> String {
    let mut columns = vec![
        "id::BIGINT AS id".to_string(),
        "COALESCE(data_hora, TIMESTAMP 'epoch') AS data_hora".to_string(),
        "COALESCE(nome_cliente, '') AS nome_cliente".to_string(),
        "COALESCE(telefone, '') AS telefone".to_string(),
    ];

    for column in [
        "cidade",
        "instagram",
        "empreendimento",
        "comprou_1o_lote",
        "interesse",
        "observacoes",
    ] {
        columns.push(column.to_string());
    }
    for flag in ["visitou_stand", "possui_corretor"] {
        columns.push(format!("COALESCE({0}, FALSE) AS {0}", flag));
    }
    columns.push("nome_corretor".to_string());
    columns.push("COALESCE(lista_transmissao, FALSE) AS lista_transmissao".to_string());
    for column in ["foto", "assinatura"] {
        columns.push(column.to_string());
    }
    columns.extend(PreContrato::COLUMNS.iter().map(|c| c.to_string()));
    for column in ["avaliacao", "comentario_avaliacao", "atualizado_em"] {
        columns.push(column.to_string());
    }

    columns.join(", ")
}

/// Colunas do resumo usado na busca
pub fn summary_columns() -> &'static str {
    "id::BIGINT AS id, COALESCE(data_hora, TIMESTAMP 'epoch') AS data_hora, \
     COALESCE(nome_cliente, '') AS nome_cliente, COALESCE(telefone, '') AS telefone, \
     cidade, empreendimento"
}
