// Handlers HTTP da Ficha de Atendimento
pub mod health;
pub mod form;
pub mod atendimento;
pub mod buscar;
pub mod avaliar;
pub mod migrate;

pub use health::*;
pub use form::render_form;
pub use atendimento::submit_ficha;
pub use buscar::*;
pub use avaliar::*;
pub use migrate::*;
