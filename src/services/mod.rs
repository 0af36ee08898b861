pub mod store;
pub mod migrations;
pub mod postgres_store;
pub mod memory_store;
pub mod webhook;

pub use store::{AttendanceStore, MigrationReport};
pub use postgres_store::PgAttendanceStore;
pub use memory_store::MemoryAttendanceStore;
pub use webhook::{WebhookEvent, WebhookNotifier, WebhookPayload};
