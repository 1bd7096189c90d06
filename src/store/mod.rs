//! Repository adapters. Both run [`audit::AuditStamper`] before every write.

pub mod audit;
pub mod memory;
pub mod mysql;

pub use audit::{AuditStamper, WriteKind};
pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
