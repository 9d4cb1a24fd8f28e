//! passbook-core: transaction records, category table, and statement configuration

pub mod category;
pub mod config;
pub mod record;

pub use category::{CategoryRule, CategoryTable};
pub use config::{AccountKind, AccountProfile, StatementConfig};
pub use record::{Flow, InvalidRow, RecordRow, TransactionRecord};
