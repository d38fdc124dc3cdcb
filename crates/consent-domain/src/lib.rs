mod dates;
mod domain_stubs;
mod errors;
mod line_item;
mod source;
mod transaction;
mod wallet;

pub use dates::{date_and_time_label, date_label, time_label};
pub use domain_stubs::{DomainStubs, StubTransactionSource, SAMPLE_TRANSACTION_JSON};
pub use errors::DomainError;
pub use line_item::{ItemId, LineItem};
pub use source::TransactionSource;
pub use transaction::Transaction;
// Monedero de permisos (entradas de transacciones aceptadas)
pub use wallet::{InMemoryWallet, PermissionWallet, WalletEntry};
