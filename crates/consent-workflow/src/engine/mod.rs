pub mod transaction_flow;

pub use transaction_flow::{Navigation, TransactionFlow};
