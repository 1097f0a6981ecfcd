//! Core business logic module
//!
//! This module contains the token ledger components:
//! - `traits` - The `Ledger` abstraction over account storage
//! - `ledger` - Sequential account book
//! - `fee_policy` - Tax computation and fee exemption
//! - `trade_limit` - Rolling daily trade windows
//! - `transfer` - Atomic transfer orchestration
//! - `admin` - Owner-gated configuration changes
//! - `engine` - Sequential token engine
//! - `async` - Concurrent implementations

pub mod admin;
pub mod r#async;
pub mod engine;
pub mod fee_policy;
pub mod ledger;
pub mod trade_limit;
pub mod traits;
pub mod transfer;

pub use engine::TokenEngine;
pub use ledger::AccountBook;
pub use r#async::{BatchProcessor, ProcessingResult, SharedAccountBook, SharedTokenEngine};
pub use traits::Ledger;
pub use transfer::{execute_transfer, TransferReceipt};
