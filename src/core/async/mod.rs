//! Concurrent implementations of core components
//!
//! This module provides thread-safe counterparts of the sequential engine,
//! built on DashMap for fine-grained locking.
//!
//! # Architecture
//!
//! - **SharedAccountBook**: Thread-safe account states using DashMap
//! - **SharedTokenEngine**: Transfer and administration contract over `&self`
//! - **BatchProcessor**: Lane-parallel replay of operation batches
//!
//! # Thread Safety
//!
//! - Transfers over disjoint accounts proceed in parallel
//! - Transfers sharing an account are serialized by per-account locks
//! - Administration calls exclude all transfers while they run

pub mod account_book;
pub mod batch_processor;
pub mod engine;

pub use account_book::SharedAccountBook;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::SharedTokenEngine;
