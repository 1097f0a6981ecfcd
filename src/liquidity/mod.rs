//! Liquidity manager collaborator
//!
//! The token only routes tax to the liquidity manager's account. What the
//! manager does with that balance lives here, behind the [`AmmRouter`]
//! trait so the ledger never depends on a particular market:
//!
//! - `router` - The `AmmRouter` trait describing the external market
//! - `manager` - `LiquidityManager`, which converts accumulated tax into
//!   liquidity on demand

pub mod manager;
pub mod router;

pub use manager::{LiquidityManager, LiquidityReport};
pub use router::AmmRouter;
