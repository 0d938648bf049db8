//! # Sluice Shared Types
//!
//! Unified type definitions consumed by every Sluice crate: identifiers
//! for accounts and pools, token metadata, and the operation vocabulary
//! (sides, directions, kinds) used by the ledger and its journal.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: all financial values are integers in the
//!   token's smallest denomination. There are no implicit decimals and
//!   no floating point anywhere in this crate.
//! - **Type Safety**: distinct newtypes for account and pool identifiers
//!   prevent mixing unrelated strings at compile time.
//! - **Serialization-Ready**: every public type derives `serde` traits so
//!   state snapshots and journal entries can be persisted by consumers.

pub mod identifiers;
pub mod tokens;

pub use identifiers::{AccountId, PoolId};
pub use tokens::{
    LpAmount, OpKind, ParseError, SwapDirection, TokenAmount, TokenInfo, TokenPair, TokenSide,
};
