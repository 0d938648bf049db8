//! # Sluice Ledger - Constant-Product Pool Accounting Engine
//!
//! ## Purpose
//!
//! The accounting core behind the wallet's swap and liquidity screens:
//! a two-token reserve pool, per-account balances and LP shares, and an
//! append-only journal of every accepted operation. Swaps and liquidity
//! changes are priced by exact constant-product math, applied
//! atomically, and serialized so no operation ever observes another's
//! partial state.
//!
//! ## Architecture Role
//!
//! One [`PoolLedger`] instance exists per token pair, owned by its host
//! process and reached either directly, through the lock-based
//! [`SharedLedger`], or through the queue-draining [`LedgerService`]
//! task. Everything above this crate — UI, wallets, transport — is a
//! consumer of its outputs.
//!
//! ```text
//! callers ──> LedgerHandle ──mpsc──> LedgerService ──> PoolLedger
//!                                                      ├── Pool          (reserves + LP supply)
//!                                                      ├── AccountBook   (balances + LP shares)
//!                                                      └── TransactionJournal (append-only history)
//! ```
//!
//! ## Guarantees
//!
//! - **Atomicity**: validation precedes every mutation; a rejected
//!   operation changes nothing.
//! - **Conservation**: token totals (accounts + reserve) and LP totals
//!   (accounts vs. supply) hold after every operation.
//! - **Determinism**: integer-only pricing, floor rounding, and
//!   sequence-stamped journal entries with reproducible digests.

pub mod accounts;
pub mod config;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod pool;
pub mod service;
pub mod snapshot;

pub use accounts::{Account, AccountBook, AccountState};
pub use config::{ConfigError, GenesisConfig};
pub use error::LedgerError;
pub use journal::{
    EntryAmounts, HistoryFilter, JournalEntry, ReserveSnapshot, TransactionJournal,
};
pub use ledger::{AddLiquidityReceipt, PoolLedger, RemoveLiquidityReceipt, SwapReceipt};
pub use pool::{Pool, PoolStateView};
pub use service::{LedgerCommand, LedgerHandle, LedgerService, SharedLedger};
pub use snapshot::{LedgerSnapshot, SnapshotError};
