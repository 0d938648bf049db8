//! Ledger error taxonomy
//!
//! Every variant is a local, recoverable condition reported to the
//! caller; the engine performs no I/O and has no fatal-error class. The
//! first failing precondition aborts the whole operation with no partial
//! effects.

use sluice_amm::MathError;
use thiserror::Error;
use types::TokenSide;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Actor does not hold enough of the input token.
    #[error("insufficient balance: need {required} units of token {side}, have {available}")]
    InsufficientBalance {
        side: TokenSide,
        required: u128,
        available: u128,
    },

    /// Actor does not hold enough LP shares to burn.
    #[error("insufficient lp shares: need {required}, have {available}")]
    InsufficientLpShares { required: u128, available: u128 },

    /// A zero amount where a positive one is required.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// A malformed amount. Negative values are unrepresentable in the
    /// integer API, so in practice this reports a credit that would push
    /// a balance register past its representable range.
    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: &'static str },

    /// Swap against a pool with zero LP supply.
    #[error("pool is not seeded")]
    PoolNotSeeded,

    /// The computed swap output floors to zero; the trade is rejected
    /// rather than letting the trader pay for nothing.
    #[error("computed output amount is zero")]
    AmountOutIsZero,

    /// The computed LP mint floors to zero; the deposit is rejected
    /// rather than taking tokens for no shares.
    #[error("computed lp mint is zero")]
    LpMintedIsZero,

    /// Arithmetic failure inside the pricing math.
    #[error(transparent)]
    Math(#[from] MathError),

    /// The async service task is gone; only seen through
    /// [`crate::service::LedgerHandle`], never by direct callers.
    #[error("ledger service stopped")]
    ServiceStopped,
}
