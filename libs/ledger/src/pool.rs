//! Pool state: the two reserves plus total LP supply
//!
//! One [`Pool`] exists per token pair. It is owned exclusively by the
//! [`crate::PoolLedger`] and mutated only through its swap/liquidity
//! operations.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use sluice_amm::{spot_rates, SpotRates};
use types::{PoolId, TokenAmount, TokenPair};

/// Reserve and supply state for one token pair.
///
/// Invariant: both reserves are positive whenever `total_lp_supply > 0`,
/// and both are zero exactly when `total_lp_supply == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: PoolId,
    pub pair: TokenPair,
    pub reserve_a: TokenAmount,
    pub reserve_b: TokenAmount,
    pub total_lp_supply: u128,
}

impl Pool {
    /// Create an empty pool for a pair. Reserves arrive with the first
    /// `add_liquidity`.
    pub fn new(pool_id: PoolId, pair: TokenPair) -> Self {
        Self {
            pool_id,
            pair,
            reserve_a: 0,
            reserve_b: 0,
            total_lp_supply: 0,
        }
    }

    /// A pool is seeded once LP shares exist.
    pub fn is_seeded(&self) -> bool {
        self.total_lp_supply > 0
    }

    /// The invariant product `reserve_a * reserve_b`, if representable.
    pub fn constant_product(&self) -> Option<u128> {
        self.reserve_a.checked_mul(self.reserve_b)
    }

    /// Marginal exchange rates at the current reserves (display only).
    pub fn spot_rates(&self) -> Result<SpotRates, LedgerError> {
        if !self.is_seeded() {
            return Err(LedgerError::PoolNotSeeded);
        }
        Ok(spot_rates(self.reserve_a, self.reserve_b)?)
    }

    /// Check the reserve/supply invariant; used when accepting restored
    /// state and in debug assertions after commits.
    pub fn invariant_holds(&self) -> bool {
        if self.total_lp_supply > 0 {
            self.reserve_a > 0 && self.reserve_b > 0
        } else {
            self.reserve_a == 0 && self.reserve_b == 0
        }
    }
}

/// Read-only view of pool state handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStateView {
    pub pool_id: PoolId,
    pub pair: TokenPair,
    pub reserve_a: TokenAmount,
    pub reserve_b: TokenAmount,
    pub total_lp_supply: u128,
    /// `reserve_a * reserve_b`; `None` when the product exceeds `u128`.
    pub k: Option<u128>,
}

impl From<&Pool> for PoolStateView {
    fn from(pool: &Pool) -> Self {
        Self {
            pool_id: pool.pool_id.clone(),
            pair: pool.pair.clone(),
            reserve_a: pool.reserve_a,
            reserve_b: pool.reserve_b,
            total_lp_supply: pool.total_lp_supply,
            k: pool.constant_product(),
        }
    }
}
