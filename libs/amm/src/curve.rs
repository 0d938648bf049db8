//! Constant-product curve math with exact integer arithmetic
//!
//! All functions are pure and operate on `u128` amounts in smallest
//! denomination units. Division floors; multiplication is checked.
//! Callers are responsible for precondition errors that belong to the
//! ledger's taxonomy (unseeded pool, insufficient balance); this module
//! only reports arithmetic-level failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Arithmetic-level failures of the curve math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MathError {
    /// An intermediate product exceeded `u128::MAX`.
    #[error("arithmetic overflow in pricing computation")]
    Overflow,

    /// A reserve the formula divides through was zero.
    #[error("pool reserves are empty")]
    EmptyReserves,

    /// LP supply was zero where a pro-rata share was requested.
    #[error("lp supply is zero")]
    ZeroSupply,
}

/// Constant-product math functions.
///
/// Stateless; the struct exists only as a namespace.
pub struct CpMath;

impl CpMath {
    /// Swap output for the x·y=k curve, no fee:
    /// `floor(amount_in * reserve_out / (reserve_in + amount_in))`.
    ///
    /// Floor rounding guarantees `(reserve_in + in) * (reserve_out - out)
    /// >= reserve_in * reserve_out`, so the invariant product never
    /// decreases across a swap.
    pub fn swap_output(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
    ) -> Result<u128, MathError> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(MathError::EmptyReserves);
        }

        let numerator = amount_in
            .checked_mul(reserve_out)
            .ok_or(MathError::Overflow)?;
        let denominator = reserve_in
            .checked_add(amount_in)
            .ok_or(MathError::Overflow)?;

        // denominator >= reserve_in > 0
        Ok(numerator / denominator)
    }

    /// LP shares minted for the first deposit into an empty pool:
    /// `floor(sqrt(amount_a * amount_b))`.
    pub fn initial_lp_minted(amount_a: u128, amount_b: u128) -> Result<u128, MathError> {
        let product = amount_a
            .checked_mul(amount_b)
            .ok_or(MathError::Overflow)?;
        Ok(Self::isqrt(product))
    }

    /// LP shares minted for a deposit into a seeded pool:
    /// `min(floor(a * supply / reserve_a), floor(b * supply / reserve_b))`.
    ///
    /// The smaller ratio binds, so a deposit off the current reserve
    /// ratio mints as if only the proportional portion were supplied.
    pub fn lp_minted(
        amount_a: u128,
        amount_b: u128,
        reserve_a: u128,
        reserve_b: u128,
        total_supply: u128,
    ) -> Result<u128, MathError> {
        if total_supply == 0 {
            return Err(MathError::ZeroSupply);
        }
        if reserve_a == 0 || reserve_b == 0 {
            return Err(MathError::EmptyReserves);
        }

        let by_a = amount_a
            .checked_mul(total_supply)
            .ok_or(MathError::Overflow)?
            / reserve_a;
        let by_b = amount_b
            .checked_mul(total_supply)
            .ok_or(MathError::Overflow)?
            / reserve_b;

        Ok(by_a.min(by_b))
    }

    /// Token amounts released for burning `lp_amount` shares:
    /// `(floor(reserve_a * lp / supply), floor(reserve_b * lp / supply))`.
    pub fn redeem_amounts(
        reserve_a: u128,
        reserve_b: u128,
        lp_amount: u128,
        total_supply: u128,
    ) -> Result<(u128, u128), MathError> {
        if total_supply == 0 {
            return Err(MathError::ZeroSupply);
        }

        let amount_a = reserve_a
            .checked_mul(lp_amount)
            .ok_or(MathError::Overflow)?
            / total_supply;
        let amount_b = reserve_b
            .checked_mul(lp_amount)
            .ok_or(MathError::Overflow)?
            / total_supply;

        Ok((amount_a, amount_b))
    }

    /// Integer square root via Newton's method. Returns `floor(√n)`.
    pub fn isqrt(n: u128) -> u128 {
        if n == 0 {
            return 0;
        }
        let mut x = n;
        let mut y = x.div_ceil(2);
        while y < x {
            x = y;
            y = (x + n / x) / 2;
        }
        x
    }
}
