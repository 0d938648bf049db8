//! Marginal exchange rates for display
//!
//! Decimal arithmetic lives here and only here. The rates describe the
//! price of an infinitesimal swap (`reserve_out / reserve_in`) and are
//! meant for UI quoting; executable amounts always come from
//! [`crate::curve::CpMath`].

use crate::curve::MathError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marginal rates in both directions at the current reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotRates {
    /// Token B received per unit of token A, at the margin.
    pub rate_a_to_b: Decimal,
    /// Token A received per unit of token B, at the margin.
    pub rate_b_to_a: Decimal,
}

/// Compute both marginal rates from raw reserves.
///
/// Errors with [`MathError::EmptyReserves`] on an unseeded pool and
/// [`MathError::Overflow`] if a reserve exceeds `Decimal` range.
pub fn spot_rates(reserve_a: u128, reserve_b: u128) -> Result<SpotRates, MathError> {
    if reserve_a == 0 || reserve_b == 0 {
        return Err(MathError::EmptyReserves);
    }

    let a = to_decimal(reserve_a)?;
    let b = to_decimal(reserve_b)?;

    Ok(SpotRates {
        rate_a_to_b: b / a,
        rate_b_to_a: a / b,
    })
}

fn to_decimal(value: u128) -> Result<Decimal, MathError> {
    let signed: i128 = value.try_into().map_err(|_| MathError::Overflow)?;
    Decimal::try_from_i128_with_scale(signed, 0).map_err(|_| MathError::Overflow)
}
