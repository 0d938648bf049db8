//! # Sluice AMM Library - Exact Constant-Product Mathematics
//!
//! ## Purpose
//!
//! Pure, stateless math for the constant-product (x·y=k) pool ledger:
//! swap outputs, LP share minting and redemption, and display-facing
//! marginal rates. Every ledger mutation is computed here with exact
//! `u128` integer arithmetic so results are deterministic and
//! bit-for-bit reproducible across hosts.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve and supply values from the pool ledger,
//!   trade parameters from callers
//! - **Output Destinations**: the ledger's mutation path, quote endpoints
//! - **Precision**: floor/truncation toward zero is the only rounding
//!   mode anywhere; rounding error always favors the pool, never the
//!   trader
//! - **Validation**: every multiply and divide is checked; overflow is a
//!   typed error, never a panic
//!
//! The one place decimal arithmetic appears is [`rates`], which produces
//! human-facing marginal exchange rates. Those values never feed back
//! into ledger state.

pub mod curve;
pub mod rates;

pub use curve::{CpMath, MathError};
pub use rates::{spot_rates, SpotRates};
