//! Token metadata and the operation vocabulary
//!
//! A pool holds exactly two tokens, referred to as side A and side B
//! throughout the system. Amounts are `u128` in the token's smallest
//! denomination, which leaves ~38 decimal digits of headroom above any
//! realistic reserve.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token quantity in smallest denomination units.
pub type TokenAmount = u128;

/// LP share quantity. Same scale discipline as token amounts.
pub type LpAmount = u128;

/// Parse failure for the string forms of [`TokenSide`] and
/// [`SwapDirection`] (config files, CLI arguments).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {what}: {input}")]
pub struct ParseError {
    pub what: &'static str,
    pub input: String,
}

/// One side of the pool's token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSide {
    A,
    B,
}

impl TokenSide {
    /// The opposite side of the pair.
    pub fn other(self) -> Self {
        match self {
            TokenSide::A => TokenSide::B,
            TokenSide::B => TokenSide::A,
        }
    }
}

impl fmt::Display for TokenSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSide::A => f.write_str("A"),
            TokenSide::B => f.write_str("B"),
        }
    }
}

impl FromStr for TokenSide {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(TokenSide::A),
            "B" | "b" => Ok(TokenSide::B),
            other => Err(ParseError {
                what: "token side",
                input: other.to_string(),
            }),
        }
    }
}

/// Direction of a swap through the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Spend token A, receive token B.
    AToB,
    /// Spend token B, receive token A.
    BToA,
}

impl SwapDirection {
    /// The side being paid into the pool.
    pub fn input_side(self) -> TokenSide {
        match self {
            SwapDirection::AToB => TokenSide::A,
            SwapDirection::BToA => TokenSide::B,
        }
    }

    /// The side being paid out of the pool.
    pub fn output_side(self) -> TokenSide {
        self.input_side().other()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::AToB => f.write_str("AtoB"),
            SwapDirection::BToA => f.write_str("BtoA"),
        }
    }
}

impl FromStr for SwapDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AtoB" | "a_to_b" | "AToB" => Ok(SwapDirection::AToB),
            "BtoA" | "b_to_a" | "BToA" => Ok(SwapDirection::BToA),
            other => Err(ParseError {
                what: "swap direction",
                input: other.to_string(),
            }),
        }
    }
}

/// Kind of a committed ledger operation, as recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
}

impl OpKind {
    /// Stable single-byte tag used in entry digests.
    pub fn tag(self) -> u8 {
        match self {
            OpKind::Swap => 1,
            OpKind::AddLiquidity => 2,
            OpKind::RemoveLiquidity => 3,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Swap => f.write_str("swap"),
            OpKind::AddLiquidity => f.write_str("add_liquidity"),
            OpKind::RemoveLiquidity => f.write_str("remove_liquidity"),
        }
    }
}

/// Display metadata for one token of the pair.
///
/// `decimals` is carried for UI formatting only; the ledger never scales
/// amounts by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// The two tokens a pool trades between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token_a: TokenInfo,
    pub token_b: TokenInfo,
}

impl TokenPair {
    pub fn new(token_a: TokenInfo, token_b: TokenInfo) -> Self {
        Self { token_a, token_b }
    }

    pub fn side(&self, side: TokenSide) -> &TokenInfo {
        match side {
            TokenSide::A => &self.token_a,
            TokenSide::B => &self.token_b,
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.token_a.symbol, self.token_b.symbol)
    }
}
