//! Genesis configuration
//!
//! TOML-loadable description of a pool's starting state: the token
//! pair, initial account balances, and an optional seed deposit that is
//! replayed through the regular `add_liquidity` path on startup.
//!
//! Amounts here are `u64` — TOML integers are 64-bit — and widen to the
//! ledger's `u128` when applied. That bounds genesis balances, not
//! runtime balances.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use types::{PoolId, TokenInfo, TokenPair};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read genesis config from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse genesis config")]
    Parse(#[from] toml::de::Error),
}

/// Token metadata as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGenesis {
    pub symbol: String,
    pub decimals: u8,
}

/// The `[pool]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolGenesis {
    pub id: String,
    pub token_a: TokenGenesis,
    pub token_b: TokenGenesis,
}

/// One `[[accounts]]` entry: balances held outside the pool at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGenesis {
    pub id: String,
    #[serde(default)]
    pub balance_a: u64,
    #[serde(default)]
    pub balance_b: u64,
}

/// The optional `[initial_liquidity]` table: a deposit executed by
/// `provider` as the first ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialLiquidity {
    pub provider: String,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Full genesis description for one pool ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub pool: PoolGenesis,
    #[serde(default)]
    pub accounts: Vec<AccountGenesis>,
    #[serde(default)]
    pub initial_liquidity: Option<InitialLiquidity>,
}

impl GenesisConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn pool_id(&self) -> PoolId {
        PoolId::from(self.pool.id.as_str())
    }

    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(
            TokenInfo::new(self.pool.token_a.symbol.clone(), self.pool.token_a.decimals),
            TokenInfo::new(self.pool.token_b.symbol.clone(), self.pool.token_b.decimals),
        )
    }
}

impl Default for GenesisConfig {
    /// The demo wallet's starting world: the WBKC pair, a funded LP
    /// provider whose deposit seeds the pool at 10000/20000, and one
    /// funded user account.
    fn default() -> Self {
        Self {
            pool: PoolGenesis {
                id: "0x605Ea3f67d09bdFf604c7B0d9FE8A477cdF831fb".to_string(),
                token_a: TokenGenesis {
                    symbol: "E20C".to_string(),
                    decimals: 18,
                },
                token_b: TokenGenesis {
                    symbol: "WBKC".to_string(),
                    decimals: 18,
                },
            },
            accounts: vec![
                AccountGenesis {
                    id: "0x76270242b5E3Ec5282e293e645026d409bCdc019".to_string(),
                    balance_a: 10_000,
                    balance_b: 20_000,
                },
                AccountGenesis {
                    id: "0x28c6c06298d161e0db32600b8e0faf8d7c9f0a7c".to_string(),
                    balance_a: 500,
                    balance_b: 1_000,
                },
            ],
            initial_liquidity: Some(InitialLiquidity {
                provider: "0x76270242b5E3Ec5282e293e645026d409bCdc019".to_string(),
                amount_a: 10_000,
                amount_b: 20_000,
            }),
        }
    }
}
