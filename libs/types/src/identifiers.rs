//! Typed identifier wrappers
//!
//! Zero-cost newtypes over the address-style strings the wallet layer
//! uses for accounts and pools. Keeping them distinct types prevents ID
//! confusion bugs at compile time; keeping them strings preserves the
//! external representation (hex addresses, `pool_…` handles) unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identity: the address string that initiated an operation.
///
/// Accounts are created lazily by the ledger on first reference, so any
/// well-formed string is a valid id; there is no registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Pool identity, one per token pair.
///
/// The ledger itself never interprets the contents; persistence layers
/// key their records by this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(String);

impl PoolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
