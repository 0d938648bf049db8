//! Account book: authoritative per-actor balances
//!
//! Pure debit/credit with no knowledge of pool mechanics. Accounts are
//! created lazily with zero balances on first reference and never
//! deleted; a zero balance is a valid steady state.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::{AccountId, LpAmount, TokenAmount, TokenSide};

/// Balances one actor holds outside the pool, plus their LP claim on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub balance_a: TokenAmount,
    pub balance_b: TokenAmount,
    pub lp_shares: LpAmount,
}

impl Account {
    fn balance(&self, side: TokenSide) -> TokenAmount {
        match side {
            TokenSide::A => self.balance_a,
            TokenSide::B => self.balance_b,
        }
    }

    fn balance_mut(&mut self, side: TokenSide) -> &mut TokenAmount {
        match side {
            TokenSide::A => &mut self.balance_a,
            TokenSide::B => &mut self.balance_b,
        }
    }
}

/// Read-only view of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub balance_a: TokenAmount,
    pub balance_b: TokenAmount,
    pub lp_shares: LpAmount,
}

/// The map of all accounts. Owned exclusively by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBook {
    accounts: HashMap<AccountId, Account>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `side` for `actor`; zero for unseen actors.
    pub fn balance(&self, actor: &AccountId, side: TokenSide) -> TokenAmount {
        self.accounts
            .get(actor)
            .map(|a| a.balance(side))
            .unwrap_or(0)
    }

    /// LP shares held by `actor`; zero for unseen actors.
    pub fn lp_shares(&self, actor: &AccountId) -> LpAmount {
        self.accounts.get(actor).map(|a| a.lp_shares).unwrap_or(0)
    }

    /// Decrease `actor`'s balance of `side`.
    pub fn debit(
        &mut self,
        actor: &AccountId,
        side: TokenSide,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let account = self.entry(actor);
        let balance = account.balance_mut(side);
        if *balance < amount {
            let available = *balance;
            return Err(LedgerError::InsufficientBalance {
                side,
                required: amount,
                available,
            });
        }
        *balance -= amount;
        Ok(())
    }

    /// Increase `actor`'s balance of `side`.
    pub fn credit(
        &mut self,
        actor: &AccountId,
        side: TokenSide,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let account = self.entry(actor);
        let balance = account.balance_mut(side);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount {
                reason: "token balance would exceed representable range",
            })?;
        Ok(())
    }

    /// Burn LP shares held by `actor`.
    pub fn debit_lp(&mut self, actor: &AccountId, amount: LpAmount) -> Result<(), LedgerError> {
        let account = self.entry(actor);
        if account.lp_shares < amount {
            let available = account.lp_shares;
            return Err(LedgerError::InsufficientLpShares {
                required: amount,
                available,
            });
        }
        account.lp_shares -= amount;
        Ok(())
    }

    /// Mint LP shares to `actor`.
    pub fn credit_lp(&mut self, actor: &AccountId, amount: LpAmount) -> Result<(), LedgerError> {
        let account = self.entry(actor);
        account.lp_shares =
            account
                .lp_shares
                .checked_add(amount)
                .ok_or(LedgerError::InvalidAmount {
                    reason: "lp shares would exceed representable range",
                })?;
        Ok(())
    }

    /// Headroom check used by the ledger before committing: does
    /// crediting `amount` of `side` stay representable?
    pub fn can_credit(&self, actor: &AccountId, side: TokenSide, amount: TokenAmount) -> bool {
        self.balance(actor, side).checked_add(amount).is_some()
    }

    pub fn can_credit_lp(&self, actor: &AccountId, amount: LpAmount) -> bool {
        self.lp_shares(actor).checked_add(amount).is_some()
    }

    /// View for `actor`, zeroed for unseen actors. Does not create the
    /// account: reads are side-effect free.
    pub fn view(&self, actor: &AccountId) -> AccountState {
        let account = self.accounts.get(actor).cloned().unwrap_or_default();
        AccountState {
            balance_a: account.balance_a,
            balance_b: account.balance_b,
            lp_shares: account.lp_shares,
        }
    }

    /// Sum of all balances of one token across accounts. Saturating on
    /// purpose: only used for invariant auditing, where a saturated
    /// value already signals corruption.
    pub fn total_balance(&self, side: TokenSide) -> TokenAmount {
        self.accounts
            .values()
            .fold(0u128, |acc, a| acc.saturating_add(a.balance(side)))
    }

    /// Sum of all LP shares across accounts.
    pub fn total_lp_shares(&self) -> LpAmount {
        self.accounts
            .values()
            .fold(0u128, |acc, a| acc.saturating_add(a.lp_shares))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.accounts.iter()
    }

    /// Rebuild the book from persisted entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (AccountId, Account)>) -> Self {
        Self {
            accounts: entries.into_iter().collect(),
        }
    }

    fn entry(&mut self, actor: &AccountId) -> &mut Account {
        self.accounts.entry(actor.clone()).or_default()
    }
}
