//! The pool ledger: serialized, atomic swap and liquidity operations
//!
//! `PoolLedger` owns the tuple (pool, account book, journal) and is the
//! single writer over all three. Every operation follows the same shape:
//! validate preconditions and compute the full result against immutable
//! state, then apply the pool, account, and journal mutations with no
//! fallible step in between. A rejected operation leaves nothing
//! changed.

use crate::accounts::{AccountBook, AccountState};
use crate::config::GenesisConfig;
use crate::error::LedgerError;
use crate::journal::{
    EntryAmounts, HistoryFilter, JournalEntry, ReserveSnapshot, TransactionJournal,
};
use crate::pool::{Pool, PoolStateView};
use serde::{Deserialize, Serialize};
use sluice_amm::{CpMath, SpotRates};
use tracing::{debug, info};
use types::{AccountId, OpKind, PoolId, SwapDirection, TokenAmount, TokenPair, TokenSide};

/// Result of a committed swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub sequence_id: u64,
    /// Hex digest of the journal entry, the caller-facing "tx hash".
    pub digest: String,
    pub direction: SwapDirection,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
}

/// Result of a committed liquidity deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityReceipt {
    pub sequence_id: u64,
    pub digest: String,
    pub amount_a: TokenAmount,
    pub amount_b: TokenAmount,
    pub lp_minted: u128,
}

/// Result of a committed liquidity withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityReceipt {
    pub sequence_id: u64,
    pub digest: String,
    pub lp_burned: u128,
    pub amount_a: TokenAmount,
    pub amount_b: TokenAmount,
}

/// The ledger engine. One instance per pool; owned by whatever hosts it
/// (see [`crate::service`] for the serialized wrappers).
#[derive(Debug)]
pub struct PoolLedger {
    pool: Pool,
    accounts: AccountBook,
    journal: TransactionJournal,
}

impl PoolLedger {
    /// Empty ledger for a pair: no reserves, no accounts, no history.
    pub fn new(pool_id: PoolId, pair: TokenPair) -> Self {
        Self {
            journal: TransactionJournal::new(pool_id.clone()),
            pool: Pool::new(pool_id, pair),
            accounts: AccountBook::new(),
        }
    }

    /// Build a ledger from genesis configuration: credit the configured
    /// balances, then replay the optional initial deposit through the
    /// regular `add_liquidity` path so every invariant holds by
    /// construction.
    pub fn from_genesis(genesis: &GenesisConfig) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(genesis.pool_id(), genesis.token_pair());

        for account in &genesis.accounts {
            let actor = AccountId::from(account.id.as_str());
            ledger
                .accounts
                .credit(&actor, TokenSide::A, account.balance_a as u128)?;
            ledger
                .accounts
                .credit(&actor, TokenSide::B, account.balance_b as u128)?;
        }

        if let Some(seed) = &genesis.initial_liquidity {
            let provider = AccountId::from(seed.provider.as_str());
            ledger.add_liquidity(&provider, seed.amount_a as u128, seed.amount_b as u128)?;
        }

        info!(
            pool = %ledger.pool.pool_id,
            accounts = ledger.accounts.len(),
            seeded = ledger.pool.is_seeded(),
            "ledger initialized from genesis"
        );

        Ok(ledger)
    }

    /// Swap `amount_in` of the direction's input token for the output
    /// token at the constant-product price, no fee.
    pub fn swap(
        &mut self,
        actor: &AccountId,
        amount_in: TokenAmount,
        direction: SwapDirection,
    ) -> Result<SwapReceipt, LedgerError> {
        // -- validate & compute ------------------------------------------------
        if amount_in == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if !self.pool.is_seeded() {
            return Err(LedgerError::PoolNotSeeded);
        }

        let in_side = direction.input_side();
        let out_side = direction.output_side();

        let available = self.accounts.balance(actor, in_side);
        if available < amount_in {
            return Err(LedgerError::InsufficientBalance {
                side: in_side,
                required: amount_in,
                available,
            });
        }

        let (reserve_in, reserve_out) = match direction {
            SwapDirection::AToB => (self.pool.reserve_a, self.pool.reserve_b),
            SwapDirection::BToA => (self.pool.reserve_b, self.pool.reserve_a),
        };

        let amount_out = CpMath::swap_output(amount_in, reserve_in, reserve_out)?;
        if amount_out == 0 {
            debug!(%actor, amount_in, %direction, "swap rejected: output floors to zero");
            return Err(LedgerError::AmountOutIsZero);
        }
        if !self.accounts.can_credit(actor, out_side, amount_out) {
            return Err(LedgerError::InvalidAmount {
                reason: "token balance would exceed representable range",
            });
        }
        // amount_out < reserve_out, and reserve_in + amount_in was
        // overflow-checked inside swap_output
        let new_reserve_in = reserve_in + amount_in;
        let new_reserve_out = reserve_out - amount_out;

        // -- commit ------------------------------------------------------------
        self.accounts.debit(actor, in_side, amount_in)?;
        self.accounts.credit(actor, out_side, amount_out)?;
        match direction {
            SwapDirection::AToB => {
                self.pool.reserve_a = new_reserve_in;
                self.pool.reserve_b = new_reserve_out;
            }
            SwapDirection::BToA => {
                self.pool.reserve_b = new_reserve_in;
                self.pool.reserve_a = new_reserve_out;
            }
        }

        let (inputs, outputs) = match direction {
            SwapDirection::AToB => (
                EntryAmounts::tokens(amount_in, 0),
                EntryAmounts::tokens(0, amount_out),
            ),
            SwapDirection::BToA => (
                EntryAmounts::tokens(0, amount_in),
                EntryAmounts::tokens(amount_out, 0),
            ),
        };
        let entry = self.journal.append(
            OpKind::Swap,
            actor.clone(),
            inputs,
            outputs,
            self.reserve_snapshot(),
        );
        let receipt = SwapReceipt {
            sequence_id: entry.sequence_id,
            digest: entry.digest_hex(),
            direction,
            amount_in,
            amount_out,
        };

        debug_assert!(self.pool.invariant_holds());
        info!(
            %actor,
            seq = receipt.sequence_id,
            %direction,
            amount_in,
            amount_out,
            "swap committed"
        );
        Ok(receipt)
    }

    /// Deposit both tokens and mint LP shares.
    ///
    /// First deposit into an empty pool mints `floor(sqrt(a * b))` and
    /// the amounts become the initial reserves. Later deposits mint by
    /// the smaller of the two reserve ratios, but both full amounts
    /// enter the reserves even when one ratio was binding: the
    /// off-ratio excess accrues to all existing LP holders rather than
    /// being refunded.
    pub fn add_liquidity(
        &mut self,
        actor: &AccountId,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
    ) -> Result<AddLiquidityReceipt, LedgerError> {
        // -- validate & compute ------------------------------------------------
        if amount_a == 0 || amount_b == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        for (side, amount) in [(TokenSide::A, amount_a), (TokenSide::B, amount_b)] {
            let available = self.accounts.balance(actor, side);
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    side,
                    required: amount,
                    available,
                });
            }
        }

        let lp_minted = if self.pool.is_seeded() {
            CpMath::lp_minted(
                amount_a,
                amount_b,
                self.pool.reserve_a,
                self.pool.reserve_b,
                self.pool.total_lp_supply,
            )?
        } else {
            CpMath::initial_lp_minted(amount_a, amount_b)?
        };
        if lp_minted == 0 {
            debug!(%actor, amount_a, amount_b, "deposit rejected: lp mint floors to zero");
            return Err(LedgerError::LpMintedIsZero);
        }

        let new_reserve_a = self
            .pool
            .reserve_a
            .checked_add(amount_a)
            .ok_or(sluice_amm::MathError::Overflow)?;
        let new_reserve_b = self
            .pool
            .reserve_b
            .checked_add(amount_b)
            .ok_or(sluice_amm::MathError::Overflow)?;
        let new_supply = self
            .pool
            .total_lp_supply
            .checked_add(lp_minted)
            .ok_or(sluice_amm::MathError::Overflow)?;
        if !self.accounts.can_credit_lp(actor, lp_minted) {
            return Err(LedgerError::InvalidAmount {
                reason: "lp shares would exceed representable range",
            });
        }

        // -- commit ------------------------------------------------------------
        self.accounts.debit(actor, TokenSide::A, amount_a)?;
        self.accounts.debit(actor, TokenSide::B, amount_b)?;
        self.accounts.credit_lp(actor, lp_minted)?;
        self.pool.reserve_a = new_reserve_a;
        self.pool.reserve_b = new_reserve_b;
        self.pool.total_lp_supply = new_supply;

        let entry = self.journal.append(
            OpKind::AddLiquidity,
            actor.clone(),
            EntryAmounts::tokens(amount_a, amount_b),
            EntryAmounts::lp(lp_minted),
            self.reserve_snapshot(),
        );
        let receipt = AddLiquidityReceipt {
            sequence_id: entry.sequence_id,
            digest: entry.digest_hex(),
            amount_a,
            amount_b,
            lp_minted,
        };

        debug_assert!(self.pool.invariant_holds());
        info!(
            %actor,
            seq = receipt.sequence_id,
            amount_a,
            amount_b,
            lp_minted,
            "liquidity added"
        );
        Ok(receipt)
    }

    /// Burn LP shares and withdraw the pro-rata share of both reserves.
    pub fn remove_liquidity(
        &mut self,
        actor: &AccountId,
        lp_amount: u128,
    ) -> Result<RemoveLiquidityReceipt, LedgerError> {
        // -- validate & compute ------------------------------------------------
        if lp_amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let held = self.accounts.lp_shares(actor);
        if held < lp_amount {
            return Err(LedgerError::InsufficientLpShares {
                required: lp_amount,
                available: held,
            });
        }

        // held >= lp_amount > 0 implies total_lp_supply > 0
        let (amount_a, amount_b) = CpMath::redeem_amounts(
            self.pool.reserve_a,
            self.pool.reserve_b,
            lp_amount,
            self.pool.total_lp_supply,
        )?;

        for (side, amount) in [(TokenSide::A, amount_a), (TokenSide::B, amount_b)] {
            if !self.accounts.can_credit(actor, side, amount) {
                return Err(LedgerError::InvalidAmount {
                    reason: "token balance would exceed representable range",
                });
            }
        }
        // floor(reserve * lp / supply) <= reserve, and lp_amount <= supply
        let new_reserve_a = self.pool.reserve_a - amount_a;
        let new_reserve_b = self.pool.reserve_b - amount_b;
        let new_supply = self.pool.total_lp_supply - lp_amount;

        // -- commit ------------------------------------------------------------
        self.accounts.debit_lp(actor, lp_amount)?;
        self.accounts.credit(actor, TokenSide::A, amount_a)?;
        self.accounts.credit(actor, TokenSide::B, amount_b)?;
        self.pool.reserve_a = new_reserve_a;
        self.pool.reserve_b = new_reserve_b;
        self.pool.total_lp_supply = new_supply;

        let entry = self.journal.append(
            OpKind::RemoveLiquidity,
            actor.clone(),
            EntryAmounts::lp(lp_amount),
            EntryAmounts::tokens(amount_a, amount_b),
            self.reserve_snapshot(),
        );
        let receipt = RemoveLiquidityReceipt {
            sequence_id: entry.sequence_id,
            digest: entry.digest_hex(),
            lp_burned: lp_amount,
            amount_a,
            amount_b,
        };

        debug_assert!(self.pool.invariant_holds());
        info!(
            %actor,
            seq = receipt.sequence_id,
            lp_burned = lp_amount,
            amount_a,
            amount_b,
            "liquidity removed"
        );
        Ok(receipt)
    }

    /// Price a swap without mutating state. Same validation and formula
    /// as [`Self::swap`] minus the balance effects: succeeds exactly
    /// when an immediately following swap against unchanged state would,
    /// and returns the amount it would pay out.
    pub fn quote_swap(
        &self,
        amount_in: TokenAmount,
        direction: SwapDirection,
    ) -> Result<TokenAmount, LedgerError> {
        if amount_in == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if !self.pool.is_seeded() {
            return Err(LedgerError::PoolNotSeeded);
        }

        let (reserve_in, reserve_out) = match direction {
            SwapDirection::AToB => (self.pool.reserve_a, self.pool.reserve_b),
            SwapDirection::BToA => (self.pool.reserve_b, self.pool.reserve_a),
        };
        let amount_out = CpMath::swap_output(amount_in, reserve_in, reserve_out)?;
        if amount_out == 0 {
            return Err(LedgerError::AmountOutIsZero);
        }
        Ok(amount_out)
    }

    /// Current reserves, supply, and invariant product.
    pub fn pool_state(&self) -> PoolStateView {
        PoolStateView::from(&self.pool)
    }

    /// Marginal exchange rates for display.
    pub fn spot_rates(&self) -> Result<SpotRates, LedgerError> {
        self.pool.spot_rates()
    }

    /// Balances and LP shares for `actor`; zeroed for unseen actors.
    pub fn account(&self, actor: &AccountId) -> AccountState {
        self.accounts.view(actor)
    }

    /// Committed history, most recent first.
    pub fn history<'a>(
        &'a self,
        filter: &'a HistoryFilter,
    ) -> impl Iterator<Item = &'a JournalEntry> + 'a {
        self.journal.query(filter)
    }

    pub(crate) fn parts(&self) -> (&Pool, &AccountBook, &TransactionJournal) {
        (&self.pool, &self.accounts, &self.journal)
    }

    pub(crate) fn from_parts(
        pool: Pool,
        accounts: AccountBook,
        journal: TransactionJournal,
    ) -> Self {
        Self {
            pool,
            accounts,
            journal,
        }
    }

    fn reserve_snapshot(&self) -> ReserveSnapshot {
        ReserveSnapshot {
            reserve_a: self.pool.reserve_a,
            reserve_b: self.pool.reserve_b,
            total_lp_supply: self.pool.total_lp_supply,
        }
    }
}
