//! Serialized access to the ledger
//!
//! Two wrappers, both satisfying the single-writer discipline:
//!
//! - [`LedgerService`] / [`LedgerHandle`] — an owning tokio task that
//!   drains a command queue in arrival order and answers over oneshot
//!   channels. Operations from any number of handles are applied one at
//!   a time, FIFO; no operation ever observes a half-committed state.
//! - [`SharedLedger`] — a mutex-wrapped ledger for callers that prefer
//!   lock-based serialization over message passing.

use crate::accounts::AccountState;
use crate::error::LedgerError;
use crate::journal::{HistoryFilter, JournalEntry};
use crate::ledger::{
    AddLiquidityReceipt, PoolLedger, RemoveLiquidityReceipt, SwapReceipt,
};
use crate::pool::PoolStateView;
use parking_lot::Mutex;
use sluice_amm::SpotRates;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use types::{AccountId, SwapDirection, TokenAmount};

/// Queue depth before submitters are back-pressured.
const COMMAND_QUEUE_DEPTH: usize = 64;

/// One queued request, carrying its reply channel.
#[derive(Debug)]
pub enum LedgerCommand {
    Swap {
        actor: AccountId,
        amount_in: TokenAmount,
        direction: SwapDirection,
        reply: oneshot::Sender<Result<SwapReceipt, LedgerError>>,
    },
    AddLiquidity {
        actor: AccountId,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
        reply: oneshot::Sender<Result<AddLiquidityReceipt, LedgerError>>,
    },
    RemoveLiquidity {
        actor: AccountId,
        lp_amount: u128,
        reply: oneshot::Sender<Result<RemoveLiquidityReceipt, LedgerError>>,
    },
    QuoteSwap {
        amount_in: TokenAmount,
        direction: SwapDirection,
        reply: oneshot::Sender<Result<TokenAmount, LedgerError>>,
    },
    PoolState {
        reply: oneshot::Sender<PoolStateView>,
    },
    SpotRates {
        reply: oneshot::Sender<Result<SpotRates, LedgerError>>,
    },
    Account {
        actor: AccountId,
        reply: oneshot::Sender<AccountState>,
    },
    History {
        filter: HistoryFilter,
        reply: oneshot::Sender<Vec<JournalEntry>>,
    },
}

/// The owning task. Exists only as a namespace for [`Self::spawn`].
pub struct LedgerService;

impl LedgerService {
    /// Move `ledger` into a background task and return the client
    /// handle. The task exits when every handle has been dropped.
    pub fn spawn(ledger: PoolLedger) -> LedgerHandle {
        let (tx, mut rx) = mpsc::channel::<LedgerCommand>(COMMAND_QUEUE_DEPTH);

        tokio::spawn(async move {
            let mut ledger = ledger;
            info!(pool = %ledger.pool_state().pool_id, "ledger service started");
            while let Some(command) = rx.recv().await {
                Self::handle(&mut ledger, command);
            }
            debug!("ledger service stopped: all handles dropped");
        });

        LedgerHandle { tx }
    }

    fn handle(ledger: &mut PoolLedger, command: LedgerCommand) {
        // A dropped reply receiver means the submitter gave up waiting;
        // the operation still committed (or was rejected) atomically, so
        // the send result is intentionally ignored.
        match command {
            LedgerCommand::Swap {
                actor,
                amount_in,
                direction,
                reply,
            } => {
                let _ = reply.send(ledger.swap(&actor, amount_in, direction));
            }
            LedgerCommand::AddLiquidity {
                actor,
                amount_a,
                amount_b,
                reply,
            } => {
                let _ = reply.send(ledger.add_liquidity(&actor, amount_a, amount_b));
            }
            LedgerCommand::RemoveLiquidity {
                actor,
                lp_amount,
                reply,
            } => {
                let _ = reply.send(ledger.remove_liquidity(&actor, lp_amount));
            }
            LedgerCommand::QuoteSwap {
                amount_in,
                direction,
                reply,
            } => {
                let _ = reply.send(ledger.quote_swap(amount_in, direction));
            }
            LedgerCommand::PoolState { reply } => {
                let _ = reply.send(ledger.pool_state());
            }
            LedgerCommand::SpotRates { reply } => {
                let _ = reply.send(ledger.spot_rates());
            }
            LedgerCommand::Account { actor, reply } => {
                let _ = reply.send(ledger.account(&actor));
            }
            LedgerCommand::History { filter, reply } => {
                let _ = reply.send(ledger.history(&filter).cloned().collect());
            }
        }
    }
}

/// Cloneable client side of the service queue.
#[derive(Debug, Clone)]
pub struct LedgerHandle {
    tx: mpsc::Sender<LedgerCommand>,
}

impl LedgerHandle {
    pub async fn swap(
        &self,
        actor: impl Into<AccountId>,
        amount_in: TokenAmount,
        direction: SwapDirection,
    ) -> Result<SwapReceipt, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::Swap {
            actor: actor.into(),
            amount_in,
            direction,
            reply,
        })
        .await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)?
    }

    pub async fn add_liquidity(
        &self,
        actor: impl Into<AccountId>,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
    ) -> Result<AddLiquidityReceipt, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::AddLiquidity {
            actor: actor.into(),
            amount_a,
            amount_b,
            reply,
        })
        .await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)?
    }

    pub async fn remove_liquidity(
        &self,
        actor: impl Into<AccountId>,
        lp_amount: u128,
    ) -> Result<RemoveLiquidityReceipt, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::RemoveLiquidity {
            actor: actor.into(),
            lp_amount,
            reply,
        })
        .await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)?
    }

    pub async fn quote_swap(
        &self,
        amount_in: TokenAmount,
        direction: SwapDirection,
    ) -> Result<TokenAmount, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::QuoteSwap {
            amount_in,
            direction,
            reply,
        })
        .await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)?
    }

    pub async fn pool_state(&self) -> Result<PoolStateView, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::PoolState { reply }).await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)
    }

    pub async fn spot_rates(&self) -> Result<SpotRates, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::SpotRates { reply }).await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)?
    }

    pub async fn account(
        &self,
        actor: impl Into<AccountId>,
    ) -> Result<AccountState, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::Account {
            actor: actor.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)
    }

    pub async fn history(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<JournalEntry>, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.submit(LedgerCommand::History { filter, reply }).await?;
        rx.await.map_err(|_| LedgerError::ServiceStopped)
    }

    async fn submit(&self, command: LedgerCommand) -> Result<(), LedgerError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| LedgerError::ServiceStopped)
    }
}

/// Mutex-based alternative for synchronous hosts. The closure runs
/// under the lock, so each call is one serialized transaction.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<PoolLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: PoolLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&mut PoolLedger) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn swap(
        &self,
        actor: impl Into<AccountId>,
        amount_in: TokenAmount,
        direction: SwapDirection,
    ) -> Result<SwapReceipt, LedgerError> {
        let actor = actor.into();
        self.with(|ledger| ledger.swap(&actor, amount_in, direction))
    }

    pub fn add_liquidity(
        &self,
        actor: impl Into<AccountId>,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
    ) -> Result<AddLiquidityReceipt, LedgerError> {
        let actor = actor.into();
        self.with(|ledger| ledger.add_liquidity(&actor, amount_a, amount_b))
    }

    pub fn remove_liquidity(
        &self,
        actor: impl Into<AccountId>,
        lp_amount: u128,
    ) -> Result<RemoveLiquidityReceipt, LedgerError> {
        let actor = actor.into();
        self.with(|ledger| ledger.remove_liquidity(&actor, lp_amount))
    }

    pub fn quote_swap(
        &self,
        amount_in: TokenAmount,
        direction: SwapDirection,
    ) -> Result<TokenAmount, LedgerError> {
        self.with(|ledger| ledger.quote_swap(amount_in, direction))
    }

    pub fn pool_state(&self) -> PoolStateView {
        self.with(|ledger| ledger.pool_state())
    }

    pub fn account(&self, actor: impl Into<AccountId>) -> AccountState {
        let actor = actor.into();
        self.with(|ledger| ledger.account(&actor))
    }

    pub fn history(&self, filter: &HistoryFilter) -> Vec<JournalEntry> {
        self.with(|ledger| ledger.history(filter).cloned().collect())
    }
}
