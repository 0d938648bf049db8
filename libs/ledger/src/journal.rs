//! Transaction journal: append-only, ordered history
//!
//! Entries are assigned dense sequence ids at commit time and carry a
//! snapshot of the reserves immediately after the operation, which is
//! what makes the journal sufficient for audit and replay. Nothing is
//! ever overwritten or removed.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::time::{SystemTime, UNIX_EPOCH};
use types::{AccountId, OpKind, PoolId};

/// Token and LP quantities on one side (inputs or outputs) of an entry.
///
/// Unused positions stay zero: a swap's inputs carry one token amount, a
/// liquidity removal's inputs carry only `lp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAmounts {
    pub token_a: u128,
    pub token_b: u128,
    pub lp: u128,
}

impl EntryAmounts {
    pub fn tokens(token_a: u128, token_b: u128) -> Self {
        Self {
            token_a,
            token_b,
            lp: 0,
        }
    }

    pub fn lp(lp: u128) -> Self {
        Self {
            token_a: 0,
            token_b: 0,
            lp,
        }
    }
}

/// Pool state immediately after the entry's operation committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub reserve_a: u128,
    pub reserve_b: u128,
    pub total_lp_supply: u128,
}

/// One committed operation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Dense, monotonically increasing, assigned at commit.
    pub sequence_id: u64,
    pub kind: OpKind,
    pub actor: AccountId,
    pub inputs: EntryAmounts,
    pub outputs: EntryAmounts,
    /// Wall-clock nanoseconds, clamped to be non-decreasing across
    /// entries.
    pub timestamp_ns: u64,
    pub resulting_reserves: ReserveSnapshot,
    /// Keccak-256 over (pool, sequence, kind, actor, amounts). Excludes
    /// the timestamp so identical replays produce identical digests.
    pub digest: [u8; 32],
}

impl JournalEntry {
    /// Hex form of the digest, `0x`-prefixed, for display and receipts.
    pub fn digest_hex(&self) -> String {
        format!("0x{}", hex::encode(self.digest))
    }
}

/// Filter for history queries. Empty filter returns everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    pub actor: Option<AccountId>,
    pub kind: Option<OpKind>,
    pub limit: Option<usize>,
}

impl HistoryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn actor(mut self, actor: impl Into<AccountId>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn kind(mut self, kind: OpKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Append-only journal for one pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionJournal {
    pool_id: PoolId,
    entries: Vec<JournalEntry>,
    last_timestamp_ns: u64,
}

impl TransactionJournal {
    pub fn new(pool_id: PoolId) -> Self {
        Self {
            pool_id,
            entries: Vec::new(),
            last_timestamp_ns: 0,
        }
    }

    pub fn pool_id(&self) -> &PoolId {
        &self.pool_id
    }

    /// The sequence id the next committed entry will receive.
    pub fn next_sequence_id(&self) -> u64 {
        self.entries.len() as u64 + 1
    }

    /// Append a committed operation. Assigns the sequence id, a
    /// non-decreasing timestamp, and the entry digest.
    pub fn append(
        &mut self,
        kind: OpKind,
        actor: AccountId,
        inputs: EntryAmounts,
        outputs: EntryAmounts,
        resulting_reserves: ReserveSnapshot,
    ) -> &JournalEntry {
        let sequence_id = self.next_sequence_id();
        let timestamp_ns = self.tick();
        let digest = entry_digest(&self.pool_id, sequence_id, kind, &actor, &inputs, &outputs);

        self.entries.push(JournalEntry {
            sequence_id,
            kind,
            actor,
            inputs,
            outputs,
            timestamp_ns,
            resulting_reserves,
            digest,
        });

        // just pushed
        self.entries.last().unwrap()
    }

    /// Most-recent-first iteration over committed entries matching
    /// `filter`. Side-effect free and restartable: a re-query over
    /// unchanged state yields the same sequence.
    pub fn query<'a>(
        &'a self,
        filter: &'a HistoryFilter,
    ) -> impl Iterator<Item = &'a JournalEntry> + 'a {
        self.entries
            .iter()
            .rev()
            .filter(move |entry| {
                filter
                    .actor
                    .as_ref()
                    .map(|actor| &entry.actor == actor)
                    .unwrap_or(true)
            })
            .filter(move |entry| filter.kind.map(|kind| entry.kind == kind).unwrap_or(true))
            .take(filter.limit.unwrap_or(usize::MAX))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Rebuild from persisted entries. The caller (snapshot restore)
    /// validates sequence density and timestamp ordering first.
    pub fn from_entries(pool_id: PoolId, entries: Vec<JournalEntry>) -> Self {
        let last_timestamp_ns = entries.last().map(|e| e.timestamp_ns).unwrap_or(0);
        Self {
            pool_id,
            entries,
            last_timestamp_ns,
        }
    }

    /// Logical clock: wall time clamped to never run backwards across
    /// entries.
    fn tick(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(self.last_timestamp_ns);
        let ts = now.max(self.last_timestamp_ns);
        self.last_timestamp_ns = ts;
        ts
    }
}

fn entry_digest(
    pool_id: &PoolId,
    sequence_id: u64,
    kind: OpKind,
    actor: &AccountId,
    inputs: &EntryAmounts,
    outputs: &EntryAmounts,
) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(pool_id.as_str().as_bytes());
    hasher.update(sequence_id.to_be_bytes());
    hasher.update([kind.tag()]);
    hasher.update(actor.as_str().as_bytes());
    for amount in [
        inputs.token_a,
        inputs.token_b,
        inputs.lp,
        outputs.token_a,
        outputs.token_b,
        outputs.lp,
    ] {
        hasher.update(amount.to_be_bytes());
    }
    hasher.finalize().into()
}
