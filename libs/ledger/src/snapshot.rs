//! Snapshot records: versioned persistence of the ledger state
//!
//! The ledger serializes as three independent records — pool, accounts,
//! journal — each carrying its own format version and the owning pool
//! id, so a storage layer can persist and fetch them separately.
//! Restore cross-checks the pool ids and re-validates every ledger
//! invariant before accepting the state; the engine itself stays
//! agnostic to the storage medium.

use crate::accounts::{Account, AccountBook};
use crate::journal::{JournalEntry, TransactionJournal};
use crate::ledger::PoolLedger;
use crate::pool::Pool;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::{AccountId, PoolId};

pub const POOL_RECORD_VERSION: u16 = 1;
pub const ACCOUNTS_RECORD_VERSION: u16 = 1;
pub const JOURNAL_RECORD_VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot record failed to encode or decode")]
    Codec(#[from] bincode::Error),

    #[error("unsupported {record} record version {found} (expected {expected})")]
    Version {
        record: &'static str,
        expected: u16,
        found: u16,
    },

    #[error("snapshot records belong to different pools")]
    PoolMismatch,

    #[error("restored state violates ledger invariants: {reason}")]
    InvariantViolation { reason: &'static str },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PoolRecord {
    version: u16,
    pool_id: PoolId,
    pool: Pool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountsRecord {
    version: u16,
    pool_id: PoolId,
    accounts: Vec<(AccountId, Account)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JournalRecord {
    version: u16,
    pool_id: PoolId,
    entries: Vec<JournalEntry>,
}

/// The three encoded records. Callers store the byte blobs however they
/// like, keyed by the pool id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub pool_id: PoolId,
    pub pool: Vec<u8>,
    pub accounts: Vec<u8>,
    pub journal: Vec<u8>,
}

impl PoolLedger {
    /// Serialize the full ledger state into versioned records.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, SnapshotError> {
        let (pool, accounts, journal) = self.parts();
        let pool_id = pool.pool_id.clone();

        let pool_bytes = bincode::serialize(&PoolRecord {
            version: POOL_RECORD_VERSION,
            pool_id: pool_id.clone(),
            pool: pool.clone(),
        })?;
        let accounts_bytes = bincode::serialize(&AccountsRecord {
            version: ACCOUNTS_RECORD_VERSION,
            pool_id: pool_id.clone(),
            accounts: accounts
                .iter()
                .map(|(id, account)| (id.clone(), account.clone()))
                .collect(),
        })?;
        let journal_bytes = bincode::serialize(&JournalRecord {
            version: JOURNAL_RECORD_VERSION,
            pool_id: pool_id.clone(),
            entries: journal.entries().to_vec(),
        })?;

        Ok(LedgerSnapshot {
            pool_id,
            pool: pool_bytes,
            accounts: accounts_bytes,
            journal: journal_bytes,
        })
    }

    /// Rebuild a ledger from snapshot records, validating versions,
    /// record coherence, and every state invariant.
    pub fn restore(snapshot: &LedgerSnapshot) -> Result<Self, SnapshotError> {
        let pool_record: PoolRecord = bincode::deserialize(&snapshot.pool)?;
        check_version("pool", POOL_RECORD_VERSION, pool_record.version)?;
        let accounts_record: AccountsRecord = bincode::deserialize(&snapshot.accounts)?;
        check_version("accounts", ACCOUNTS_RECORD_VERSION, accounts_record.version)?;
        let journal_record: JournalRecord = bincode::deserialize(&snapshot.journal)?;
        check_version("journal", JOURNAL_RECORD_VERSION, journal_record.version)?;

        if pool_record.pool_id != accounts_record.pool_id
            || pool_record.pool_id != journal_record.pool_id
            || pool_record.pool_id != pool_record.pool.pool_id
        {
            return Err(SnapshotError::PoolMismatch);
        }

        let pool = pool_record.pool;
        if !pool.invariant_holds() {
            return Err(SnapshotError::InvariantViolation {
                reason: "reserve/supply invariant does not hold",
            });
        }

        let accounts = AccountBook::from_entries(accounts_record.accounts);
        if accounts.total_lp_shares() != pool.total_lp_supply {
            return Err(SnapshotError::InvariantViolation {
                reason: "sum of account lp shares does not equal total lp supply",
            });
        }

        validate_journal(&journal_record.entries)?;
        let journal =
            TransactionJournal::from_entries(journal_record.pool_id, journal_record.entries);

        Ok(PoolLedger::from_parts(pool, accounts, journal))
    }
}

fn check_version(record: &'static str, expected: u16, found: u16) -> Result<(), SnapshotError> {
    if expected != found {
        return Err(SnapshotError::Version {
            record,
            expected,
            found,
        });
    }
    Ok(())
}

fn validate_journal(entries: &[JournalEntry]) -> Result<(), SnapshotError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.sequence_id != index as u64 + 1 {
            return Err(SnapshotError::InvariantViolation {
                reason: "journal sequence ids are not dense from one",
            });
        }
    }
    if entries
        .windows(2)
        .any(|pair| pair[0].timestamp_ns > pair[1].timestamp_ns)
    {
        return Err(SnapshotError::InvariantViolation {
            reason: "journal timestamps decrease",
        });
    }
    Ok(())
}
