//! Test world construction
//!
//! Every suite starts from the same seeded world: the demo pool at
//! reserves 10000/20000 (LP supply 14142, held by the provider) plus
//! funded trader accounts.

use sluice_ledger::config::{AccountGenesis, InitialLiquidity, PoolGenesis, TokenGenesis};
use sluice_ledger::{GenesisConfig, PoolLedger};
use types::AccountId;

pub const PROVIDER: &str = "0x76270242b5E3Ec5282e293e645026d409bCdc019";
pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Genesis for the demo world: provider seeds 10000/20000, alice
/// and bob each hold 100000 of both tokens.
pub fn demo_genesis() -> GenesisConfig {
    GenesisConfig {
        pool: PoolGenesis {
            id: "pool_wbkc_e20c".to_string(),
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
                id: PROVIDER.to_string(),
                balance_a: 10_000,
                balance_b: 20_000,
            },
            AccountGenesis {
                id: ALICE.to_string(),
                balance_a: 100_000,
                balance_b: 100_000,
            },
            AccountGenesis {
                id: BOB.to_string(),
                balance_a: 100_000,
                balance_b: 100_000,
            },
        ],
        initial_liquidity: Some(InitialLiquidity {
            provider: PROVIDER.to_string(),
            amount_a: 10_000,
            amount_b: 20_000,
        }),
    }
}

pub fn seeded_ledger() -> PoolLedger {
    let ledger = PoolLedger::from_genesis(&demo_genesis()).expect("genesis world is valid");
    tracing::debug!(pool = %ledger.pool_state().pool_id, "test world seeded");
    ledger
}

/// Sum a token across every known account plus the pool reserve.
pub fn system_total_a(ledger: &PoolLedger) -> u128 {
    let state = ledger.pool_state();
    state.reserve_a
        + [PROVIDER, ALICE, BOB]
            .iter()
            .map(|id| ledger.account(&AccountId::from(*id)).balance_a)
            .sum::<u128>()
}

pub fn system_total_b(ledger: &PoolLedger) -> u128 {
    let state = ledger.pool_state();
    state.reserve_b
        + [PROVIDER, ALICE, BOB]
            .iter()
            .map(|id| ledger.account(&AccountId::from(*id)).balance_b)
            .sum::<u128>()
}
