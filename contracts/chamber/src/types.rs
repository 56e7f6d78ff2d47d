//! Chamber — Shared Types
//!
//! `#[contracttype]` structs/enums passed across the contract boundary or
//! held in storage. Kept separate from `storage.rs` so the wire shape of a
//! value is visible without also reading how it's keyed.

use soroban_sdk::{contracttype, Address, BytesN, String, Symbol, Val, Vec};

/// Constructor arguments for `Chamber::initialize`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct InitConfig {
    pub asset: Address,
    pub nft: Address,
    pub seats: u32,
    pub name: String,
    pub symbol: String,
}

/// Persisted configuration, set once at `initialize` and read-only after.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Config {
    pub asset: Address,
    pub nft: Address,
    pub name: String,
    pub symbol: String,
}

/// A node in the sorted delegation list, keyed by NFT `token_id`.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardNode {
    pub token_id: u64,
    pub amount: i128,
    pub next_id: u64,
    pub prev_id: u64,
}

/// A seat-count change proposed by a director, pending the two-phase
/// timelock and a frozen quorum snapshot taken when the proposal opened.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PendingSeatUpdate {
    pub proposed: u32,
    pub created_at: u64,
    pub required_quorum: u32,
    pub supporters: Vec<u64>,
}

/// What a queued transaction does once it has enough confirmations.
///
/// Stands in for spec's `(target, value, data)` triple in an environment
/// with no calldata/selector ABI: `Invoke` carries the function symbol and
/// already-decoded arguments directly, and `Upgrade` is its own variant
/// rather than a magic selector match.
#[contracttype]
#[derive(Clone, Debug)]
pub enum TxAction {
    Transfer,
    Invoke(Symbol, Vec<Val>),
    Upgrade(BytesN<32>),
}

/// A transaction sitting in the confirmation queue.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Transaction {
    pub id: u64,
    pub executed: bool,
    pub confirmations: u32,
    pub target: Address,
    pub value: i128,
    pub action: TxAction,
}
