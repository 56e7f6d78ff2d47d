//! Chamber — Storage Layout
//!
//! One `DataKey` enum enumerates every slot the contract ever reads or
//! writes. Singletons (config, seat count, head/tail/size, the circuit
//! breaker and reentrancy flags) live in `instance()` storage since they're
//! touched by almost every entry point; per-entity records (board nodes,
//! transactions, confirmations, delegations, balances, allowances) live in
//! `persistent()` storage and carry their own TTL bumps.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ChamberError;
use crate::types::{BoardNode, Config, PendingSeatUpdate, Transaction};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Config,
    ReentrancyLock,

    TotalShares,
    ShareBalance(Address),
    Allowance(Address, Address),
    Delegation(Address, u64),
    TotalDelegations(Address),

    Node(u64),
    HeadId,
    TailId,
    Size,
    Seats,
    CircuitBreaker,
    PendingSeatUpdate,

    Tx(u64),
    NextTxId,
    Confirmed(u64, u64),
}

const INSTANCE_TTL_THRESHOLD: u32 = 17_280 * 7;
const INSTANCE_TTL: u32 = 17_280 * 30;

const PERSISTENT_TTL_THRESHOLD: u32 = 17_280 * 30;
const PERSISTENT_TTL: u32 = 17_280 * 90;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL);
}

// ---- Initialization / config -------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<Config, ChamberError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ChamberError::NotInitialized)
}

// ---- Reentrancy ---------------------------------------------------------

pub fn is_reentrant_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::ReentrancyLock)
        .unwrap_or(false)
}

pub fn set_reentrant_locked(env: &Env, locked: bool) {
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyLock, &locked);
}

// ---- Share vault ---------------------------------------------------------
//
// `totalAssets` is deliberately not tracked here as a counter: spec.md §3
// defines it as "the balance of the underlying asset held by the Chamber"
// and names external transfers into the vault as a ratio-changing
// mechanism in their own right, so the only faithful source is a live read
// of `token::balance` (see `Chamber::total_assets` in `lib.rs`), the same
// way the teacher's vault reads its own balance rather than shadowing it.

pub fn get_total_shares(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalShares).unwrap_or(0)
}

pub fn set_total_shares(env: &Env, value: i128) {
    env.storage().instance().set(&DataKey::TotalShares, &value);
}

pub fn get_share_balance(env: &Env, account: &Address) -> i128 {
    let key = DataKey::ShareBalance(account.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_share_balance(env: &Env, account: &Address, value: i128) {
    let key = DataKey::ShareBalance(account.clone());
    env.storage().persistent().set(&key, &value);
    extend_persistent_ttl(env, &key);
}

pub fn get_allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, value: i128) {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    env.storage().persistent().set(&key, &value);
    extend_persistent_ttl(env, &key);
}

// ---- Delegation -----------------------------------------------------------

pub fn get_delegation(env: &Env, account: &Address, token_id: u64) -> i128 {
    let key = DataKey::Delegation(account.clone(), token_id);
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_delegation(env: &Env, account: &Address, token_id: u64, value: i128) {
    let key = DataKey::Delegation(account.clone(), token_id);
    env.storage().persistent().set(&key, &value);
    extend_persistent_ttl(env, &key);
}

pub fn get_total_delegations(env: &Env, account: &Address) -> i128 {
    let key = DataKey::TotalDelegations(account.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_total_delegations(env: &Env, account: &Address, value: i128) {
    let key = DataKey::TotalDelegations(account.clone());
    env.storage().persistent().set(&key, &value);
    extend_persistent_ttl(env, &key);
}

// ---- Board ----------------------------------------------------------------

pub fn get_node(env: &Env, token_id: u64) -> Option<BoardNode> {
    env.storage().persistent().get(&DataKey::Node(token_id))
}

pub fn set_node(env: &Env, token_id: u64, node: &BoardNode) {
    let key = DataKey::Node(token_id);
    env.storage().persistent().set(&key, node);
    extend_persistent_ttl(env, &key);
}

pub fn remove_node(env: &Env, token_id: u64) {
    env.storage().persistent().remove(&DataKey::Node(token_id));
}

pub fn get_head_id(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::HeadId).unwrap_or(0)
}

pub fn set_head_id(env: &Env, id: u64) {
    env.storage().instance().set(&DataKey::HeadId, &id);
}

pub fn get_tail_id(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::TailId).unwrap_or(0)
}

pub fn set_tail_id(env: &Env, id: u64) {
    env.storage().instance().set(&DataKey::TailId, &id);
}

pub fn get_size(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Size).unwrap_or(0)
}

pub fn set_size(env: &Env, size: u32) {
    env.storage().instance().set(&DataKey::Size, &size);
}

pub fn get_seats(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Seats).unwrap_or(0)
}

pub fn set_seats(env: &Env, seats: u32) {
    env.storage().instance().set(&DataKey::Seats, &seats);
}

pub fn is_circuit_breaker_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::CircuitBreaker)
        .unwrap_or(false)
}

pub fn set_circuit_breaker_locked(env: &Env, locked: bool) {
    env.storage()
        .instance()
        .set(&DataKey::CircuitBreaker, &locked);
}

pub fn get_pending_seat_update(env: &Env) -> Option<PendingSeatUpdate> {
    env.storage().instance().get(&DataKey::PendingSeatUpdate)
}

pub fn set_pending_seat_update(env: &Env, proposal: &PendingSeatUpdate) {
    env.storage()
        .instance()
        .set(&DataKey::PendingSeatUpdate, proposal);
}

pub fn clear_pending_seat_update(env: &Env) {
    env.storage().instance().remove(&DataKey::PendingSeatUpdate);
}

// ---- Wallet -----------------------------------------------------------------

pub fn next_tx_id(env: &Env) -> u64 {
    let id: u64 = env.storage().instance().get(&DataKey::NextTxId).unwrap_or(0);
    env.storage().instance().set(&DataKey::NextTxId, &(id + 1));
    id
}

pub fn tx_count(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::NextTxId).unwrap_or(0)
}

pub fn get_tx(env: &Env, id: u64) -> Option<Transaction> {
    env.storage().persistent().get(&DataKey::Tx(id))
}

pub fn set_tx(env: &Env, tx: &Transaction) {
    let key = DataKey::Tx(tx.id);
    env.storage().persistent().set(&key, tx);
    extend_persistent_ttl(env, &key);
}

pub fn is_confirmed(env: &Env, tx_id: u64, token_id: u64) -> bool {
    let key = DataKey::Confirmed(tx_id, token_id);
    env.storage().persistent().get(&key).unwrap_or(false)
}

pub fn set_confirmed(env: &Env, tx_id: u64, token_id: u64, confirmed: bool) {
    let key = DataKey::Confirmed(tx_id, token_id);
    env.storage().persistent().set(&key, &confirmed);
    extend_persistent_ttl(env, &key);
}
