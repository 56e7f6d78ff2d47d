//! Board — sorted delegation ledger.
//!
//! A doubly-linked list of `BoardNode`s ordered by delegated amount,
//! descending, ties broken older-first (new arrivals land after every
//! existing node carrying the same amount). Bounded to `MAX_NODES` so a
//! reposition walk is always cheap. Mutators run under a circuit breaker —
//! a dedicated flag rather than relying on call-depth tricks, since Soroban
//! gives no native reentrancy detection.

use soroban_sdk::{Env, Vec};

use crate::errors::ChamberError;
use crate::storage;
use crate::types::{BoardNode, PendingSeatUpdate};

pub const MAX_NODES: u32 = 100;
pub const MAX_SEATS: u32 = 20;
const SEAT_UPDATE_TIMELOCK_SECS: u64 = 7 * 24 * 60 * 60;

struct CircuitBreakerGuard {
    env: Env,
}

impl CircuitBreakerGuard {
    fn enter(env: &Env) -> Result<Self, ChamberError> {
        if storage::is_circuit_breaker_locked(env) {
            return Err(ChamberError::CircuitBreakerActive);
        }
        storage::set_circuit_breaker_locked(env, true);
        Ok(Self { env: env.clone() })
    }
}

impl Drop for CircuitBreakerGuard {
    fn drop(&mut self) {
        storage::set_circuit_breaker_locked(&self.env, false);
    }
}

pub fn get_seats(env: &Env) -> u32 {
    storage::get_seats(env)
}

pub fn quorum(env: &Env) -> u32 {
    let seats = storage::get_seats(env);
    1 + (seats * 51) / 100
}

pub fn get_node(env: &Env, token_id: u64) -> Option<BoardNode> {
    storage::get_node(env, token_id)
}

/// Returns up to `n` `(token_id, amount)` pairs walking the list head-first.
pub fn top(env: &Env, n: u32) -> (Vec<u64>, Vec<i128>) {
    let mut ids = Vec::new(env);
    let mut amounts = Vec::new(env);
    let size = storage::get_size(env);
    let take = core::cmp::min(n, size);
    let mut cursor = storage::get_head_id(env);
    for _ in 0..take {
        if cursor == 0 {
            break;
        }
        let node = storage::get_node(env, cursor).expect("board index corrupt");
        ids.push_back(node.token_id);
        amounts.push_back(node.amount);
        cursor = node.next_id;
    }
    (ids, amounts)
}

/// Bootstraps the seat count at `initialize` time, before any director
/// exists to vote on a change.
pub fn initialize_seats(env: &Env, n: u32) -> Result<(), ChamberError> {
    if n == 0 || n > MAX_SEATS {
        return Err(ChamberError::InvalidNumSeats);
    }
    storage::set_seats(env, n);
    Ok(())
}

fn find_insert_before(env: &Env, amount: i128) -> Option<u64> {
    let mut cursor = storage::get_head_id(env);
    while cursor != 0 {
        let node = storage::get_node(env, cursor).expect("board index corrupt");
        if node.amount < amount {
            return Some(cursor);
        }
        cursor = node.next_id;
    }
    None
}

fn insert_node(env: &Env, token_id: u64, amount: i128) -> Result<(), ChamberError> {
    let size = storage::get_size(env);
    if size >= MAX_NODES {
        return Err(ChamberError::MaxNodesReached);
    }

    match find_insert_before(env, amount) {
        Some(before_id) => {
            let mut before_node = storage::get_node(env, before_id).expect("board index corrupt");
            let prev_id = before_node.prev_id;
            let new_node = BoardNode {
                token_id,
                amount,
                next_id: before_id,
                prev_id,
            };
            before_node.prev_id = token_id;
            storage::set_node(env, before_id, &before_node);

            if prev_id == 0 {
                storage::set_head_id(env, token_id);
            } else {
                let mut prev_node = storage::get_node(env, prev_id).expect("board index corrupt");
                prev_node.next_id = token_id;
                storage::set_node(env, prev_id, &prev_node);
            }
            storage::set_node(env, token_id, &new_node);
        }
        None => {
            let tail = storage::get_tail_id(env);
            let new_node = BoardNode {
                token_id,
                amount,
                next_id: 0,
                prev_id: tail,
            };
            storage::set_node(env, token_id, &new_node);
            if tail == 0 {
                storage::set_head_id(env, token_id);
            } else {
                let mut tail_node = storage::get_node(env, tail).expect("board index corrupt");
                tail_node.next_id = token_id;
                storage::set_node(env, tail, &tail_node);
            }
            storage::set_tail_id(env, token_id);
        }
    }
    storage::set_size(env, size + 1);
    Ok(())
}

fn unlink_node(env: &Env, token_id: u64) -> Result<(), ChamberError> {
    let node = storage::get_node(env, token_id).ok_or(ChamberError::NodeDoesNotExist)?;

    if node.prev_id == 0 {
        storage::set_head_id(env, node.next_id);
    } else {
        let mut prev = storage::get_node(env, node.prev_id).expect("board index corrupt");
        prev.next_id = node.next_id;
        storage::set_node(env, node.prev_id, &prev);
    }

    if node.next_id == 0 {
        storage::set_tail_id(env, node.prev_id);
    } else {
        let mut next = storage::get_node(env, node.next_id).expect("board index corrupt");
        next.prev_id = node.prev_id;
        storage::set_node(env, node.next_id, &next);
    }

    storage::remove_node(env, token_id);
    storage::set_size(env, storage::get_size(env) - 1);
    Ok(())
}

/// Adds `amount` to `token_id`'s delegation, repositioning it in the list.
pub fn delegate(env: &Env, token_id: u64, amount: i128) -> Result<(), ChamberError> {
    let _guard = CircuitBreakerGuard::enter(env)?;
    match storage::get_node(env, token_id) {
        Some(node) => {
            let new_amount = node.amount + amount;
            unlink_node(env, token_id)?;
            insert_node(env, token_id, new_amount)?;
        }
        None => {
            insert_node(env, token_id, amount)?;
        }
    }
    Ok(())
}

/// Removes `amount` from `token_id`'s delegation. Drops the node entirely
/// if the remaining amount is zero.
pub fn undelegate(env: &Env, token_id: u64, amount: i128) -> Result<(), ChamberError> {
    let _guard = CircuitBreakerGuard::enter(env)?;
    let node = storage::get_node(env, token_id).ok_or(ChamberError::NodeDoesNotExist)?;
    if amount > node.amount {
        return Err(ChamberError::AmountExceedsDelegation);
    }
    let new_amount = node.amount - amount;
    unlink_node(env, token_id)?;
    if new_amount > 0 {
        insert_node(env, token_id, new_amount)?;
    }
    Ok(())
}

/// What `set_seats` did, so the caller in `lib.rs` knows which event to emit.
pub enum SeatUpdateOutcome {
    /// A proposal was opened or gained a new supporter.
    Proposed,
    /// A conflicting proposal was deleted. No new proposal is opened by the
    /// same call — per scenario 5, a fresh call is required to start one.
    Cancelled,
}

/// First call for a seat count sets it directly (no directors exist yet to
/// vote); every later call opens or joins a pending proposal. A differing
/// proposed value from any director cancels the one in flight instead of
/// competing with it — the caller gets no proposal of their own out of the
/// same call, only the cancellation.
pub fn set_seats(env: &Env, proposer_token_id: u64, n: u32) -> Result<SeatUpdateOutcome, ChamberError> {
    let _guard = CircuitBreakerGuard::enter(env)?;
    if n == 0 || n > MAX_SEATS {
        return Err(ChamberError::InvalidNumSeats);
    }

    match storage::get_pending_seat_update(env) {
        None => {
            let mut supporters = Vec::new(env);
            supporters.push_back(proposer_token_id);
            let proposal = PendingSeatUpdate {
                proposed: n,
                created_at: env.ledger().timestamp(),
                required_quorum: quorum(env),
                supporters,
            };
            storage::set_pending_seat_update(env, &proposal);
            Ok(SeatUpdateOutcome::Proposed)
        }
        Some(mut proposal) => {
            if n != proposal.proposed {
                storage::clear_pending_seat_update(env);
                Ok(SeatUpdateOutcome::Cancelled)
            } else {
                if proposal.supporters.contains(&proposer_token_id) {
                    return Err(ChamberError::AlreadySentUpdateRequest);
                }
                proposal.supporters.push_back(proposer_token_id);
                storage::set_pending_seat_update(env, &proposal);
                Ok(SeatUpdateOutcome::Proposed)
            }
        }
    }
}

/// Executes a pending seat change once its timelock has elapsed and its
/// frozen quorum has been met.
pub fn execute_seats_update(env: &Env) -> Result<u32, ChamberError> {
    let _guard = CircuitBreakerGuard::enter(env)?;
    let proposal = storage::get_pending_seat_update(env).ok_or(ChamberError::InvalidProposal)?;

    let now = env.ledger().timestamp();
    if now < proposal.created_at + SEAT_UPDATE_TIMELOCK_SECS {
        return Err(ChamberError::TimelockNotExpired);
    }
    if proposal.supporters.len() < proposal.required_quorum {
        return Err(ChamberError::InsufficientVotes);
    }

    storage::set_seats(env, proposal.proposed);
    storage::clear_pending_seat_update(env);
    Ok(proposal.proposed)
}
