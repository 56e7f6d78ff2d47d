//! Chamber — Event Publishing
//!
//! One `emit_*` helper per event, kept out of `lib.rs` so the entry points
//! read as state transitions, not state transitions plus wire formatting.

use soroban_sdk::{Address, Env, Symbol};

pub fn emit_chamber_created(
    env: &Env,
    chamber: &Address,
    seats: u32,
    asset: &Address,
    nft: &Address,
) {
    env.events().publish(
        (Symbol::new(env, "chamber_created"),),
        (chamber.clone(), seats, asset.clone(), nft.clone()),
    );
}

pub fn emit_deposit(env: &Env, caller: &Address, receiver: &Address, assets: i128, shares: i128) {
    env.events().publish(
        (Symbol::new(env, "deposit"),),
        (caller.clone(), receiver.clone(), assets, shares),
    );
}

pub fn emit_withdraw(
    env: &Env,
    caller: &Address,
    receiver: &Address,
    owner: &Address,
    assets: i128,
    shares: i128,
) {
    env.events().publish(
        (Symbol::new(env, "withdraw"),),
        (caller.clone(), receiver.clone(), owner.clone(), assets, shares),
    );
}

pub fn emit_transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events()
        .publish((Symbol::new(env, "transfer"),), (from.clone(), to.clone(), amount));
}

pub fn emit_delegation_updated(env: &Env, account: &Address, token_id: u64, new_total: i128) {
    env.events().publish(
        (Symbol::new(env, "delegation_updated"), token_id),
        (account.clone(), new_total),
    );
}

pub fn emit_set_seats(env: &Env, proposer_token_id: u64, proposed: u32) {
    env.events()
        .publish((Symbol::new(env, "set_seats"),), (proposer_token_id, proposed));
}

pub fn emit_seat_update_cancelled(env: &Env, proposer_token_id: u64) {
    env.events()
        .publish((Symbol::new(env, "seat_update_cancelled"),), (proposer_token_id,));
}

pub fn emit_execute_set_seats(env: &Env, executor_token_id: u64, seats: u32) {
    env.events()
        .publish((Symbol::new(env, "execute_set_seats"),), (executor_token_id, seats));
}

pub fn emit_transaction_submitted(env: &Env, tx_id: u64, target: &Address, value: i128) {
    env.events().publish(
        (Symbol::new(env, "transaction_submitted"), tx_id),
        (target.clone(), value),
    );
}

pub fn emit_transaction_confirmed(env: &Env, tx_id: u64, confirmer: &Address) {
    env.events().publish(
        (Symbol::new(env, "transaction_confirmed"), tx_id),
        (confirmer.clone(),),
    );
}

pub fn emit_revoke_confirmation(env: &Env, token_id: u64, tx_id: u64) {
    env.events()
        .publish((Symbol::new(env, "revoke_confirmation"), tx_id), (token_id,));
}

pub fn emit_transaction_executed(env: &Env, tx_id: u64, executor: &Address) {
    env.events().publish(
        (Symbol::new(env, "transaction_executed"), tx_id),
        (executor.clone(),),
    );
}
