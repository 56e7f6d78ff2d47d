//! Wallet — confirmation queue and CEI-ordered execution.
//!
//! Submission auto-confirms by the submitter. Execution flips `executed`
//! before the external interaction, per check-effects-interactions;
//! `TxAction::Invoke` uses the SDK's fallible cross-contract call so a
//! failed callee surfaces as `TransactionFailed` and rolls `executed` back
//! to `false` instead of aborting the whole host transaction. Asset
//! transfers and self-upgrades use the infallible paths: a failed token
//! transfer or an invalid Wasm hash is a host-level abort either way, so
//! there is nothing to roll back by hand.

use soroban_sdk::{Address, Env, Val, Vec};

use crate::errors::ChamberError;
use crate::storage;
use crate::types::{Transaction, TxAction};

pub fn submit(
    env: &Env,
    submitter_token_id: u64,
    target: Address,
    value: i128,
    action: TxAction,
) -> Result<u64, ChamberError> {
    let id = storage::next_tx_id(env);
    let tx = Transaction {
        id,
        executed: false,
        confirmations: 0,
        target,
        value,
        action,
    };
    storage::set_tx(env, &tx);
    confirm(env, submitter_token_id, id)?;
    Ok(id)
}

pub fn confirm(env: &Env, token_id: u64, tx_id: u64) -> Result<(), ChamberError> {
    let mut tx = storage::get_tx(env, tx_id).ok_or(ChamberError::TransactionDoesNotExist)?;
    if tx.executed {
        return Err(ChamberError::TransactionAlreadyExecuted);
    }
    if storage::is_confirmed(env, tx_id, token_id) {
        return Err(ChamberError::TransactionAlreadyConfirmed);
    }
    storage::set_confirmed(env, tx_id, token_id, true);
    tx.confirmations += 1;
    storage::set_tx(env, &tx);
    Ok(())
}

pub fn revoke(env: &Env, token_id: u64, tx_id: u64) -> Result<(), ChamberError> {
    let mut tx = storage::get_tx(env, tx_id).ok_or(ChamberError::TransactionDoesNotExist)?;
    if tx.executed {
        return Err(ChamberError::TransactionAlreadyExecuted);
    }
    if !storage::is_confirmed(env, tx_id, token_id) {
        return Err(ChamberError::TransactionNotConfirmed);
    }
    storage::set_confirmed(env, tx_id, token_id, false);
    tx.confirmations = tx.confirmations.saturating_sub(1);
    storage::set_tx(env, &tx);
    Ok(())
}

pub fn get(env: &Env, tx_id: u64) -> Option<Transaction> {
    storage::get_tx(env, tx_id)
}

pub fn count(env: &Env) -> u64 {
    storage::tx_count(env)
}

/// Runs a transaction that has already cleared the quorum check. Caller
/// (`lib.rs`) is responsible for confirming `confirmations >= quorum()`
/// before calling this.
pub fn execute(env: &Env, asset: &Address, tx_id: u64) -> Result<(), ChamberError> {
    let mut tx = storage::get_tx(env, tx_id).ok_or(ChamberError::TransactionDoesNotExist)?;
    if tx.executed {
        return Err(ChamberError::TransactionAlreadyExecuted);
    }
    if let TxAction::Upgrade(_) = &tx.action {
        if tx.target != env.current_contract_address() {
            return Err(ChamberError::InvalidTarget);
        }
    }

    tx.executed = true;
    storage::set_tx(env, &tx);

    match run_action(env, asset, &tx) {
        Ok(()) => Ok(()),
        Err(e) => {
            tx.executed = false;
            storage::set_tx(env, &tx);
            Err(e)
        }
    }
}

fn run_action(env: &Env, asset: &Address, tx: &Transaction) -> Result<(), ChamberError> {
    if tx.value > 0 {
        crate::token::transfer(env, asset, &tx.target, tx.value);
    }
    match &tx.action {
        TxAction::Transfer => Ok(()),
        TxAction::Invoke(function, args) => {
            let result: Result<Result<Val, soroban_sdk::Error>, Result<soroban_sdk::Error, soroban_sdk::InvokeError>> =
                env.try_invoke_contract(&tx.target, function, args.clone());
            match result {
                Ok(Ok(_)) => Ok(()),
                _ => Err(ChamberError::TransactionFailed),
            }
        }
        TxAction::Upgrade(wasm_hash) => {
            env.deployer().update_current_contract_wasm(wasm_hash.clone());
            Ok(())
        }
    }
}

// ---- Batch variants ---------------------------------------------------------
//
// No manual snapshot/rollback: any `?` inside these loops propagates out of
// the whole contract invocation, and Soroban's host reverts every storage
// write made so far in that invocation. All-or-nothing falls out of the
// platform's own atomicity rather than bookkeeping we'd have to get right
// by hand.

pub fn submit_batch(
    env: &Env,
    submitter_token_id: u64,
    targets: Vec<Address>,
    values: Vec<i128>,
    actions: Vec<TxAction>,
) -> Result<Vec<u64>, ChamberError> {
    if targets.len() != values.len() || targets.len() != actions.len() {
        return Err(ChamberError::ArrayLengthsMustMatch);
    }
    if targets.is_empty() {
        return Err(ChamberError::ZeroAmount);
    }
    let mut ids = Vec::new(env);
    for i in 0..targets.len() {
        let id = submit(
            env,
            submitter_token_id,
            targets.get(i).expect("index within bounds"),
            values.get(i).expect("index within bounds"),
            actions.get(i).expect("index within bounds"),
        )?;
        ids.push_back(id);
    }
    Ok(ids)
}

pub fn confirm_batch(env: &Env, token_id: u64, tx_ids: Vec<u64>) -> Result<(), ChamberError> {
    if tx_ids.is_empty() {
        return Err(ChamberError::ZeroAmount);
    }
    for id in tx_ids.iter() {
        confirm(env, token_id, id)?;
    }
    Ok(())
}

pub fn execute_batch(env: &Env, asset: &Address, tx_ids: Vec<u64>, quorum: u32) -> Result<(), ChamberError> {
    if tx_ids.is_empty() {
        return Err(ChamberError::ZeroAmount);
    }
    for id in tx_ids.iter() {
        let tx = storage::get_tx(env, id).ok_or(ChamberError::TransactionDoesNotExist)?;
        if tx.confirmations < quorum {
            return Err(ChamberError::NotEnoughConfirmations);
        }
        execute(env, asset, id)?;
    }
    Ok(())
}
