//! Chamber — Share Vault, Delegation Board, and Confirmation Queue
//!
//! An ERC-4626-style asset vault whose shares double as delegated voting
//! weight on a sorted board, which in turn gates a multi-confirmation
//! transaction queue capable of upgrading the chamber's own Wasm.

#![no_std]

mod board;
mod directors;
mod errors;
mod events;
mod guard;
mod nft;
mod storage;
mod token;
mod types;
mod wallet;

#[cfg(test)]
mod test;

pub use types::{InitConfig, TxAction};

use errors::ChamberError;
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};
use types::{Config, Transaction};

#[contract]
pub struct Chamber;

#[contractimpl]
impl Chamber {
    // ------------------------------------------------------------------
    // Initialization
    // ------------------------------------------------------------------

    /// One-time setup. `admin` need not be stored afterward — the chamber
    /// governs itself from the first director onward.
    pub fn initialize(env: Env, admin: Address, config: InitConfig) -> Result<(), ChamberError> {
        if storage::is_initialized(&env) {
            return Err(ChamberError::AlreadyInitialized);
        }
        admin.require_auth();

        board::initialize_seats(&env, config.seats)?;

        storage::set_config(
            &env,
            &Config {
                asset: config.asset.clone(),
                nft: config.nft.clone(),
                name: config.name.clone(),
                symbol: config.symbol.clone(),
            },
        );
        storage::set_initialized(&env);
        storage::extend_instance_ttl(&env);

        events::emit_chamber_created(&env, &env.current_contract_address(), config.seats, &config.asset, &config.nft);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Share vault
    // ------------------------------------------------------------------

    /// Deposit `assets` of the configured asset, minting shares to `receiver`.
    /// Shares round down (the user-receiving direction).
    pub fn deposit(env: Env, caller: Address, assets: i128, receiver: Address) -> Result<i128, ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        if assets <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        let config = storage::get_config(&env)?;
        let shares = Self::convert_to_shares_internal(&env, &config.asset, assets, false);

        token::transfer_into_vault(&env, &config.asset, &caller, assets);
        storage::set_share_balance(&env, &receiver, storage::get_share_balance(&env, &receiver) + shares);
        storage::set_total_shares(&env, storage::get_total_shares(&env) + shares);

        events::emit_deposit(&env, &caller, &receiver, assets, shares);
        storage::extend_instance_ttl(&env);
        Ok(shares)
    }

    /// Mint exactly `shares` to `receiver`, pulling however many assets that
    /// costs. Assets round up (the user-paying direction).
    pub fn mint(env: Env, caller: Address, shares: i128, receiver: Address) -> Result<i128, ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        if shares <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        let config = storage::get_config(&env)?;
        let assets = Self::convert_to_assets_internal(&env, &config.asset, shares, true);

        token::transfer_into_vault(&env, &config.asset, &caller, assets);
        storage::set_share_balance(&env, &receiver, storage::get_share_balance(&env, &receiver) + shares);
        storage::set_total_shares(&env, storage::get_total_shares(&env) + shares);

        events::emit_deposit(&env, &caller, &receiver, assets, shares);
        storage::extend_instance_ttl(&env);
        Ok(assets)
    }

    /// Withdraw exactly `assets`, burning however many shares (of `owner`'s
    /// balance) that costs, rounded up in the vault's favor.
    pub fn withdraw(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        if assets <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        let config = storage::get_config(&env)?;
        let shares = Self::convert_to_shares_internal(&env, &config.asset, assets, true);

        if caller != owner {
            Self::spend_allowance(&env, &owner, &caller, shares)?;
        }

        let balance = storage::get_share_balance(&env, &owner);
        let delegated = storage::get_total_delegations(&env, &owner);
        if balance - shares < delegated {
            return Err(ChamberError::ExceedsDelegatedAmount);
        }

        storage::set_share_balance(&env, &owner, balance - shares);
        storage::set_total_shares(&env, storage::get_total_shares(&env) - shares);
        token::transfer(&env, &config.asset, &receiver, assets);

        events::emit_withdraw(&env, &caller, &receiver, &owner, assets, shares);
        storage::extend_instance_ttl(&env);
        Ok(shares)
    }

    /// Redeem exactly `shares` (of `owner`'s balance) for assets, rounded
    /// down in the vault's favor.
    pub fn redeem(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        if shares <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        let config = storage::get_config(&env)?;

        if caller != owner {
            Self::spend_allowance(&env, &owner, &caller, shares)?;
        }

        let balance = storage::get_share_balance(&env, &owner);
        let delegated = storage::get_total_delegations(&env, &owner);
        if balance - shares < delegated {
            return Err(ChamberError::ExceedsDelegatedAmount);
        }
        let assets = Self::convert_to_assets_internal(&env, &config.asset, shares, false);

        storage::set_share_balance(&env, &owner, balance - shares);
        storage::set_total_shares(&env, storage::get_total_shares(&env) - shares);
        token::transfer(&env, &config.asset, &receiver, assets);

        events::emit_withdraw(&env, &caller, &receiver, &owner, assets, shares);
        storage::extend_instance_ttl(&env);
        Ok(assets)
    }

    pub fn convert_to_shares(env: Env, assets: i128) -> Result<i128, ChamberError> {
        let config = storage::get_config(&env)?;
        Ok(Self::convert_to_shares_internal(&env, &config.asset, assets, false))
    }

    pub fn convert_to_assets(env: Env, shares: i128) -> Result<i128, ChamberError> {
        let config = storage::get_config(&env)?;
        Ok(Self::convert_to_assets_internal(&env, &config.asset, shares, false))
    }

    /// Live balance of the configured asset held by the vault — not a
    /// stored counter, so a direct transfer of the asset into the chamber
    /// changes this (and the conversion rate) immediately, per spec.md §3.
    pub fn total_assets(env: Env) -> Result<i128, ChamberError> {
        let config = storage::get_config(&env)?;
        Ok(token::balance(&env, &config.asset))
    }

    pub fn total_shares(env: Env) -> i128 {
        storage::get_total_shares(&env)
    }

    pub fn share_balance(env: Env, account: Address) -> i128 {
        storage::get_share_balance(&env, &account)
    }

    // ------------------------------------------------------------------
    // Share transfer / allowance
    // ------------------------------------------------------------------

    /// Moves `amount` shares from `from` to `to`. Checked *before* any state
    /// mutation: a transfer that would leave `from` below its delegated
    /// total is rejected outright, never partially applied (newer I1
    /// semantics — see design notes).
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ChamberError> {
        from.require_auth();
        Self::do_transfer(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ChamberError> {
        spender.require_auth();
        Self::spend_allowance(&env, &from, &spender, amount)?;
        Self::do_transfer(&env, &from, &to, amount)
    }

    pub fn approve(env: Env, owner: Address, spender: Address, amount: i128) -> Result<(), ChamberError> {
        owner.require_auth();
        if amount < 0 {
            return Err(ChamberError::ZeroAmount);
        }
        storage::set_allowance(&env, &owner, &spender, amount);
        Ok(())
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &owner, &spender)
    }

    // ------------------------------------------------------------------
    // Delegation
    // ------------------------------------------------------------------

    pub fn delegate(env: Env, caller: Address, token_id: u64, amount: i128) -> Result<(), ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        if token_id == 0 {
            return Err(ChamberError::ZeroTokenId);
        }
        if amount <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        if storage::get_share_balance(&env, &caller) < amount {
            return Err(ChamberError::InsufficientChamberBalance);
        }
        let config = storage::get_config(&env)?;
        if nft::owner_of(&env, &config.nft, token_id).is_none() {
            return Err(ChamberError::InvalidTokenId);
        }

        storage::set_delegation(
            &env,
            &caller,
            token_id,
            storage::get_delegation(&env, &caller, token_id) + amount,
        );
        storage::set_total_delegations(
            &env,
            &caller,
            storage::get_total_delegations(&env, &caller) + amount,
        );
        board::delegate(&env, token_id, amount)?;

        events::emit_delegation_updated(&env, &caller, token_id, storage::get_total_delegations(&env, &caller));
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn undelegate(env: Env, caller: Address, token_id: u64, amount: i128) -> Result<(), ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        if token_id == 0 {
            return Err(ChamberError::ZeroTokenId);
        }
        if amount <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        let current = storage::get_delegation(&env, &caller, token_id);
        if current < amount {
            return Err(ChamberError::InsufficientDelegatedAmount);
        }

        storage::set_delegation(&env, &caller, token_id, current - amount);
        storage::set_total_delegations(
            &env,
            &caller,
            storage::get_total_delegations(&env, &caller) - amount,
        );
        board::undelegate(&env, token_id, amount)?;

        events::emit_delegation_updated(&env, &caller, token_id, storage::get_total_delegations(&env, &caller));
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn delegation_of(env: Env, account: Address, token_id: u64) -> i128 {
        storage::get_delegation(&env, &account, token_id)
    }

    pub fn total_delegations_of(env: Env, account: Address) -> i128 {
        storage::get_total_delegations(&env, &account)
    }

    /// Up to `n` `(token_id, amount)` pairs, head-first.
    pub fn top(env: Env, n: u32) -> (Vec<u64>, Vec<i128>) {
        board::top(&env, n)
    }

    // ------------------------------------------------------------------
    // Directorship / seats
    // ------------------------------------------------------------------

    pub fn get_directors(env: Env) -> Result<Vec<Option<Address>>, ChamberError> {
        directors::list(&env)
    }

    pub fn get_seats(env: Env) -> u32 {
        board::get_seats(&env)
    }

    pub fn quorum(env: Env) -> u32 {
        board::quorum(&env)
    }

    pub fn update_seats(env: Env, caller: Address, token_id: u64, n: u32) -> Result<(), ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        if n > board::MAX_SEATS {
            return Err(ChamberError::TooManySeats);
        }
        match board::set_seats(&env, token_id, n)? {
            board::SeatUpdateOutcome::Proposed => events::emit_set_seats(&env, token_id, n),
            board::SeatUpdateOutcome::Cancelled => events::emit_seat_update_cancelled(&env, token_id),
        }
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn execute_seats_update(env: Env, caller: Address, token_id: u64) -> Result<(), ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        let seats = board::execute_seats_update(&env)?;
        events::emit_execute_set_seats(&env, token_id, seats);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transaction queue
    // ------------------------------------------------------------------

    pub fn submit_transaction(
        env: Env,
        caller: Address,
        token_id: u64,
        target: Address,
        value: i128,
        action: TxAction,
    ) -> Result<u64, ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        Self::validate_submission(&env, &target, value, &action)?;

        let id = wallet::submit(&env, token_id, target.clone(), value, action)?;
        events::emit_transaction_submitted(&env, id, &target, value);
        storage::extend_instance_ttl(&env);
        Ok(id)
    }

    pub fn submit_transaction_batch(
        env: Env,
        caller: Address,
        token_id: u64,
        targets: Vec<Address>,
        values: Vec<i128>,
        actions: Vec<TxAction>,
    ) -> Result<Vec<u64>, ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        if targets.len() != values.len() || targets.len() != actions.len() {
            return Err(ChamberError::ArrayLengthsMustMatch);
        }
        for i in 0..targets.len() {
            Self::validate_submission(
                &env,
                &targets.get(i).expect("index within bounds"),
                values.get(i).expect("index within bounds"),
                &actions.get(i).expect("index within bounds"),
            )?;
        }
        let ids = wallet::submit_batch(&env, token_id, targets, values, actions)?;
        storage::extend_instance_ttl(&env);
        Ok(ids)
    }

    pub fn confirm_transaction(env: Env, caller: Address, token_id: u64, tx_id: u64) -> Result<(), ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        wallet::confirm(&env, token_id, tx_id)?;
        events::emit_transaction_confirmed(&env, tx_id, &caller);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn confirm_transaction_batch(
        env: Env,
        caller: Address,
        token_id: u64,
        tx_ids: Vec<u64>,
    ) -> Result<(), ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        wallet::confirm_batch(&env, token_id, tx_ids)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn revoke_confirmation(env: Env, caller: Address, token_id: u64, tx_id: u64) -> Result<(), ChamberError> {
        caller.require_auth();
        directors::require(&env, token_id, &caller)?;
        wallet::revoke(&env, token_id, tx_id)?;
        events::emit_revoke_confirmation(&env, token_id, tx_id);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn execute_transaction(env: Env, caller: Address, token_id: u64, tx_id: u64) -> Result<(), ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        directors::require(&env, token_id, &caller)?;

        let tx = storage::get_tx(&env, tx_id).ok_or(ChamberError::TransactionDoesNotExist)?;
        if tx.confirmations < board::quorum(&env) {
            return Err(ChamberError::NotEnoughConfirmations);
        }
        let config = storage::get_config(&env)?;
        wallet::execute(&env, &config.asset, tx_id)?;

        events::emit_transaction_executed(&env, tx_id, &caller);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn execute_transaction_batch(
        env: Env,
        caller: Address,
        token_id: u64,
        tx_ids: Vec<u64>,
    ) -> Result<(), ChamberError> {
        caller.require_auth();
        let _guard = guard::ReentrancyGuard::enter(&env)?;
        directors::require(&env, token_id, &caller)?;

        let config = storage::get_config(&env)?;
        let quorum = board::quorum(&env);
        wallet::execute_batch(&env, &config.asset, tx_ids, quorum)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn get_transaction(env: Env, tx_id: u64) -> Option<Transaction> {
        wallet::get(&env, tx_id)
    }

    pub fn next_transaction_id(env: Env) -> u64 {
        wallet::count(&env)
    }

    pub fn is_confirmed(env: Env, tx_id: u64, token_id: u64) -> bool {
        storage::is_confirmed(&env, tx_id, token_id)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// `total_assets` is always a live read of the vault's own token
    /// balance (see `storage.rs`'s note on `totalAssets`), never a stored
    /// counter, so it picks up external transfers into the vault too.
    fn convert_to_shares_internal(env: &Env, asset: &Address, assets: i128, round_up: bool) -> i128 {
        let supply = storage::get_total_shares(env);
        let total_assets = token::balance(env, asset);
        if supply == 0 || total_assets == 0 {
            return assets;
        }
        let numerator = assets * supply;
        if round_up {
            (numerator + total_assets - 1) / total_assets
        } else {
            numerator / total_assets
        }
    }

    fn convert_to_assets_internal(env: &Env, asset: &Address, shares: i128, round_up: bool) -> i128 {
        let supply = storage::get_total_shares(env);
        if supply == 0 {
            return shares;
        }
        let total_assets = token::balance(env, asset);
        let numerator = shares * total_assets;
        if round_up {
            (numerator + supply - 1) / supply
        } else {
            numerator / supply
        }
    }

    fn spend_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) -> Result<(), ChamberError> {
        let current = storage::get_allowance(env, owner, spender);
        if current < amount {
            return Err(ChamberError::InsufficientAllowance);
        }
        storage::set_allowance(env, owner, spender, current - amount);
        Ok(())
    }

    fn do_transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), ChamberError> {
        if amount <= 0 {
            return Err(ChamberError::ZeroAmount);
        }
        let balance = storage::get_share_balance(env, from);
        let delegated = storage::get_total_delegations(env, from);
        if balance - amount < delegated {
            return Err(ChamberError::ExceedsDelegatedAmount);
        }
        storage::set_share_balance(env, from, balance - amount);
        storage::set_share_balance(env, to, storage::get_share_balance(env, to) + amount);
        events::emit_transfer(env, from, to, amount);
        Ok(())
    }

    fn validate_submission(env: &Env, target: &Address, value: i128, action: &TxAction) -> Result<(), ChamberError> {
        match action {
            TxAction::Upgrade(_) => {
                if target != &env.current_contract_address() {
                    return Err(ChamberError::InvalidTransaction);
                }
            }
            _ => {
                if target == &env.current_contract_address() {
                    return Err(ChamberError::InvalidTransaction);
                }
            }
        }
        if value > 0 {
            let config = storage::get_config(env)?;
            if token::balance(env, &config.asset) < value {
                return Err(ChamberError::InsufficientChamberBalance);
            }
        }
        Ok(())
    }
}
