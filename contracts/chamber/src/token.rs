//! Chamber — Token Interface
//!
//! Client wrapper for the Stellar Asset Contract (or any SEP-41-compatible
//! token) backing the vault's single asset.

use soroban_sdk::{token, Address, Env};

/// Transfer the chamber's asset from the vault to a recipient.
pub fn transfer(env: &Env, token_addr: &Address, to: &Address, amount: i128) {
    let client = token::Client::new(env, token_addr);
    let vault_address = env.current_contract_address();
    client.transfer(&vault_address, to, &amount);
}

/// Transfer the asset from a depositor into the vault. Requires `from` to
/// have already authorized the call (via `require_auth` in the caller).
pub fn transfer_into_vault(env: &Env, token_addr: &Address, from: &Address, amount: i128) {
    let client = token::Client::new(env, token_addr);
    let vault_address = env.current_contract_address();
    client.transfer(from, &vault_address, &amount);
}

/// The vault's current balance of its configured asset.
pub fn balance(env: &Env, token_addr: &Address) -> i128 {
    let client = token::Client::new(env, token_addr);
    let vault_address = env.current_contract_address();
    client.balance(&vault_address)
}
