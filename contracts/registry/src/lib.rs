//! Registry — Factory and Discovery Index for Chamber Instances
//!
//! A thin collaborator: deploys new `Chamber` instances behind a single
//! shared Wasm hash and indexes them by their configured asset. Never
//! retains an admin address on a deployed chamber — the chamber governs
//! its own implementation from the first director onward (spec.md's
//! "transfers admin ownership to the newly created Chamber" realized as
//! "never holds one to transfer").

#![no_std]

mod errors;
mod events;
mod storage;

#[cfg(test)]
mod test;

use chamber::InitConfig;
use errors::RegistryError;
use soroban_sdk::{contract, contractimpl, vec, Address, BytesN, Env, IntoVal, String, Symbol, Vec};

const MAX_SEATS: u32 = 20;

#[contract]
pub struct Registry;

#[contractimpl]
impl Registry {
    /// One-time setup: records the Wasm hash every subsequently deployed
    /// chamber is installed with.
    pub fn initialize(env: Env, admin: Address, wasm_hash: BytesN<32>) -> Result<(), RegistryError> {
        if storage::get_wasm_hash(&env).is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        admin.require_auth();
        storage::set_wasm_hash(&env, &wasm_hash);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Installs a new Wasm hash for chambers deployed from here on.
    /// Chambers already deployed keep whatever implementation they last
    /// upgraded to themselves — the registry has no reach into a chamber
    /// once deployed.
    pub fn set_wasm_hash(env: Env, admin: Address, wasm_hash: BytesN<32>) -> Result<(), RegistryError> {
        admin.require_auth();
        storage::get_wasm_hash(&env).ok_or(RegistryError::NotInitialized)?;
        storage::set_wasm_hash(&env, &wasm_hash);
        events::emit_wasm_hash_updated(&env, &wasm_hash);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn wasm_hash(env: Env) -> Option<BytesN<32>> {
        storage::get_wasm_hash(&env)
    }

    /// Deploys a new Chamber behind the registry's current Wasm hash and
    /// initializes it, `deployer` standing in as its bootstrap admin.
    ///
    /// Fails with `InvalidSeats` if `seats` falls outside `[1, 20]`; Soroban's
    /// `Address` has no zero/null representation, so there is no address
    /// validity check to perform here (spec.md's `ZeroAddress` check is a
    /// non-literal translation onto `InvalidSeats`/`NotInitialized` instead).
    pub fn create_chamber(
        env: Env,
        deployer: Address,
        asset: Address,
        nft: Address,
        seats: u32,
        name: String,
        symbol: String,
    ) -> Result<Address, RegistryError> {
        deployer.require_auth();
        let wasm_hash = storage::get_wasm_hash(&env).ok_or(RegistryError::NotInitialized)?;
        if seats == 0 || seats > MAX_SEATS {
            return Err(RegistryError::InvalidSeats);
        }

        let salt = Self::next_salt(&env);
        let deployed = env
            .deployer()
            .with_current_contract(salt)
            .deploy(wasm_hash);

        let config = InitConfig {
            asset: asset.clone(),
            nft: nft.clone(),
            seats,
            name: name.clone(),
            symbol: symbol.clone(),
        };
        let init_args: Vec<soroban_sdk::Val> = vec![
            &env,
            deployer.clone().into_val(&env),
            config.into_val(&env),
        ];
        env.invoke_contract::<()>(&deployed, &Symbol::new(&env, "initialize"), init_args);

        storage::record_chamber(&env, &deployed, &asset);
        events::emit_chamber_created(&env, &deployed, seats, &name, &symbol, &asset, &nft);
        storage::extend_instance_ttl(&env);
        Ok(deployed)
    }

    // ------------------------------------------------------------------
    // Discovery
    // ------------------------------------------------------------------

    pub fn is_chamber(env: Env, chamber: Address) -> bool {
        storage::is_chamber(&env, &chamber)
    }

    pub fn chamber_count(env: Env) -> u32 {
        storage::chamber_list(&env).len()
    }

    /// Bounded slice `[start, start + limit)` of the full chamber list,
    /// head-first by deployment order. `limit` is capped at 100 entries
    /// per call so a listing can never walk an unbounded amount of state.
    pub fn list_chambers(env: Env, start: u32, limit: u32) -> Vec<Address> {
        const MAX_PAGE: u32 = 100;
        let all = storage::chamber_list(&env);
        let mut out = Vec::new(&env);
        if start >= all.len() {
            return out;
        }
        let end = core::cmp::min(start.saturating_add(core::cmp::min(limit, MAX_PAGE)), all.len());
        for i in start..end {
            out.push_back(all.get(i).expect("index within bounds"));
        }
        out
    }

    pub fn chambers_by_asset(env: Env, asset: Address) -> Vec<Address> {
        storage::chambers_by_asset(&env, &asset)
    }

    pub fn assets(env: Env) -> Vec<Address> {
        storage::assets(&env)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Deterministic, collision-free per-deployment salt: hash of a
    /// monotonic deployment counter, so two `create_chamber` calls in the
    /// same ledger never collide regardless of their arguments.
    fn next_salt(env: &Env) -> BytesN<32> {
        let ordinal = storage::next_deploy_ordinal(env);
        let mut data = soroban_sdk::Bytes::new(env);
        for b in ordinal.to_be_bytes().iter() {
            data.push_back(*b);
        }
        env.crypto().sha256(&data).into()
    }
}
