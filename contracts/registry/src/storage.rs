//! Registry — Storage Layout
//!
//! Same one-`DataKey`-enum shape as the chamber crate. The discovery index
//! is a flat `persistent()` list of every chamber address plus a per-asset
//! grouping, both append-only — chambers are never deregistered.

use soroban_sdk::{contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    WasmHash,
    ChamberList,
    ChambersByAsset(Address),
    IsChamber(Address),
    Assets,
    DeployOrdinal,
}

const INSTANCE_TTL_THRESHOLD: u32 = 17_280 * 7;
const INSTANCE_TTL: u32 = 17_280 * 30;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL);
}

/// Monotonic counter feeding the deployer salt. Never reset, never reused.
pub fn next_deploy_ordinal(env: &Env) -> u64 {
    let n: u64 = env.storage().instance().get(&DataKey::DeployOrdinal).unwrap_or(0);
    env.storage().instance().set(&DataKey::DeployOrdinal, &(n + 1));
    n
}

pub fn get_wasm_hash(env: &Env) -> Option<soroban_sdk::BytesN<32>> {
    env.storage().instance().get(&DataKey::WasmHash)
}

pub fn set_wasm_hash(env: &Env, hash: &soroban_sdk::BytesN<32>) {
    env.storage().instance().set(&DataKey::WasmHash, hash);
}

pub fn chamber_list(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::ChamberList)
        .unwrap_or(Vec::new(env))
}

pub fn is_chamber(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::IsChamber(address.clone()))
        .unwrap_or(false)
}

pub fn assets(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Assets)
        .unwrap_or(Vec::new(env))
}

pub fn chambers_by_asset(env: &Env, asset: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::ChambersByAsset(asset.clone()))
        .unwrap_or(Vec::new(env))
}

/// Records a freshly deployed chamber in every index. Never removed —
/// the registry is an append-only directory.
pub fn record_chamber(env: &Env, chamber: &Address, asset: &Address) {
    let mut list = chamber_list(env);
    list.push_back(chamber.clone());
    env.storage().persistent().set(&DataKey::ChamberList, &list);

    env.storage()
        .persistent()
        .set(&DataKey::IsChamber(chamber.clone()), &true);

    let mut by_asset = chambers_by_asset(env, asset);
    let is_new_asset = by_asset.is_empty();
    by_asset.push_back(chamber.clone());
    env.storage()
        .persistent()
        .set(&DataKey::ChambersByAsset(asset.clone()), &by_asset);

    if is_new_asset {
        let mut known_assets = assets(env);
        known_assets.push_back(asset.clone());
        env.storage().persistent().set(&DataKey::Assets, &known_assets);
    }
}
