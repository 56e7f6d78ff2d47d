//! Registry — Event Publishing
//!
//! One `emit_*` helper per event, matching the chamber crate's module shape.

use soroban_sdk::{Address, Env, String, Symbol};

pub fn emit_chamber_created(
    env: &Env,
    chamber: &Address,
    seats: u32,
    name: &String,
    symbol: &String,
    asset: &Address,
    nft: &Address,
) {
    env.events().publish(
        (Symbol::new(env, "chamber_created"),),
        (
            chamber.clone(),
            seats,
            name.clone(),
            symbol.clone(),
            asset.clone(),
            nft.clone(),
        ),
    );
}

pub fn emit_wasm_hash_updated(env: &Env, hash: &soroban_sdk::BytesN<32>) {
    env.events()
        .publish((Symbol::new(env, "wasm_hash_updated"),), (hash.clone(),));
}
