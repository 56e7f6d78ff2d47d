//! Directorship gate — NFT ownership combined with top-of-board ranking.
//!
//! A token id is a "director" only if the caller owns it *and* it currently
//! sits within the top `seats` nodes of the board. Never mutates storage;
//! every gated entry point in `lib.rs` calls `require()` before doing
//! anything else.

use soroban_sdk::{Address, Env, Vec};

use crate::board;
use crate::errors::ChamberError;
use crate::storage;

pub fn require(env: &Env, token_id: u64, claimant: &Address) -> Result<(), ChamberError> {
    if token_id == 0 {
        return Err(ChamberError::NotDirector);
    }
    let config = storage::get_config(env)?;
    match crate::nft::owner_of(env, &config.nft, token_id) {
        Some(owner) if &owner == claimant => {}
        _ => return Err(ChamberError::NotDirector),
    }

    let seats = board::get_seats(env);
    let (ids, _) = board::top(env, seats);
    if !ids.contains(&token_id) {
        return Err(ChamberError::NotDirector);
    }
    Ok(())
}

/// The current director roster, padded with `None` up to `seats` long.
pub fn list(env: &Env) -> Result<Vec<Option<Address>>, ChamberError> {
    let config = storage::get_config(env)?;
    let seats = board::get_seats(env);
    let (ids, _) = board::top(env, seats);

    let mut out = Vec::new(env);
    for id in ids.iter() {
        out.push_back(crate::nft::owner_of(env, &config.nft, id));
    }
    while out.len() < seats {
        out.push_back(None);
    }
    Ok(out)
}
