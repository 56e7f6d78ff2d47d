//! Thin client over a conventional Soroban NFT contract's `owner_of`.
//!
//! Delegated token ids are never validated against a registry the chamber
//! itself owns — `owner_of` is trusted as an oracle. A token that doesn't
//! exist is expected to make the callee panic (the common ERC-721-style
//! convention); `try_owner_of` catches that and is treated the same as "no
//! owner", matching the protocol's soft-failure rule for missing directors.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "NftClient")]
pub trait NftInterface {
    fn owner_of(env: Env, token_id: u64) -> Address;
}

pub fn owner_of(env: &Env, nft: &Address, token_id: u64) -> Option<Address> {
    let client = NftClient::new(env, nft);
    match client.try_owner_of(&token_id) {
        Ok(Ok(owner)) => Some(owner),
        _ => None,
    }
}
