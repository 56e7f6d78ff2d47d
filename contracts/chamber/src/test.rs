#![cfg(test)]

use super::*;
use crate::errors::ChamberError;
use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    Address, Env, String, Vec,
};

/// A minimal NFT contract standing in for whatever board-governance NFT a
/// real deployment would point at. `owner_of` panics for an unset token,
/// matching the ERC-721-style convention the chamber's `nft.rs` expects.
#[contract]
struct MockNft;

#[contractimpl]
impl MockNft {
    pub fn set_owner(env: Env, token_id: u64, owner: Address) {
        env.storage().persistent().set(&token_id, &owner);
    }

    pub fn owner_of(env: Env, token_id: u64) -> Address {
        env.storage()
            .persistent()
            .get(&token_id)
            .expect("token has no owner set")
    }
}

fn setup(seats: u32) -> (Env, Address, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(Chamber, ());
    let client = ChamberClient::new(&env, &contract_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let asset = sac.address();

    let nft_id = env.register(MockNft, ());

    let admin = Address::generate(&env);
    let config = InitConfig {
        asset: asset.clone(),
        nft: nft_id.clone(),
        seats,
        name: String::from_str(&env, "Chamber"),
        symbol: String::from_str(&env, "CHM"),
    };
    client.initialize(&admin, &config);

    (env, contract_id, asset, nft_id)
}

/// Mints `assets` of the vault's asset to `user`, deposits it all, assigns
/// `user` as the owner of `token_id` on the mock NFT, and delegates
/// `delegate_amount` shares from `user` to `token_id`. Returns shares minted.
fn become_director(
    env: &Env,
    client: &ChamberClient<'_>,
    asset: &Address,
    nft_id: &Address,
    user: &Address,
    token_id: u64,
    assets: i128,
    delegate_amount: i128,
) -> i128 {
    StellarAssetClient::new(env, asset).mint(user, &assets);
    let shares = client.deposit(user, &assets, user);
    let nft_client = MockNftClient::new(env, nft_id);
    nft_client.set_owner(&token_id, user);
    client.delegate(user, &token_id, &delegate_amount);
    shares
}

#[test]
fn test_initialize_sets_seats_and_quorum() {
    let (env, contract_id, _asset, _nft) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    assert_eq!(client.get_seats(), 3);
    // quorum = 1 + floor(3 * 51 / 100) = 1 + 1 = 2
    assert_eq!(client.quorum(), 2);
}

#[test]
fn test_first_deposit_mints_shares_one_to_one() {
    let (env, contract_id, asset, _nft) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &asset).mint(&user, &1_000);
    let shares = client.deposit(&user, &1_000, &user);

    assert_eq!(shares, 1_000);
    assert_eq!(client.total_assets(), 1_000);
    assert_eq!(client.share_balance(&user), 1_000);
}

#[test]
fn test_second_deposit_is_proportional() {
    let (env, contract_id, asset, _nft) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    StellarAssetClient::new(&env, &asset).mint(&alice, &1_000);
    StellarAssetClient::new(&env, &asset).mint(&bob, &500);

    client.deposit(&alice, &1_000, &alice);
    let bob_shares = client.deposit(&bob, &500, &bob);

    // totalAssets=1000, totalShares=1000 before bob's deposit -> 1:1 still.
    assert_eq!(bob_shares, 500);
}

#[test]
fn test_delegation_blocks_transfer_below_delegated_amount() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 600);

    // Alice holds 1000 shares, 600 delegated -> at most 400 transferable.
    let result = client.try_transfer(&alice, &bob, &500);
    assert_eq!(result, Err(Ok(ChamberError::ExceedsDelegatedAmount)));

    // Exactly at the boundary succeeds.
    client.transfer(&alice, &bob, &400);
    assert_eq!(client.share_balance(&bob), 400);
}

#[test]
fn test_board_orders_by_delegated_amount_and_repositions() {
    let (env, contract_id, asset, nft_id) = setup(5);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let carol = Address::generate(&env);

    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 100);
    become_director(&env, &client, &asset, &nft_id, &bob, 2, 1_000, 300);
    become_director(&env, &client, &asset, &nft_id, &carol, 3, 1_000, 200);

    let (ids, amounts) = client.top(&3);
    assert_eq!(ids, Vec::from_array(&env, [2, 3, 1]));
    assert_eq!(amounts, Vec::from_array(&env, [300, 200, 100]));

    // Alice tops up past bob -> she should move to the front.
    client.delegate(&alice, &1, &250);
    let (ids, _) = client.top(&3);
    assert_eq!(ids, Vec::from_array(&env, [1, 2, 3]));
}

#[test]
fn test_quorum_execution_with_three_directors() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let carol = Address::generate(&env);
    let recipient = Address::generate(&env);

    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);
    become_director(&env, &client, &asset, &nft_id, &bob, 2, 1_000, 400);
    become_director(&env, &client, &asset, &nft_id, &carol, 3, 1_000, 300);

    // quorum = 1 + floor(3*51/100) = 2
    let tx_id = client.submit_transaction(&alice, &1, &recipient, &200, &TxAction::Transfer);

    // Only the submitter's auto-confirmation so far.
    let result = client.try_execute_transaction(&alice, &1, &tx_id);
    assert_eq!(result, Err(Ok(ChamberError::NotEnoughConfirmations)));

    client.confirm_transaction(&bob, &2, &tx_id);
    client.execute_transaction(&carol, &3, &tx_id);

    let tx = client.get_transaction(&tx_id).unwrap();
    assert!(tx.executed);
    assert_eq!(tx.confirmations, 2);
}

#[test]
fn test_executed_transaction_cannot_be_reconfirmed_or_reexecuted() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let recipient = Address::generate(&env);

    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);
    become_director(&env, &client, &asset, &nft_id, &bob, 2, 1_000, 400);

    let tx_id = client.submit_transaction(&alice, &1, &recipient, &100, &TxAction::Transfer);
    client.confirm_transaction(&bob, &2, &tx_id);
    client.execute_transaction(&alice, &1, &tx_id);

    let confirm_result = client.try_confirm_transaction(&bob, &2, &tx_id);
    assert_eq!(confirm_result, Err(Ok(ChamberError::TransactionAlreadyExecuted)));

    let execute_result = client.try_execute_transaction(&alice, &1, &tx_id);
    assert_eq!(execute_result, Err(Ok(ChamberError::TransactionAlreadyExecuted)));
}

#[test]
fn test_non_director_cannot_submit_transaction() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let outsider = Address::generate(&env);
    let recipient = Address::generate(&env);

    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);

    let result = client.try_submit_transaction(&outsider, &1, &recipient, &10, &TxAction::Transfer);
    assert_eq!(result, Err(Ok(ChamberError::NotDirector)));
}

#[test]
fn test_seat_update_requires_timelock_and_quorum() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let carol = Address::generate(&env);

    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);
    become_director(&env, &client, &asset, &nft_id, &bob, 2, 1_000, 400);
    become_director(&env, &client, &asset, &nft_id, &carol, 3, 1_000, 300);

    client.update_seats(&alice, &1, &5);
    client.update_seats(&bob, &2, &5);

    // Quorum (2) met, but the 7-day timelock hasn't elapsed.
    let early = client.try_execute_seats_update(&alice, &1);
    assert_eq!(early, Err(Ok(ChamberError::TimelockNotExpired)));

    env.ledger().with_mut(|l| l.timestamp += 7 * 24 * 60 * 60 + 1);

    client.execute_seats_update(&alice, &1);
    assert_eq!(client.get_seats(), 5);
}

#[test]
fn test_conflicting_seat_proposal_cancels_without_opening_a_new_one() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let carol = Address::generate(&env);

    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);
    become_director(&env, &client, &asset, &nft_id, &bob, 2, 1_000, 400);
    become_director(&env, &client, &asset, &nft_id, &carol, 3, 1_000, 300);

    client.update_seats(&alice, &1, &5);
    // Bob proposes a different value -> alice's proposal is cancelled, but
    // bob's call does not itself open a new one (scenario 5: a fresh call is
    // required to start the replacement proposal).
    client.update_seats(&bob, &2, &7);

    // Executing now fails: there is no pending proposal at all.
    let result = client.try_execute_seats_update(&alice, &1);
    assert_eq!(result, Err(Ok(ChamberError::InvalidProposal)));

    // A fresh call opens a new proposal whose sole initial supporter is the
    // caller; a second director with the same `n` then joins it.
    client.update_seats(&carol, &3, &7);
    client.update_seats(&bob, &2, &7);

    env.ledger().with_mut(|l| l.timestamp += 7 * 24 * 60 * 60 + 1);

    client.execute_seats_update(&bob, &2);
    assert_eq!(client.get_seats(), 7);
}

#[test]
fn test_getting_director_roster_pads_with_none() {
    let (env, contract_id, asset, nft_id) = setup(5);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);

    let directors = client.get_directors();
    assert_eq!(directors.len(), 5);
    assert_eq!(directors.get(0).unwrap(), Some(alice));
    for i in 1..5 {
        assert_eq!(directors.get(i).unwrap(), None);
    }
}

#[test]
fn test_undelegate_drops_node_at_zero() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 500);

    client.undelegate(&alice, &1, &500);

    let (ids, _) = client.top(&3);
    assert_eq!(ids.len(), 0);
}

#[test]
fn test_withdraw_rejects_below_delegated_amount() {
    let (env, contract_id, asset, nft_id) = setup(3);
    let client = ChamberClient::new(&env, &contract_id);

    let alice = Address::generate(&env);
    become_director(&env, &client, &asset, &nft_id, &alice, 1, 1_000, 700);

    let result = client.try_withdraw(&alice, &400, &alice, &alice);
    assert_eq!(result, Err(Ok(ChamberError::ExceedsDelegatedAmount)));

    client.withdraw(&alice, &300, &alice, &alice);
    assert_eq!(client.share_balance(&alice), 700);
}
