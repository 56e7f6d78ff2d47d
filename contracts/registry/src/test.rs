#![cfg(test)]

use super::*;
use soroban_sdk::testutils::Address as _;

fn setup() -> (Env, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(Registry, ());
    (env, contract_id)
}

#[test]
fn test_initialize_records_wasm_hash() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let hash = BytesN::from_array(&env, &[7u8; 32]);
    client.initialize(&admin, &hash);

    assert_eq!(client.wasm_hash(), Some(hash));
}

#[test]
fn test_double_initialize_fails() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let hash = BytesN::from_array(&env, &[1u8; 32]);
    client.initialize(&admin, &hash);

    let result = client.try_initialize(&admin, &hash);
    assert_eq!(result, Err(Ok(RegistryError::AlreadyInitialized)));
}

#[test]
fn test_set_wasm_hash_before_initialize_fails() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let hash = BytesN::from_array(&env, &[2u8; 32]);
    let result = client.try_set_wasm_hash(&admin, &hash);
    assert_eq!(result, Err(Ok(RegistryError::NotInitialized)));
}

#[test]
fn test_set_wasm_hash_updates_pointer() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &BytesN::from_array(&env, &[1u8; 32]));

    let new_hash = BytesN::from_array(&env, &[9u8; 32]);
    client.set_wasm_hash(&admin, &new_hash);
    assert_eq!(client.wasm_hash(), Some(new_hash));
}

#[test]
fn test_create_chamber_rejects_seats_out_of_range() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &BytesN::from_array(&env, &[1u8; 32]));

    let asset = Address::generate(&env);
    let nft = Address::generate(&env);
    let name = String::from_str(&env, "Chamber");
    let symbol = String::from_str(&env, "CHM");

    let zero_seats = client.try_create_chamber(&admin, &asset, &nft, &0, &name, &symbol);
    assert_eq!(zero_seats, Err(Ok(RegistryError::InvalidSeats)));

    let too_many_seats = client.try_create_chamber(&admin, &asset, &nft, &21, &name, &symbol);
    assert_eq!(too_many_seats, Err(Ok(RegistryError::InvalidSeats)));
}

#[test]
fn test_create_chamber_before_initialize_fails() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let nft = Address::generate(&env);
    let name = String::from_str(&env, "Chamber");
    let symbol = String::from_str(&env, "CHM");

    let result = client.try_create_chamber(&admin, &asset, &nft, &5, &name, &symbol);
    assert_eq!(result, Err(Ok(RegistryError::NotInitialized)));
}

// ---- Discovery index (white-box: exercised directly against storage) -----
//
// `create_chamber` itself requires an installable Wasm blob to drive
// `env.deployer()`, which this in-process test environment has no way to
// produce without a prior `cargo build` of the chamber crate; the
// discovery index it populates is tested directly against `storage` here
// instead, since `record_chamber` is exactly what a successful deploy
// calls on success. `env.storage()` only works inside a contract's own
// execution context, so every call below runs through `env.as_contract`.

#[test]
fn test_discovery_index_tracks_chambers_by_asset() {
    let (env, contract_id) = setup();
    let asset_a = Address::generate(&env);
    let asset_b = Address::generate(&env);
    let chamber_1 = Address::generate(&env);
    let chamber_2 = Address::generate(&env);
    let chamber_3 = Address::generate(&env);

    env.as_contract(&contract_id, || {
        storage::record_chamber(&env, &chamber_1, &asset_a);
        storage::record_chamber(&env, &chamber_2, &asset_a);
        storage::record_chamber(&env, &chamber_3, &asset_b);
    });

    let stranger = Address::generate(&env);
    env.as_contract(&contract_id, || {
        assert!(storage::is_chamber(&env, &chamber_1));
        assert!(!storage::is_chamber(&env, &stranger));

        assert_eq!(storage::chamber_list(&env).len(), 3);
        assert_eq!(storage::chambers_by_asset(&env, &asset_a).len(), 2);
        assert_eq!(storage::chambers_by_asset(&env, &asset_b).len(), 1);
        assert_eq!(storage::assets(&env).len(), 2);
    });
}

#[test]
fn test_list_chambers_paginates_and_bounds_the_page() {
    let (env, contract_id) = setup();
    let client = RegistryClient::new(&env, &contract_id);
    let asset = Address::generate(&env);

    env.as_contract(&contract_id, || {
        for _ in 0..5u32 {
            storage::record_chamber(&env, &Address::generate(&env), &asset);
        }
    });

    let page = client.list_chambers(&0, &3);
    assert_eq!(page.len(), 3);

    let rest = client.list_chambers(&3, &10);
    assert_eq!(rest.len(), 2);

    let past_end = client.list_chambers(&5, &10);
    assert_eq!(past_end.len(), 0);

    assert_eq!(client.chamber_count(), 5);
}
