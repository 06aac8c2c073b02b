// Session flow tests against an in-memory wallet

mod common;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use common::{contract_address, user, FakeWallet, RecordingAlert, GOERLI};
use whitelist::config::Config;
use whitelist::session::{UiState, WhitelistSession};
use whitelist::wallet::RequiredNetwork;
use whitelist::WhitelistError;

fn session(wallet: &Arc<FakeWallet>, alert: &Arc<RecordingAlert>) -> WhitelistSession {
    WhitelistSession::new(
        wallet.clone(),
        RequiredNetwork::new(GOERLI, "Goerli"),
        contract_address(),
        alert.clone(),
    )
    .with_poll_interval(Duration::from_millis(1))
}

#[tokio::test]
async fn test_connect_on_wrong_network_changes_nothing() {
    let wallet = FakeWallet::new(1, vec![user()]);
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.connect_wallet().await;

    assert_eq!(session.state(), &UiState::default());
    let messages = alert.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Goerli"));
    assert!(wallet.untouched());
}

#[tokio::test]
async fn test_connect_reads_membership_count_and_capacity() {
    let wallet = FakeWallet::goerli();
    {
        let mut chain = wallet.chain();
        chain.members.insert(user());
        chain.members.insert(Address::repeat_byte(0x01));
        chain.max = 20;
    }
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.connect_wallet().await;

    assert_eq!(
        session.state(),
        &UiState {
            wallet_connected: true,
            joined_whitelist: true,
            loading: false,
            num_whitelisted: 2,
            max_whitelisted: Some(20),
        }
    );
    assert!(alert.messages().is_empty());
}

#[tokio::test]
async fn test_membership_read_goes_through_signer() {
    let wallet = FakeWallet::goerli();
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.check_if_address_in_whitelist().await;

    let chain = wallet.chain();
    assert_eq!(chain.calls.len(), 1);
    assert_eq!(chain.calls[0].from, Some(user()));
    assert_eq!(chain.calls[0].to, Some(contract_address()));
}

#[tokio::test]
async fn test_join_marks_joined_after_receipt() {
    let wallet = FakeWallet::goerli();
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.connect_wallet().await;
    assert!(!session.state().joined_whitelist);
    assert_eq!(session.state().num_whitelisted, 0);

    session.add_address_to_whitelist().await;

    let state = session.state();
    assert!(state.joined_whitelist);
    assert!(!state.loading);
    assert_eq!(state.num_whitelisted, 1);

    let chain = wallet.chain();
    assert_eq!(chain.sent.len(), 1);
    assert_eq!(chain.sent[0].from, Some(user()));
    assert_eq!(chain.sent[0].to, Some(contract_address()));
    assert!(chain.members.contains(&user()));
}

#[tokio::test]
async fn test_join_polls_until_mined() {
    let wallet = FakeWallet::goerli();
    wallet.chain().pending_polls = 2;
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.add_address_to_whitelist().await;

    assert!(session.state().joined_whitelist);
    assert_eq!(wallet.chain().receipt_polls, 3);
}

#[tokio::test]
async fn test_reverted_join_leaves_joined_unset() {
    let wallet = FakeWallet::goerli();
    wallet.chain().revert_next = true;
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.connect_wallet().await;
    session.add_address_to_whitelist().await;

    let state = session.state();
    assert!(!state.joined_whitelist);
    assert!(!state.loading);
    assert_eq!(state.num_whitelisted, 0);
    assert_eq!(wallet.chain().sent.len(), 1);
}

#[tokio::test]
async fn test_join_when_full_is_reverted() {
    let wallet = FakeWallet::goerli();
    {
        let mut chain = wallet.chain();
        chain.max = 1;
        chain.members.insert(Address::repeat_byte(0x01));
    }
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.add_address_to_whitelist().await;

    assert!(!session.state().joined_whitelist);
    assert!(!wallet.chain().members.contains(&user()));
}

#[tokio::test]
async fn test_join_on_wrong_network_sends_nothing() {
    let wallet = FakeWallet::new(1, vec![user()]);
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.add_address_to_whitelist().await;

    assert_eq!(session.state(), &UiState::default());
    assert!(wallet.untouched());
    assert_eq!(alert.messages().len(), 1);
}

#[tokio::test]
async fn test_failed_read_keeps_last_count() {
    let wallet = FakeWallet::goerli();
    wallet.chain().members.insert(Address::repeat_byte(0x01));
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.get_num_of_whitelisted().await;
    assert_eq!(session.state().num_whitelisted, 1);

    {
        let mut chain = wallet.chain();
        chain.members.insert(Address::repeat_byte(0x02));
        chain.fail_reads = true;
    }
    session.get_num_of_whitelisted().await;

    assert_eq!(session.state().num_whitelisted, 1);
}

#[tokio::test]
async fn test_missing_capacity_getter_leaves_max_unset() {
    let wallet = FakeWallet::goerli();
    let alert = RecordingAlert::new();
    // Nothing deployed at this address: every read returns empty data
    let mut session = WhitelistSession::new(
        wallet.clone(),
        RequiredNetwork::new(GOERLI, "Goerli"),
        Address::repeat_byte(0x77),
        alert.clone(),
    );

    session.connect_wallet().await;

    let state = session.state();
    assert!(state.wallet_connected);
    assert_eq!(state.max_whitelisted, None);
    assert_eq!(state.num_whitelisted, 0);
}

#[tokio::test]
async fn test_fetch_membership_for_other_address() {
    let wallet = FakeWallet::goerli();
    let friend = Address::repeat_byte(0x42);
    wallet.chain().members.insert(friend);
    let alert = RecordingAlert::new();
    let session = session(&wallet, &alert);

    assert!(session.fetch_membership(Some(friend)).await.unwrap());
    assert!(!session.fetch_membership(None).await.unwrap());
}

#[tokio::test]
async fn test_no_accounts_blocks_signer_reads_only() {
    let wallet = FakeWallet::new(GOERLI, vec![]);
    wallet.chain().members.insert(Address::repeat_byte(0x01));
    let alert = RecordingAlert::new();
    let session = session(&wallet, &alert);

    assert!(matches!(
        session.fetch_membership(None).await,
        Err(WhitelistError::NoAccounts)
    ));
    assert_eq!(session.fetch_member_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_flows_reconnect_every_time() {
    let wallet = FakeWallet::goerli();
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.get_num_of_whitelisted().await;
    session.get_num_of_whitelisted().await;

    assert_eq!(wallet.chain().account_requests, 2);
}

#[tokio::test]
async fn test_connect_reuses_its_connection_for_capacity() {
    let wallet = FakeWallet::goerli();
    let alert = RecordingAlert::new();
    let mut session = session(&wallet, &alert);

    session.connect_wallet().await;

    // connect, membership, count; capacity rides on the first
    assert_eq!(wallet.chain().account_requests, 3);
    assert_eq!(session.state().max_whitelisted, Some(10));

    session.get_max_whitelisted().await;
    assert_eq!(wallet.chain().account_requests, 4);
}

#[test]
fn test_from_config_requires_contract_address() {
    let wallet = FakeWallet::goerli();
    let alert = RecordingAlert::new();

    let config = Config::default();
    assert!(WhitelistSession::from_config(&config, wallet.clone(), alert.clone()).is_err());

    let config = Config {
        contract_address: Some(contract_address()),
        ..Default::default()
    };
    let session = WhitelistSession::from_config(&config, wallet, alert).unwrap();
    assert_eq!(session.contract_address(), contract_address());
}
