//! Integration tests for registration, email confirmation, and password reset.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use photobank_core::error::ErrorKind;
use photobank_core::result::AppResult;
use photobank_core::traits::{MailDispatcher, MailMessage};
use photobank_database::repositories::UserRepository;
use photobank_entity::token::{SINGLE_USE_TOKEN_LENGTH, TokenPurpose};
use photobank_mailer::MemoryMailbox;
use photobank_service::NewAccount;

use helpers::TestApp;

/// A dispatcher whose deliveries never complete.
#[derive(Debug)]
struct StalledDispatcher;

#[async_trait]
impl MailDispatcher for StalledDispatcher {
    async fn send(&self, _message: &MailMessage) -> AppResult<()> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_register_alice() {
    let app = TestApp::new();

    let alice = app
        .accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(alice.username, "alice");
    assert!(!alice.email_confirmed);

    // the returned identity never carries the hash
    let json = serde_json::to_value(&alice).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());

    let stored = app.users.find_by_id(alice.id).await.unwrap().unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert_ne!(stored.password_hash, "secret1");

    let outstanding = app
        .tokens
        .outstanding(TokenPurpose::EmailConfirmation, alice.id)
        .await;
    assert_eq!(outstanding.len(), 1);
    assert_eq!(outstanding[0].value.len(), SINGLE_USE_TOKEN_LENGTH);

    app.outbox.flush().await;
    let mail = app.mailbox.messages_to("a@x.com").await;
    assert_eq!(mail.len(), 1);
    assert_eq!(mail[0].subject, "Confirm email");
    assert_eq!(
        mail[0].body,
        format!("Your confirmation token: {}", outstanding[0].value)
    );
}

#[tokio::test]
async fn test_register_survives_mail_failure() {
    let app = TestApp::with_mailbox(MemoryMailbox::failing());

    let alice = app
        .accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    app.outbox.flush().await;

    assert_eq!(app.mailbox.len().await, 1);
    assert_eq!(
        app.tokens
            .outstanding(TokenPurpose::EmailConfirmation, alice.id)
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_confirm_email() {
    let app = TestApp::new();

    let err = app.accounts.confirm_email("badtoken").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenNotFound);

    let err = app.accounts.confirm_email("").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingInput);

    let alice = app
        .accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    let token = app.last_mailed_token("a@x.com").await;

    let confirmed = app.accounts.confirm_email(&token).await.unwrap();
    assert_eq!(confirmed.id, alice.id);
    assert!(confirmed.email_confirmed);
    assert!(app.tokens.is_empty().await);

    let err = app.accounts.confirm_email(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenNotFound);
}

#[tokio::test]
async fn test_confirmation_token_is_not_a_reset_token() {
    let app = TestApp::new();
    app.accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    let token = app.last_mailed_token("a@x.com").await;

    let err = app.accounts.validate_reset_token(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenNotFound);
    let err = app
        .accounts
        .confirm_password_reset(&token, "newpass1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_password_reset_round_trip() {
    let app = TestApp::new();
    let alice = app
        .accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();

    // by username; mail goes to the stored address
    app.accounts.request_password_reset("alice").await.unwrap();
    app.outbox.flush().await;
    let mail = app.mailbox.messages_to("a@x.com").await;
    assert_eq!(mail.last().unwrap().subject, "Reset password");
    let token = app.last_mailed_token("a@x.com").await;
    assert!(mail
        .last()
        .unwrap()
        .body
        .starts_with("Your reset password token: "));

    let owner = app.accounts.validate_reset_token(&token).await.unwrap();
    assert_eq!(owner.id, alice.id);

    let updated = app
        .accounts
        .confirm_password_reset(&token, "newpass1")
        .await
        .unwrap();
    assert_eq!(updated.id, alice.id);

    assert!(app.auth.validate_credentials("alice", "newpass1").await.unwrap().is_some());
    assert!(app.auth.validate_credentials("alice", "secret1").await.unwrap().is_none());

    // single use
    let err = app
        .accounts
        .confirm_password_reset(&token, "another1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
    let err = app.accounts.validate_reset_token(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenNotFound);
}

#[tokio::test]
async fn test_reset_consumes_only_the_redeemed_token() {
    let app = TestApp::new();
    let alice = app
        .accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();

    app.accounts.request_password_reset("a@x.com").await.unwrap();
    let first = app.last_mailed_token("a@x.com").await;
    app.accounts.request_password_reset("a@x.com").await.unwrap();
    let second = app.last_mailed_token("a@x.com").await;
    assert_ne!(first, second);

    app.accounts
        .confirm_password_reset(&first, "newpass1")
        .await
        .unwrap();

    let remaining = app
        .tokens
        .outstanding(TokenPurpose::PasswordReset, alice.id)
        .await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].value, second);
}

#[tokio::test]
async fn test_short_reset_password_keeps_token() {
    let app = TestApp::new();
    app.accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    app.accounts.request_password_reset("alice").await.unwrap();
    let token = app.last_mailed_token("a@x.com").await;

    let err = app
        .accounts
        .confirm_password_reset(&token, "12345")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::WeakCredential);

    assert!(app.accounts.validate_reset_token(&token).await.is_ok());
}

#[tokio::test]
async fn test_stalled_mailer_does_not_block_callers() {
    let app = TestApp::with_dispatcher(Arc::new(StalledDispatcher));

    let alice = tokio::time::timeout(
        Duration::from_secs(10),
        app.accounts
            .register(NewAccount::new("alice", "a@x.com", "secret1")),
    )
    .await
    .expect("register blocked on mail delivery")
    .unwrap();

    tokio::time::timeout(
        Duration::from_secs(10),
        app.accounts.request_password_reset("alice"),
    )
    .await
    .expect("reset request blocked on mail delivery")
    .unwrap();

    assert_eq!(app.outbox.pending(), 2);
    assert_eq!(
        app.tokens
            .outstanding(TokenPurpose::PasswordReset, alice.id)
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_concurrent_confirmations_redeem_once() {
    let app = TestApp::new();
    let alice = app
        .accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    let token = app.last_mailed_token("a@x.com").await;

    let (first, second) = tokio::join!(
        app.accounts.confirm_email(&token),
        app.accounts.confirm_email(&token)
    );

    let results = [first, second];
    let confirmed: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, alice.id);
    let rejected: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].kind, ErrorKind::TokenNotFound);
}

#[tokio::test]
async fn test_concurrent_resets_redeem_once() {
    let app = TestApp::new();
    app.accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    app.accounts.request_password_reset("alice").await.unwrap();
    let token = app.last_mailed_token("a@x.com").await;

    // both lookups succeed before either hash finishes
    let (first, second) = tokio::join!(
        app.accounts.confirm_password_reset(&token, "newpass1"),
        app.accounts.confirm_password_reset(&token, "newpass2")
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let rejected: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].kind, ErrorKind::InvalidToken);

    let winner = if results[0].is_ok() { "newpass1" } else { "newpass2" };
    assert!(app
        .auth
        .validate_credentials("alice", winner)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_sibling_reset_token_survives_redemption() {
    let app = TestApp::new();
    app.accounts
        .register(NewAccount::new("alice", "a@x.com", "secret1"))
        .await
        .unwrap();
    app.accounts.request_password_reset("alice").await.unwrap();
    let older = app.last_mailed_token("a@x.com").await;
    app.accounts.request_password_reset("alice").await.unwrap();
    let newer = app.last_mailed_token("a@x.com").await;

    app.accounts
        .confirm_password_reset(&newer, "newpass1")
        .await
        .unwrap();
    app.accounts
        .confirm_password_reset(&older, "newpass2")
        .await
        .unwrap();

    assert!(app
        .auth
        .validate_credentials("alice", "newpass2")
        .await
        .unwrap()
        .is_some());
}
