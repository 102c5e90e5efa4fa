//! Email confirmation

use warden::{
    AccountId, MemoryRepositoryProvider, NewAccount, Registration, Warden, WardenBuilder,
};

async fn setup() -> (Warden<MemoryRepositoryProvider>, Registration) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let warden = WardenBuilder::new()
        .with_memory_storage()
        .with_salt_work_factor(1)
        .with_email_verification_required(true)
        .build()
        .await
        .expect("Failed to build Warden");

    let registration = warden
        .register(
            NewAccount::builder()
                .email("alice@example.com")
                .password("password123")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    (warden, registration)
}

#[tokio::test]
async fn test_confirm_verifies_email_once() {
    let (warden, registration) = setup().await;
    let account_id = registration.account.id.clone();
    let token = registration.verification_token.unwrap();
    assert!(!registration.account.email_verified);

    let confirmation = warden.confirm(&account_id, &token, None).await.unwrap();
    assert!(confirmation.account.email_verified);
    assert!(confirmation.account.verification_token.is_none());
    assert!(confirmation.redirect.is_none());

    let stored = warden.get_account(&account_id).await.unwrap().unwrap();
    assert!(stored.email_verified);
    assert!(stored.verification_token.is_none());

    // The token was cleared, so it cannot be used again
    let error = warden.confirm(&account_id, &token, None).await.unwrap_err();
    assert_eq!(error.code(), "INVALID_TOKEN");
    assert_eq!(error.status().as_u16(), 400);
}

#[tokio::test]
async fn test_confirm_echoes_redirect() {
    let (warden, registration) = setup().await;
    let token = registration.verification_token.unwrap();

    let confirmation = warden
        .confirm(&registration.account.id, &token, Some("/welcome"))
        .await
        .unwrap();
    assert_eq!(confirmation.redirect.as_deref(), Some("/welcome"));
}

#[tokio::test]
async fn test_confirm_wrong_token() {
    let (warden, registration) = setup().await;

    let error = warden
        .confirm(&registration.account.id, "not-the-token", None)
        .await
        .unwrap_err();
    assert_eq!(error.code(), "INVALID_TOKEN");

    let stored = warden
        .get_account(&registration.account.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.email_verified);
}

#[tokio::test]
async fn test_confirm_unknown_account() {
    let (warden, registration) = setup().await;
    let token = registration.verification_token.unwrap();

    let error = warden
        .confirm(&AccountId::new("acc_missing"), &token, None)
        .await
        .unwrap_err();
    assert_eq!(error.code(), "USER_NOT_FOUND");
    assert_eq!(error.status().as_u16(), 404);
}

#[tokio::test]
async fn test_request_verification_replaces_token() {
    let (warden, registration) = setup().await;
    let account_id = registration.account.id.clone();
    let first = registration.verification_token.unwrap();

    let second = warden.request_verification(&account_id).await.unwrap();
    assert_ne!(first, second);

    let error = warden.confirm(&account_id, &first, None).await.unwrap_err();
    assert_eq!(error.code(), "INVALID_TOKEN");

    warden.confirm(&account_id, &second, None).await.unwrap();

    let error = warden
        .request_verification(&AccountId::new("acc_missing"))
        .await
        .unwrap_err();
    assert_eq!(error.code(), "USER_NOT_FOUND");
}
