//! Login through the Warden facade against the in-memory backend

use std::sync::Arc;

use warden::{
    Credentials, ErrorStatus, IncludeOptions, MemoryRepositoryProvider, NewAccount, Warden,
    WardenBuilder,
};
use warden_core::repositories::{AccountDirectory, AccountDirectoryProvider};

// Keep hashing cheap in tests
const WORK_FACTOR: u32 = 1;

async fn setup() -> Warden<MemoryRepositoryProvider> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    WardenBuilder::new()
        .with_memory_storage()
        .with_salt_work_factor(WORK_FACTOR)
        .build()
        .await
        .expect("Failed to build Warden")
}

async fn register(warden: &Warden<MemoryRepositoryProvider>, username: &str, realm: Option<&str>) {
    let mut builder = NewAccount::builder()
        .username(username)
        .email(format!("{username}@example.com"))
        .password("password123");
    if let Some(realm) = realm {
        builder = builder.realm(realm);
    }
    warden
        .register(builder.build().unwrap())
        .await
        .expect("Failed to register account");
}

#[tokio::test]
async fn test_login_with_username_and_email() {
    let warden = setup().await;
    register(&warden, "alice", None).await;

    let by_username = warden
        .login(
            &Credentials::with_username("alice", "password123"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap();
    assert_eq!(by_username.token.ttl, warden.config().ttl);
    assert!(by_username.user.is_none());

    let by_email = warden
        .login(
            &Credentials::with_email("alice@example.com", "password123"),
            &IncludeOptions::user(),
        )
        .await
        .unwrap();
    let user = by_email.user.as_ref().expect("user should be attached");
    assert_eq!(user.username.as_deref(), Some("alice"));
    assert_eq!(by_email.token.user_id, user.id);
    assert_ne!(by_username.id(), by_email.id());

    // Both tokens are live
    warden.resolve_token(by_username.id()).await.unwrap();
    warden.resolve_token(by_email.id()).await.unwrap();
}

#[tokio::test]
async fn test_issued_token_serialization() {
    let warden = setup().await;
    register(&warden, "alice", None).await;

    let issued = warden
        .login(
            &Credentials::with_username("alice", "password123"),
            &IncludeOptions::from("user"),
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&issued).unwrap();
    assert_eq!(json["id"], issued.id().as_str());
    assert_eq!(json["ttl"], 1_209_600);
    assert!(json.get("created").is_some());
    assert_eq!(json["user"]["username"], "alice");
    assert!(json["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_requires_principal() {
    let warden = setup().await;
    register(&warden, "alice", None).await;

    let credentials = Credentials {
        password: "password123".to_string(),
        ..Default::default()
    };
    let error = warden
        .login(&credentials, &IncludeOptions::none())
        .await
        .unwrap_err();
    assert_eq!(error.code(), "USERNAME_EMAIL_REQUIRED");
    assert_eq!(error.status(), ErrorStatus::BadRequest);

    // Empty strings count as absent
    let credentials = Credentials::with_username("", "password123");
    let error = warden
        .login(&credentials, &IncludeOptions::none())
        .await
        .unwrap_err();
    assert_eq!(error.code(), "USERNAME_EMAIL_REQUIRED");
}

#[tokio::test]
async fn test_realm_required_before_password_check() {
    let warden = WardenBuilder::new()
        .with_memory_storage()
        .with_salt_work_factor(WORK_FACTOR)
        .with_realm_required(true)
        .build()
        .await
        .unwrap();
    register(&warden, "alice", Some("tenantA")).await;

    for password in ["password123", "wrong_password"] {
        let error = warden
            .login(
                &Credentials::with_username("alice", password),
                &IncludeOptions::none(),
            )
            .await
            .unwrap_err();
        assert_eq!(error.code(), "REALM_REQUIRED");
        assert_eq!(error.status().as_u16(), 400);
    }

    let issued = warden
        .login(
            &Credentials::with_username("alice", "password123").realm("tenantA"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap();
    assert!(!issued.id().as_str().is_empty());
}

#[tokio::test]
async fn test_login_with_realm_delimiter() {
    let warden = WardenBuilder::new()
        .with_memory_storage()
        .with_salt_work_factor(WORK_FACTOR)
        .with_realm_delimiter(":")
        .build()
        .await
        .unwrap();
    register(&warden, "alice", Some("tenantA")).await;
    register(&warden, "alice", Some("tenantB")).await;

    let issued = warden
        .login(
            &Credentials::with_username("tenantB:alice", "password123"),
            &IncludeOptions::user(),
        )
        .await
        .unwrap();
    let user = issued.user.unwrap();
    assert_eq!(user.realm.as_deref(), Some("tenantB"));

    // The prefix wins over an explicit realm
    let issued = warden
        .login(
            &Credentials::with_username("tenantA:alice", "password123").realm("tenantB"),
            &IncludeOptions::user(),
        )
        .await
        .unwrap();
    assert_eq!(issued.user.unwrap().realm.as_deref(), Some("tenantA"));

    let error = warden
        .login(
            &Credentials::with_username("tenantC:alice", "password123"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), "LOGIN_FAILED");

    let error = warden
        .login(
            &Credentials::with_username("alice", "password123"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), "REALM_REQUIRED");
}

#[tokio::test]
async fn test_unknown_principal_and_wrong_password_look_the_same() {
    let warden = setup().await;
    register(&warden, "alice", None).await;

    let unknown = warden
        .login(
            &Credentials::with_username("mallory", "password123"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap_err();
    let wrong_password = warden
        .login(
            &Credentials::with_username("alice", "password124"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap_err();

    assert_eq!(unknown.code(), "LOGIN_FAILED");
    assert_eq!(unknown.code(), wrong_password.code());
    assert_eq!(unknown.status(), ErrorStatus::Unauthorized);
    assert_eq!(unknown.status(), wrong_password.status());
    assert_eq!(unknown.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn test_unverified_email_refused() {
    let warden = WardenBuilder::new()
        .with_memory_storage()
        .with_salt_work_factor(WORK_FACTOR)
        .with_email_verification_required(true)
        .build()
        .await
        .unwrap();

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
    let verification_token = registration
        .verification_token
        .expect("verification token should be issued");

    let credentials = Credentials::with_email("alice@example.com", "password123");
    let error = warden
        .login(&credentials, &IncludeOptions::none())
        .await
        .unwrap_err();
    assert_eq!(error.code(), "LOGIN_FAILED_EMAIL_NOT_VERIFIED");
    assert_eq!(error.status().as_u16(), 401);

    // A wrong password still reports the generic failure
    let error = warden
        .login(
            &Credentials::with_email("alice@example.com", "password124"),
            &IncludeOptions::none(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), "LOGIN_FAILED");

    warden
        .confirm(&registration.account.id, &verification_token, None)
        .await
        .unwrap();
    warden
        .login(&credentials, &IncludeOptions::none())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_requested_ttl_is_clamped() {
    let warden = setup().await;
    register(&warden, "alice", None).await;

    let issued = warden
        .login(
            &Credentials::with_username("alice", "password123").ttl(60),
            &IncludeOptions::none(),
        )
        .await
        .unwrap();
    assert_eq!(issued.token.ttl, 60);

    let issued = warden
        .login(
            &Credentials::with_username("alice", "password123").ttl(40_000_000),
            &IncludeOptions::none(),
        )
        .await
        .unwrap();
    assert_eq!(issued.token.ttl, 31_556_926);
}

#[tokio::test]
async fn test_create_access_token() {
    let warden = setup().await;
    register(&warden, "alice", None).await;
    let account = warden
        .login(
            &Credentials::with_username("alice", "password123"),
            &IncludeOptions::user(),
        )
        .await
        .unwrap()
        .user
        .unwrap();

    let token = warden
        .create_access_token(&account, Some(10_000_000))
        .await
        .unwrap();
    assert_eq!(token.ttl, 10_000_000);
    assert_eq!(token.user_id, account.id);

    let token = warden
        .create_access_token(&account, Some(40_000_000))
        .await
        .unwrap();
    assert_eq!(token.ttl, 31_556_926);

    let token = warden.create_access_token(&account, None).await.unwrap();
    assert_eq!(token.ttl, 1_209_600);
}

#[tokio::test]
async fn test_realm_less_login_ignores_realm_accounts() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let provider = Arc::new(MemoryRepositoryProvider::new());
    let warden = WardenBuilder::new()
        .with_storage(provider.clone())
        .with_salt_work_factor(WORK_FACTOR)
        .build()
        .await
        .unwrap();

    // Registering with a realm is refused while realms are disabled
    let error = warden
        .register(
            NewAccount::builder()
                .username("alice")
                .realm("x")
                .password("password-two")
                .build()
                .unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code(), "VALIDATION_ERROR");

    // A realm account placed in the directory by the host stays out of reach
    provider
        .directory()
        .create(
            NewAccount::builder()
                .username("alice")
                .realm("x")
                .password("password-two")
                .build()
                .unwrap(),
            WORK_FACTOR,
        )
        .await
        .unwrap();
    warden
        .register(
            NewAccount::builder()
                .username("alice")
                .password("password-one")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    for _ in 0..30 {
        let issued = warden
            .login(
                &Credentials::with_username("alice", "password-one"),
                &IncludeOptions::user(),
            )
            .await
            .unwrap();
        assert!(issued.user.unwrap().realm.is_none());

        let error = warden
            .login(
                &Credentials::with_username("alice", "password-two"),
                &IncludeOptions::none(),
            )
            .await
            .unwrap_err();
        assert_eq!(error.code(), "LOGIN_FAILED");
    }
}
