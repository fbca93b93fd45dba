//! Integration tests for the authentication service.

use rentbook_auth::config::AuthConfig;
use rentbook_auth::service::{AuthService, LoginInput, RegisterInput};
use rentbook_core::error::RentbookError;
use rentbook_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret-do-not-use-in-production".into(),
        jwt_issuer: "rentbook-test".into(),
        ..AuthConfig::default()
    }
}

/// Spin up in-memory DB, run migrations, build the service.
async fn setup() -> AuthService<SurrealUserRepository<surrealdb::engine::local::Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    rentbook_db::run_migrations(&db).await.unwrap();

    AuthService::new(SurrealUserRepository::new(db), test_config())
}

#[tokio::test]
async fn register_returns_public_projection() {
    let svc = setup().await;

    let user = svc
        .register(RegisterInput {
            email: "a@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn register_rejects_short_password() {
    let svc = setup().await;

    let result = svc
        .register(RegisterInput {
            email: "a@x.com".into(),
            password: "five5".into(),
        })
        .await;

    match result {
        Err(RentbookError::Validation { message }) => {
            assert!(message.contains("at least 6 characters"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let svc = setup().await;

    svc.register(RegisterInput {
        email: "a@x.com".into(),
        password: "secret1".into(),
    })
    .await
    .unwrap();

    let result = svc
        .register(RegisterInput {
            email: "a@x.com".into(),
            password: "another-secret".into(),
        })
        .await;

    assert!(matches!(result, Err(RentbookError::AlreadyExists { .. })));
}

#[tokio::test]
async fn login_issues_verifiable_token() {
    let svc = setup().await;

    let registered = svc
        .register(RegisterInput {
            email: "a@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    let output = svc
        .login(LoginInput {
            email: "a@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.email, "a@x.com");
    assert_eq!(output.expires_in, 28_800);

    let user_id = svc.verify_token(&output.token).unwrap();
    assert_eq!(user_id, registered.id);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_yield_identical_errors() {
    let svc = setup().await;

    svc.register(RegisterInput {
        email: "a@x.com".into(),
        password: "secret1".into(),
    })
    .await
    .unwrap();

    let wrong_password = svc
        .login(LoginInput {
            email: "a@x.com".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();

    let unknown_email = svc
        .login(LoginInput {
            email: "ghost@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap_err();

    // Same variant, same message — no registration probing.
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert!(matches!(
        wrong_password,
        RentbookError::AuthenticationFailed { .. }
    ));
    assert!(matches!(
        unknown_email,
        RentbookError::AuthenticationFailed { .. }
    ));
}

#[tokio::test]
async fn tampered_token_fails_verification() {
    let svc = setup().await;

    svc.register(RegisterInput {
        email: "a@x.com".into(),
        password: "secret1".into(),
    })
    .await
    .unwrap();

    let output = svc
        .login(LoginInput {
            email: "a@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    let mut parts: Vec<String> = output.token.split('.').map(str::to_string).collect();
    let payload = &mut parts[1];
    let flipped = if payload.starts_with('A') { "B" } else { "A" };
    payload.replace_range(0..1, flipped);
    let tampered = parts.join(".");

    assert!(svc.verify_token(&tampered).is_err());
    // The untampered token still verifies.
    assert!(svc.verify_token(&output.token).is_ok());
}
