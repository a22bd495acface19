//! Store-level auth flow: registration, credential checks, and token
//! identity round-trips against a real on-disk database.

use tempfile::TempDir;

use eventra::auth::{self, token};
use eventra::db::{self, users};
use eventra::state::DbPool;

fn create_test_db() -> (TempDir, DbPool) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let pool = db::create_pool(&db_path).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (temp_dir, pool)
}

#[test]
fn register_then_login_token_identity_matches() {
    let (_temp_dir, pool) = create_test_db();

    let hash = auth::hash_password("secret1").unwrap();
    let user = users::create_user(&pool, "A", "a@x.com", &hash).unwrap();

    // Login path: look up by email, compare hash
    let found = users::find_by_email(&pool, "a@x.com").unwrap().unwrap();
    assert!(auth::verify_password("secret1", &found.password_hash).unwrap());

    // Token issued at login decodes back to the created user
    let signed = token::issue(&found.id, &found.email, "test-secret", 24).unwrap();
    let claims = token::verify(&signed, "test-secret").unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "a@x.com");
}

#[test]
fn wrong_password_fails_regardless_of_email_validity() {
    let (_temp_dir, pool) = create_test_db();

    let hash = auth::hash_password("secret1").unwrap();
    users::create_user(&pool, "A", "a@x.com", &hash).unwrap();

    // Valid email, wrong password
    let found = users::find_by_email(&pool, "a@x.com").unwrap().unwrap();
    assert!(!auth::verify_password("wrong", &found.password_hash).unwrap());

    // Unknown email never yields a user to check against
    assert!(users::find_by_email(&pool, "nobody@x.com").unwrap().is_none());
}

#[test]
fn profile_reflects_registered_identity() {
    let (_temp_dir, pool) = create_test_db();

    let hash = auth::hash_password("secret1").unwrap();
    let user = users::create_user(&pool, "A", "a@x.com", &hash).unwrap();

    let profile = users::find_by_id(&pool, &user.id).unwrap().unwrap().profile();
    assert_eq!(profile.id, user.id);
    assert_eq!(profile.name, "A");
    assert_eq!(profile.email, "a@x.com");
}

#[test]
fn duplicate_registration_is_rejected() {
    let (_temp_dir, pool) = create_test_db();

    let hash = auth::hash_password("secret1").unwrap();
    users::create_user(&pool, "A", "a@x.com", &hash).unwrap();

    let err = users::create_user(&pool, "A2", "a@x.com", &hash).unwrap_err();
    assert!(matches!(err, eventra::error::AppError::Validation(_)));
}
