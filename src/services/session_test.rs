use super::*;

// =============================================================================
// hex_encode
// =============================================================================

#[test]
fn hex_encode_empty() {
    assert_eq!(hex_encode(&[]), "");
}

#[test]
fn hex_encode_leading_zero() {
    assert_eq!(hex_encode(&[0x0a]), "0a");
}

#[test]
fn hex_encode_multi_byte() {
    assert_eq!(hex_encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// new_session_token
// =============================================================================

#[test]
fn new_session_token_is_64_hex_chars() {
    let token = new_session_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn new_session_token_two_calls_differ() {
    assert_ne!(new_session_token(), new_session_token());
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_serializes_metadata() {
    let user = User { id: Uuid::nil(), email: "ada@example.com".into(), full_name: Some("Ada Lovelace".into()) };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["full_name"], "Ada Lovelace");
    assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
}

#[test]
fn user_without_name_serializes_null() {
    let user = User { id: Uuid::nil(), email: "x@example.com".into(), full_name: None };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json["full_name"].is_null());
}

// =============================================================================
// Session rows (live Postgres)
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn session_create_validate_delete_round_trip() {
    use crate::db::test_support::{integration_pool, seed_user};

    let pool = integration_pool().await;
    let user_id = seed_user(&pool).await;

    let token = create_session(&pool, user_id).await.expect("create_session should succeed");
    assert_eq!(token.len(), 64);

    let user = validate_session(&pool, &token).await.expect("validate should succeed").expect("session is live");
    assert_eq!(user.id, user_id);
    assert_eq!(user.full_name.as_deref(), Some("Test Reader"));

    delete_session(&pool, &token).await.expect("delete should succeed");
    assert!(validate_session(&pool, &token).await.expect("validate should succeed").is_none());
    delete_session(&pool, &token).await.expect("deleting twice is not an error");
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn expired_session_does_not_validate() {
    use crate::db::test_support::{integration_pool, seed_user};

    let pool = integration_pool().await;
    let user_id = seed_user(&pool).await;
    let token = create_session(&pool, user_id).await.expect("create_session should succeed");

    sqlx::query("UPDATE sessions SET expires_at = now() - INTERVAL '1 minute' WHERE token = $1")
        .bind(&token)
        .execute(&pool)
        .await
        .expect("expire should succeed");
    assert!(validate_session(&pool, &token).await.expect("validate should succeed").is_none());
}
