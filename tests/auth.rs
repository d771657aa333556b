use storefront_api::error::AppError;
use storefront_api::services::auth_service::{hash_password, verify_password};
use storefront_api::token::{issue_token, verify_token};

// Known MD5 vectors: the digest is hex(md5(password + key)), so splitting
// "abc" across password and key must give the md5("abc") vector.
#[test]
fn digest_matches_known_md5_vectors() {
    assert_eq!(hash_password("", ""), "d41d8cd98f41b204e9800998ecf8427e");
    assert_eq!(hash_password("a", "bc"), "900150983cd24fb0d6963f7d28e17f72");
    assert_eq!(hash_password("abc", ""), hash_password("a", "bc"));
}

#[test]
fn verify_accepts_matching_and_rejects_wrong_password() {
    let stored = hash_password("hunter2", "server-key");
    assert!(verify_password("hunter2", "server-key", &stored));
    assert!(!verify_password("hunter3", "server-key", &stored));
    assert!(!verify_password("hunter2", "other-key", &stored));
}

#[test]
fn token_round_trip_extracts_subject() {
    let token = issue_token("test-secret", "alice").expect("issue token");
    let claims = verify_token("test-secret", &token).expect("verify token");
    assert_eq!(claims.sub, "alice");
}

#[test]
fn token_with_wrong_secret_is_unauthorized() {
    let token = issue_token("test-secret", "alice").expect("issue token");
    let err = verify_token("other-secret", &token).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn garbage_token_is_unauthorized() {
    let err = verify_token("test-secret", "not-a-token").unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
