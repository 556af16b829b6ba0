//! Unit tests for the access token codec

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{access_token_lifetime, Claims, ACCESS_TOKEN_ISSUER};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{make_access_token, validate_access_token, AccessTokenCodec};

const SECRET: &str = "test-signing-secret";

fn codec() -> AccessTokenCodec {
    AccessTokenCodec::new(SECRET.as_bytes())
}

fn token_error(result: Result<Uuid, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

fn signed(iss: &str, iat_offset: i64, exp_offset: i64, sub: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: iss.to_string(),
        iat: now + iat_offset,
        exp: now + exp_offset,
        sub: sub.to_string(),
    };
    codec().encode_claims(&claims).unwrap()
}

#[test]
fn test_create_then_verify_returns_subject() {
    let user_id = Uuid::new_v4();
    let token = codec().create(user_id, access_token_lifetime()).unwrap();

    assert_eq!(token.split('.').count(), 3);
    assert_eq!(codec().verify(&token).unwrap(), user_id);
}

#[test]
fn test_free_functions_agree_with_codec() {
    let user_id = Uuid::new_v4();
    let token = make_access_token(user_id, SECRET, Duration::minutes(5)).unwrap();

    assert_eq!(validate_access_token(&token, SECRET).unwrap(), user_id);
    assert_eq!(codec().verify(&token).unwrap(), user_id);
}

#[test]
fn test_expired_token_is_rejected() {
    let token = codec().create(Uuid::new_v4(), Duration::seconds(-5)).unwrap();
    assert_eq!(token_error(codec().verify(&token)), TokenError::InvalidOrExpiredToken);
}

#[test]
fn test_wrong_secret_is_rejected() {
    let user_id = Uuid::new_v4();
    let token = make_access_token(user_id, SECRET, access_token_lifetime()).unwrap();

    for other in ["", "test-signing-secreT", "another-secret-entirely"] {
        assert_eq!(
            token_error(validate_access_token(&token, other)),
            TokenError::InvalidOrExpiredToken
        );
    }
}

#[test]
fn test_foreign_issuer_is_rejected() {
    let token = signed("chirpy-refresh", 0, 600, &Uuid::new_v4().to_string());
    assert_eq!(token_error(codec().verify(&token)), TokenError::InvalidIssuer);
}

#[test]
fn test_missing_issuer_is_rejected() {
    let token = signed("", 0, 600, &Uuid::new_v4().to_string());
    assert_eq!(token_error(codec().verify(&token)), TokenError::InvalidIssuer);
}

#[test]
fn test_malformed_subject_is_rejected() {
    let token = signed(ACCESS_TOKEN_ISSUER, 0, 600, "not-a-uuid");
    assert_eq!(token_error(codec().verify(&token)), TokenError::MalformedSubject);
}

#[test]
fn test_issuer_is_checked_before_subject() {
    let token = signed("someone-else", 0, 600, "not-a-uuid");
    assert_eq!(token_error(codec().verify(&token)), TokenError::InvalidIssuer);
}

#[test]
fn test_expiry_is_checked_before_issuer() {
    let token = signed("someone-else", -600, -60, &Uuid::new_v4().to_string());
    assert_eq!(token_error(codec().verify(&token)), TokenError::InvalidOrExpiredToken);
}

#[test]
fn test_future_issue_time_is_rejected() {
    let token = signed(ACCESS_TOKEN_ISSUER, 3600, 7200, &Uuid::new_v4().to_string());
    assert_eq!(token_error(codec().verify(&token)), TokenError::InvalidOrExpiredToken);
}

#[test]
fn test_garbage_and_tampered_tokens_are_rejected() {
    assert_eq!(token_error(codec().verify("")), TokenError::InvalidOrExpiredToken);
    assert_eq!(token_error(codec().verify("abc.def.ghi")), TokenError::InvalidOrExpiredToken);

    // Swap in the payload of a token for a different user, keeping the old signature.
    let token = codec().create(Uuid::new_v4(), access_token_lifetime()).unwrap();
    let other = codec().create(Uuid::new_v4(), access_token_lifetime()).unwrap();
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[1] = other.split('.').nth(1).unwrap();

    assert_eq!(
        token_error(codec().verify(&parts.join("."))),
        TokenError::InvalidOrExpiredToken
    );
}
