use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, ACCESS_TOKEN_ISSUER};
use crate::errors::{DomainError, DomainResult, TokenError};

/// HS256 codec for access tokens, holding keys derived from the signing secret
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenCodec {
    /// Builds a codec from raw secret bytes
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the library default allows 60 seconds of slack.
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Creates a signed access token for `user_id`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The subject of the token
    /// * `lifetime` - Offset from now at which the token expires
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact `header.claims.signature` token
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn create(&self, user_id: Uuid, lifetime: Duration) -> DomainResult<String> {
        self.encode_claims(&Claims::new_access_token(user_id, lifetime))
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies an access token and returns the user id it was issued for
    ///
    /// Checks run in order: signature and expiry, issue time, issuer, then
    /// subject.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The subject of a valid token
    /// * `Err(TokenError::InvalidOrExpiredToken)` - Bad signature, unparsable token,
    ///   expired, or issued in the future
    /// * `Err(TokenError::InvalidIssuer)` - Signed with this secret but not by this service
    /// * `Err(TokenError::MalformedSubject)` - Subject is not a UUID
    pub fn verify(&self, token: &str) -> DomainResult<Uuid> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "Access token rejected by decoder");
                TokenError::InvalidOrExpiredToken
            })?
            .claims;

        if claims.iat > Utc::now().timestamp() {
            return Err(TokenError::InvalidOrExpiredToken.into());
        }

        if claims.iss != ACCESS_TOKEN_ISSUER {
            return Err(TokenError::InvalidIssuer.into());
        }

        claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::MalformedSubject))
    }
}

/// Creates an access token with a one-off codec built from `secret`
pub fn make_access_token(user_id: Uuid, secret: &str, lifetime: Duration) -> DomainResult<String> {
    AccessTokenCodec::new(secret.as_bytes()).create(user_id, lifetime)
}

/// Verifies an access token with a one-off codec built from `secret`
pub fn validate_access_token(token: &str, secret: &str) -> DomainResult<Uuid> {
    AccessTokenCodec::new(secret.as_bytes()).verify(token)
}
