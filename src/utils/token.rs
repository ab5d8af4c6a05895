// utils/token.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorMessage, HttpError};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn create_token(
    user_id: &str,
    secret: &[u8],
    expires_in_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if user_id.is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(expires_in_seconds)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token<T: Into<String>>(token: T, secret: &[u8]) -> Result<String, HttpError> {
    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    );

    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(_) => Err(HttpError::unauthorized(
            ErrorMessage::InvalidToken.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_user_id() {
        let secret = b"test-secret";
        let token = create_token("b5c7f9a0-0000-0000-0000-000000000001", secret, 60).unwrap();
        let sub = decode_token(token, secret).unwrap();
        assert_eq!(sub, "b5c7f9a0-0000-0000-0000-000000000001");
    }

    #[test]
    fn rejects_empty_subject() {
        assert!(create_token("", b"test-secret", 60).is_err());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = create_token("user", b"secret-a", 60).unwrap();
        assert!(decode_token(token, b"secret-b").is_err());
    }
}
