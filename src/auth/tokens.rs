use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use crate::auth::Session;
use crate::entities::Rider;
use crate::error::{authentication_error, internal_error, Error};

/// Sessions stay valid for seven days before the rider re-verifies.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub mobile: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies rider session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let secret = env::var("JWT_SECRET")?;
        Ok(Self::new(secret.as_bytes(), SESSION_TTL_SECS))
    }

    pub fn issue(&self, rider: &Rider) -> Result<String, Error> {
        let iat = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: rider.id,
            mobile: rider.mobile.clone(),
            iat,
            exp: iat + self.ttl_secs,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(internal_error)
    }

    pub fn verify(&self, token: &str) -> Result<Session, Error> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &Validation::default())
                .map_err(|_| authentication_error("invalid or expired token"))?;

        Ok(Session {
            rider_id: data.claims.sub,
            mobile: data.claims.mobile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    fn test_keys() -> SessionKeys {
        SessionKeys::new(b"test-secret", SESSION_TTL_SECS)
    }

    fn test_rider() -> Rider {
        Rider::new("9876543210".into())
    }

    #[test]
    fn issued_tokens_verify_to_the_same_rider() {
        let keys = test_keys();
        let rider = test_rider();

        let token = keys.issue(&rider).unwrap();
        let session = keys.verify(&token).unwrap();

        assert_eq!(session.rider_id, rider.id);
        assert_eq!(session.mobile, rider.mobile);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = SessionKeys::new(b"other-secret", SESSION_TTL_SECS)
            .issue(&test_rider())
            .unwrap();

        let error = test_keys().verify(&token).unwrap_err();
        assert_eq!(error.kind, Kind::AuthenticationFailure);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // a negative ttl issues a token that is already past its deadline
        let keys = SessionKeys::new(b"test-secret", -7200);
        let token = keys.issue(&test_rider()).unwrap();

        let error = keys.verify(&token).unwrap_err();
        assert_eq!(error.kind, Kind::AuthenticationFailure);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(test_keys().verify("not-a-token").is_err());
    }

    #[test]
    fn sessions_last_seven_days() {
        assert_eq!(SESSION_TTL_SECS, 604_800);
    }
}
