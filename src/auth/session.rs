use async_trait::async_trait;
use axum::extract::{Extension, FromRequest, RequestParts};
use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::SessionKeys;
use crate::error::{authentication_error, internal_error, Error};

/// The verified identity behind a request, decoded from its bearer token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub rider_id: Uuid,
    pub mobile: String,
}

#[async_trait]
impl<B> FromRequest<B> for Session
where
    B: Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let Extension(keys) = Extension::<SessionKeys>::from_request(req)
            .await
            .map_err(internal_error)?;

        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| authentication_error("access denied, no token provided"))?;

        keys.verify(token)
    }
}
