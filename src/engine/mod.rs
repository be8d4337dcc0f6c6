mod auth_api;
mod fare_api;
mod location_api;

use sqlx::{Executor, Pool, Postgres};

use crate::{api::API, auth::SessionKeys, error::Error};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    keys: SessionKeys,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>, keys: SessionKeys) -> Result<Self, Error> {
        // rider identities survive restarts, keyed by normalized mobile
        pool.execute(
            "CREATE TABLE IF NOT EXISTS riders (id UUID PRIMARY KEY, mobile VARCHAR UNIQUE NOT NULL, created_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        )
        .await?;

        // OTP request log, consulted for rate limiting
        pool.execute(
            "CREATE TABLE IF NOT EXISTS otp_requests (id BIGSERIAL PRIMARY KEY, mobile VARCHAR NOT NULL, requested_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        )
        .await?;

        pool.execute(
            "CREATE INDEX IF NOT EXISTS otp_requests_mobile_idx ON otp_requests (mobile, requested_at)",
        )
        .await?;

        Ok(Self { pool, keys })
    }
}

impl API for Engine {}
