use super::Engine;

use async_trait::async_trait;
use sqlx::{Executor, Row};

use crate::{
    api::{AuthAPI, AuthGrant},
    auth::normalize_mobile,
    entities::Rider,
    error::{authentication_error, invalid_argument_error, rate_limited_error, Error},
    external::firebase_auth,
};

const MAX_OTP_REQUESTS_PER_HOUR: i64 = 5;

fn checked_mobile(raw: &str) -> Result<String, Error> {
    let mobile = normalize_mobile(raw);

    if mobile.len() < 10 {
        return Err(invalid_argument_error("a valid mobile number is required"));
    }

    Ok(mobile)
}

#[async_trait]
impl AuthAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn begin_verification(&self, mobile: String) -> Result<(), Error> {
        let mobile = checked_mobile(&mobile)?;

        let mut conn = self.pool.acquire().await?;

        let recent: i64 = conn
            .fetch_one(
                sqlx::query(
                    "SELECT COUNT(*) AS recent FROM otp_requests WHERE mobile = $1 AND requested_at > now() - interval '1 hour'",
                )
                .bind(&mobile),
            )
            .await?
            .try_get("recent")?;

        if recent >= MAX_OTP_REQUESTS_PER_HOUR {
            tracing::warn!(%mobile, "OTP request rate limit hit");
            return Err(rate_limited_error());
        }

        conn.execute(sqlx::query("INSERT INTO otp_requests (mobile) VALUES ($1)").bind(&mobile))
            .await?;

        tracing::info!(%mobile, "OTP verification opened");

        Ok(())
    }

    #[tracing::instrument(skip(self, id_token))]
    async fn verify_otp(&self, mobile: String, id_token: String) -> Result<AuthGrant, Error> {
        let mobile = checked_mobile(&mobile)?;

        let verification = firebase_auth::verify_id_token(id_token).await?;

        if normalize_mobile(&verification.phone_number) != mobile {
            return Err(authentication_error("mobile number mismatch"));
        }

        let rider = Rider::new(mobile);

        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_one(
                sqlx::query(
                    "INSERT INTO riders (id, mobile) VALUES ($1, $2) ON CONFLICT (mobile) DO UPDATE SET mobile = EXCLUDED.mobile RETURNING id, mobile",
                )
                .bind(&rider.id)
                .bind(&rider.mobile),
            )
            .await?;

        let rider = Rider {
            id: row.try_get("id")?,
            mobile: row.try_get("mobile")?,
        };

        let token = self.keys.issue(&rider)?;

        tracing::info!(rider_id = %rider.id, "rider verified, session issued");

        Ok(AuthGrant { token, rider })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn short_mobile_numbers_are_rejected() {
        let error = checked_mobile("12345").unwrap_err();
        assert_eq!(error.kind, Kind::InvalidArgument);
    }

    #[test]
    fn dialled_forms_normalize_before_validation() {
        assert_eq!(checked_mobile("+91 98765-43210").unwrap(), "9876543210");
    }
}
