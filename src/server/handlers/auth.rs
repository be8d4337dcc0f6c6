use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::auth::Session;
use crate::error::{invalid_argument_error, Error};

#[derive(Serialize, Deserialize)]
pub struct SendOtpParams {
    mobile: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SendOtpResponse {
    success: bool,
    message: String,
}

pub async fn send_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SendOtpParams>,
) -> Result<Json<SendOtpResponse>, Error> {
    let mobile = params
        .mobile
        .ok_or_else(|| invalid_argument_error("mobile number required"))?;

    api.begin_verification(mobile).await?;

    Ok(Json(SendOtpResponse {
        success: true,
        message: "ready for client-side OTP".into(),
    }))
}

#[derive(Serialize, Deserialize)]
pub struct VerifyOtpParams {
    mobile: Option<String>,
    otp: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionUser {
    id: Uuid,
    mobile: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    success: bool,
    message: String,
    token: String,
    user: SessionUser,
}

pub async fn verify_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<VerifyOtpParams>,
) -> Result<Json<VerifyOtpResponse>, Error> {
    let mobile = params
        .mobile
        .ok_or_else(|| invalid_argument_error("mobile number required"))?;

    // the "otp" the client holds is the provider's signed ID token
    let id_token = params
        .otp
        .ok_or_else(|| invalid_argument_error("verification token required"))?;

    let grant = api.verify_otp(mobile, id_token).await?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        message: "OTP verified".into(),
        token: grant.token,
        user: SessionUser {
            id: grant.rider.id,
            mobile: grant.rider.mobile,
        },
    }))
}

#[derive(Serialize, Deserialize)]
pub struct MeResponse {
    success: bool,
    user: SessionUser,
}

pub async fn me(session: Session) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: SessionUser {
            id: session.rider_id,
            mobile: session.mobile,
        },
    })
}
