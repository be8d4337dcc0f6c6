use serde::Deserialize;
use std::env;

use crate::error::{authentication_error, upstream_error, Error};

/// A phone number Firebase has confirmed via its client-side OTP flow.
#[derive(Clone, Debug)]
pub struct VerifiedPhone {
    pub uid: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, Deserialize)]
struct LookupResponse {
    users: Option<Vec<LookupUser>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    phone_number: Option<String>,
}

#[tracing::instrument(skip(id_token))]
pub async fn verify_id_token(id_token: String) -> Result<VerifiedPhone, Error> {
    let api_base = env::var("FIREBASE_API_BASE")?;
    let url = format!("https://{}/v1/accounts:lookup", api_base);
    let key = env::var("FIREBASE_API_KEY")?;

    let res = reqwest::Client::new()
        .post(url)
        .query(&[("key", key)])
        .json(&serde_json::json!({ "idToken": id_token }))
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(authentication_error("invalid or expired verification"));
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: LookupResponse = res.json().await?;

    verified_phone_from_response(data)
}

fn verified_phone_from_response(data: LookupResponse) -> Result<VerifiedPhone, Error> {
    let user = data
        .users
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| authentication_error("invalid or expired verification"))?;

    let phone_number = user
        .phone_number
        .ok_or_else(|| authentication_error("no verified phone number on account"))?;

    Ok(VerifiedPhone {
        uid: user.local_id,
        phone_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;
    use serde_json::{from_value, json};

    #[test]
    fn lookup_yields_the_confirmed_phone_number() {
        let data: LookupResponse = from_value(json!({
            "users": [{
                "localId": "firebase-uid-1",
                "phoneNumber": "+919876543210",
            }],
        }))
        .unwrap();

        let verified = verified_phone_from_response(data).unwrap();
        assert_eq!(verified.uid, "firebase-uid-1");
        assert_eq!(verified.phone_number, "+919876543210");
    }

    #[test]
    fn unknown_tokens_fail_authentication() {
        let data: LookupResponse = from_value(json!({ "users": [] })).unwrap();

        let error = verified_phone_from_response(data).unwrap_err();
        assert_eq!(error.kind, Kind::AuthenticationFailure);
    }

    #[test]
    fn accounts_without_a_phone_number_fail_authentication() {
        let data: LookupResponse = from_value(json!({
            "users": [{ "localId": "firebase-uid-2" }],
        }))
        .unwrap();

        let error = verified_phone_from_response(data).unwrap_err();
        assert_eq!(error.kind, Kind::AuthenticationFailure);
    }
}
