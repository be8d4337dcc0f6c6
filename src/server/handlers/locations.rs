use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::Coordinates;
use crate::error::{invalid_argument_error, Error};
use crate::external::google_maps::PlaceSuggestions;

#[derive(Serialize, Deserialize)]
pub struct CalculateParams {
    pickup: Option<Coordinates>,
    drop: Option<Coordinates>,
}

#[derive(Serialize, Deserialize)]
pub struct CalculateResponse {
    distance: f64,
    duration: i64,
}

pub async fn calculate(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CalculateParams>,
) -> Result<Json<CalculateResponse>, Error> {
    let pickup = params
        .pickup
        .ok_or_else(|| invalid_argument_error("pickup and drop locations required"))?;
    let drop = params
        .drop
        .ok_or_else(|| invalid_argument_error("pickup and drop locations required"))?;

    let metrics = api.route_metrics(pickup, drop).await?;

    Ok(Json(CalculateResponse {
        distance: metrics.distance_km,
        duration: metrics.duration_min.round() as i64,
    }))
}

#[derive(Serialize, Deserialize)]
pub struct AutocompleteParams {
    input: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct AutocompleteResponse {
    predictions: PlaceSuggestions,
}

pub async fn autocomplete(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, Error> {
    let (input, bias) = search_from(params)?;

    let predictions = api.find_place_suggestions(input, bias).await?;

    Ok(Json(AutocompleteResponse { predictions }))
}

fn search_from(params: AutocompleteParams) -> Result<(String, Option<Coordinates>), Error> {
    let bias = bias_from(&params);

    let input = params
        .input
        .ok_or_else(|| invalid_argument_error("search input required"))?;

    Ok((input, bias))
}

/// The caller's position is an optional hint; anything unparsable simply
/// leaves the search unbiased.
fn bias_from(params: &AutocompleteParams) -> Option<Coordinates> {
    let lat = params.lat.as_ref()?.parse().ok()?;
    let lng = params.lng.as_ref()?.parse().ok()?;

    Some(Coordinates { lat, lng })
}
