use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, EstimateParams};
use crate::entities::{Coordinates, FareBreakdown, FareEstimate, VehicleClass};
use crate::error::{invalid_argument_error, Error};

/// Query-string form of the estimate request. Everything arrives as text,
/// so numeric fields are validated here rather than by the extractor.
#[derive(Serialize, Deserialize)]
pub struct EstimateQuery {
    pickup_lat: Option<String>,
    pickup_lng: Option<String>,
    drop_lat: Option<String>,
    drop_lng: Option<String>,
    distance_km: Option<String>,
    duration_min: Option<String>,
    vehicle_type: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct EstimateBody {
    pickup: Option<Coordinates>,
    drop: Option<Coordinates>,
    distance_km: Option<f64>,
    duration_min: Option<f64>,
    vehicle_type: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct EstimateResponse {
    success: bool,
    vehicle_type: String,
    distance_km: f64,
    duration_min: i64,
    estimated_price: i64,
    breakdown: FareBreakdown,
}

pub async fn estimate(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<EstimateQuery>,
) -> Result<Json<EstimateResponse>, Error> {
    let estimate = api
        .estimate_fare(EstimateParams {
            pickup: coordinates_from(&params.pickup_lat, &params.pickup_lng)?,
            drop: coordinates_from(&params.drop_lat, &params.drop_lng)?,
            distance_km: numeric_from(&params.distance_km)?,
            duration_min: numeric_from(&params.duration_min)?,
            vehicle_class: vehicle_class_from(params.vehicle_type.as_deref()),
        })
        .await?;

    Ok(Json(estimate.into()))
}

pub async fn estimate_trip(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<EstimateBody>,
) -> Result<Json<EstimateResponse>, Error> {
    let estimate = api
        .estimate_fare(EstimateParams {
            pickup: params.pickup,
            drop: params.drop,
            distance_km: params.distance_km,
            duration_min: params.duration_min,
            vehicle_class: vehicle_class_from(params.vehicle_type.as_deref()),
        })
        .await?;

    Ok(Json(estimate.into()))
}

fn vehicle_class_from(value: Option<&str>) -> VehicleClass {
    value.map(VehicleClass::parse).unwrap_or_default()
}

fn numeric_from(value: &Option<String>) -> Result<Option<f64>, Error> {
    match value {
        Some(value) => {
            let number = value
                .parse()
                .map_err(|_| invalid_argument_error("expected a numeric value"))?;

            Ok(Some(number))
        }
        None => Ok(None),
    }
}

fn coordinates_from(
    lat: &Option<String>,
    lng: &Option<String>,
) -> Result<Option<Coordinates>, Error> {
    match (numeric_from(lat)?, numeric_from(lng)?) {
        (Some(lat), Some(lng)) => Ok(Some(Coordinates { lat, lng })),
        (None, None) => Ok(None),
        _ => Err(invalid_argument_error(
            "coordinates must be given as a lat,lng pair",
        )),
    }
}

impl From<FareEstimate> for EstimateResponse {
    fn from(estimate: FareEstimate) -> Self {
        Self {
            success: true,
            vehicle_type: estimate.vehicle_class.name(),
            distance_km: (estimate.distance_km * 100.0).round() / 100.0,
            duration_min: estimate.duration_min.round() as i64,
            estimated_price: estimate.breakdown.total,
            breakdown: estimate.breakdown,
        }
    }
}
