use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{EstimateParams, FareAPI},
    entities::{fare, Coordinates, FareEstimate},
    error::{invalid_argument_error, Error},
    external::google_maps,
};

#[derive(Debug)]
enum TripInputs {
    Metrics { distance_km: f64, duration_min: f64 },
    Endpoints { pickup: Coordinates, drop: Coordinates },
}

/// Precomputed metrics win over endpoints, and must arrive as a pair.
fn trip_inputs(params: &EstimateParams) -> Result<TripInputs, Error> {
    match (params.distance_km, params.duration_min) {
        (Some(distance_km), Some(duration_min)) => Ok(TripInputs::Metrics {
            distance_km,
            duration_min,
        }),
        (None, None) => match (params.pickup, params.drop) {
            (Some(pickup), Some(drop)) => Ok(TripInputs::Endpoints { pickup, drop }),
            _ => Err(invalid_argument_error(
                "pickup and drop coordinates required",
            )),
        },
        _ => Err(invalid_argument_error(
            "distance and duration must be supplied together",
        )),
    }
}

#[async_trait]
impl FareAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn estimate_fare(&self, params: EstimateParams) -> Result<FareEstimate, Error> {
        let (distance_km, duration_min) = match trip_inputs(&params)? {
            TripInputs::Metrics {
                distance_km,
                duration_min,
            } => (distance_km, duration_min),
            TripInputs::Endpoints { pickup, drop } => {
                let metrics = google_maps::route_metrics(pickup, drop).await?;
                (metrics.distance_km, metrics.duration_min)
            }
        };

        fare::estimate(distance_km, duration_min, params.vehicle_class)
    }
}
