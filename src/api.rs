use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Coordinates, FareEstimate, Rider, VehicleClass};
use crate::error::Error;
use crate::external::google_maps::{PlaceSuggestion, RouteMetrics};

/// Inputs for a fare estimate. Callers either name the endpoints of the
/// trip or supply the distance and duration they already know.
#[derive(Clone, Copy, Debug)]
pub struct EstimateParams {
    pub pickup: Option<Coordinates>,
    pub drop: Option<Coordinates>,
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub vehicle_class: VehicleClass,
}

/// A freshly verified rider and the session token that proves it.
#[derive(Clone, Debug)]
pub struct AuthGrant {
    pub token: String,
    pub rider: Rider,
}

#[async_trait]
pub trait FareAPI {
    async fn estimate_fare(&self, params: EstimateParams) -> Result<FareEstimate, Error>;
}

#[async_trait]
pub trait AuthAPI {
    async fn begin_verification(&self, mobile: String) -> Result<(), Error>;

    async fn verify_otp(&self, mobile: String, id_token: String) -> Result<AuthGrant, Error>;
}

#[async_trait]
pub trait LocationAPI {
    async fn route_metrics(
        &self,
        pickup: Coordinates,
        drop: Coordinates,
    ) -> Result<RouteMetrics, Error>;

    async fn find_place_suggestions(
        &self,
        input: String,
        bias: Option<Coordinates>,
    ) -> Result<Vec<PlaceSuggestion>, Error>;
}

pub trait API: FareAPI + AuthAPI + LocationAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
