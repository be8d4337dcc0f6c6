use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    entities::Coordinates,
    error::{invalid_argument_error, Error},
    external::google_maps::{self, PlaceSuggestion, RouteMetrics},
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn route_metrics(
        &self,
        pickup: Coordinates,
        drop: Coordinates,
    ) -> Result<RouteMetrics, Error> {
        google_maps::route_metrics(pickup, drop).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_place_suggestions(
        &self,
        input: String,
        bias: Option<Coordinates>,
    ) -> Result<Vec<PlaceSuggestion>, Error> {
        if input.trim().is_empty() {
            return Err(invalid_argument_error("search input required"));
        }

        google_maps::find_place_suggestions(input, bias).await
    }
}
