use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Coordinates,
    error::{invalid_argument_error, upstream_error, Error},
};

/// Driving distance and time between two points, in the units the fare
/// table is written in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

pub type PlaceSuggestions = Vec<PlaceSuggestion>;

#[derive(Clone, Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Clone, Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Clone, Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<Metric>,
    duration: Option<Metric>,
    duration_in_traffic: Option<Metric>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct Metric {
    value: f64,
}

#[derive(Clone, Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    predictions: Option<PlaceSuggestions>,
}

#[tracing::instrument]
pub async fn route_metrics(
    origin: Coordinates,
    destination: Coordinates,
) -> Result<RouteMetrics, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/distancematrix/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let origin: String = origin.into();
    let destination: String = destination.into();

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("origins", origin)])
        .query(&[("destinations", destination)])
        .query(&[("mode", "driving")])
        .query(&[("departure_time", "now")])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_argument_error("route request rejected"));
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: DistanceMatrixResponse = res.json().await?;

    metrics_from_response(data)
}

fn metrics_from_response(data: DistanceMatrixResponse) -> Result<RouteMetrics, Error> {
    if data.status != "OK" {
        return Err(upstream_error());
    }

    let element = data
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| upstream_error())?;

    if element.status != "OK" {
        return Err(upstream_error());
    }

    let distance = element.distance.ok_or_else(|| upstream_error())?;

    // traffic-aware duration when the matrix carries one
    let duration = element
        .duration_in_traffic
        .or(element.duration)
        .ok_or_else(|| upstream_error())?;

    Ok(RouteMetrics {
        distance_km: distance.value / 1000.0,
        duration_min: duration.value / 60.0,
    })
}

#[tracing::instrument]
pub async fn find_place_suggestions(
    input: String,
    bias: Option<Coordinates>,
) -> Result<Vec<PlaceSuggestion>, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/place/autocomplete/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let mut req = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("input", input)])
        .query(&[("types", "geocode")]);

    if let Some(location) = bias {
        let location: String = location.into();
        req = req.query(&[("locationbias", format!("circle:50000@{}", location))]);
    }

    let res = req.send().await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_argument_error("autocomplete request rejected"));
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: AutocompleteResponse = res.json().await?;

    suggestions_from_response(data)
}

fn suggestions_from_response(data: AutocompleteResponse) -> Result<Vec<PlaceSuggestion>, Error> {
    if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
        return Err(upstream_error());
    }

    Ok(data.predictions.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;
    use serde_json::{from_value, json};

    #[test]
    fn metrics_convert_meters_and_seconds() {
        let data: DistanceMatrixResponse = from_value(json!({
            "status": "OK",
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "distance": { "value": 10000 },
                    "duration": { "value": 1200 },
                }],
            }],
        }))
        .unwrap();

        let metrics = metrics_from_response(data).unwrap();
        assert_eq!(metrics.distance_km, 10.0);
        assert_eq!(metrics.duration_min, 20.0);
    }

    #[test]
    fn metrics_prefer_the_traffic_aware_duration() {
        let data: DistanceMatrixResponse = from_value(json!({
            "status": "OK",
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "distance": { "value": 5000 },
                    "duration": { "value": 600 },
                    "duration_in_traffic": { "value": 900 },
                }],
            }],
        }))
        .unwrap();

        let metrics = metrics_from_response(data).unwrap();
        assert_eq!(metrics.duration_min, 15.0);
    }

    #[test]
    fn unroutable_pairs_surface_as_upstream_errors() {
        let data: DistanceMatrixResponse = from_value(json!({
            "status": "OK",
            "rows": [{
                "elements": [{ "status": "ZERO_RESULTS" }],
            }],
        }))
        .unwrap();

        let error = metrics_from_response(data).unwrap_err();
        assert_eq!(error.kind, Kind::UpstreamUnavailable);
    }

    #[test]
    fn denied_matrix_requests_surface_as_upstream_errors() {
        let data: DistanceMatrixResponse = from_value(json!({
            "status": "REQUEST_DENIED",
            "rows": [],
        }))
        .unwrap();

        assert!(metrics_from_response(data).is_err());
    }

    #[test]
    fn empty_matrix_rows_surface_as_upstream_errors() {
        let data: DistanceMatrixResponse = from_value(json!({
            "status": "OK",
            "rows": [],
        }))
        .unwrap();

        assert!(metrics_from_response(data).is_err());
    }

    #[test]
    fn zero_results_autocomplete_is_an_empty_list() {
        let data: AutocompleteResponse = from_value(json!({
            "status": "ZERO_RESULTS",
        }))
        .unwrap();

        assert!(suggestions_from_response(data).unwrap().is_empty());
    }

    #[test]
    fn autocomplete_predictions_pass_through() {
        let data: AutocompleteResponse = from_value(json!({
            "status": "OK",
            "predictions": [
                { "place_id": "abc123", "description": "MG Road, Bengaluru" },
            ],
        }))
        .unwrap();

        let suggestions = suggestions_from_response(data).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].description, "MG Road, Bengaluru");
    }

    #[test]
    fn denied_autocomplete_requests_surface_as_upstream_errors() {
        let data: AutocompleteResponse = from_value(json!({
            "status": "REQUEST_DENIED",
        }))
        .unwrap();

        assert!(suggestions_from_response(data).is_err());
    }
}
