use serde::{Deserialize, Serialize};

use crate::entities::VehicleClass;
use crate::error::{invalid_argument_error, Error};

/// Rounded component costs in whole rupees, for display alongside the total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub base: i64,
    pub distance_cost: i64,
    pub time_cost: i64,
    pub total: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FareEstimate {
    pub distance_km: f64,
    pub duration_min: f64,
    pub vehicle_class: VehicleClass,
    pub breakdown: FareBreakdown,
}

/// Prices a trip of the given length for a vehicle class.
///
/// The total is rounded once, from the unrounded component costs. The
/// breakdown fields are rounded for display and may not sum to the total.
pub fn estimate(
    distance_km: f64,
    duration_min: f64,
    vehicle_class: VehicleClass,
) -> Result<FareEstimate, Error> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(invalid_argument_error(
            "distance must be a non-negative number",
        ));
    }

    if !duration_min.is_finite() || duration_min < 0.0 {
        return Err(invalid_argument_error(
            "duration must be a non-negative number",
        ));
    }

    let rule = vehicle_class.pricing();
    let distance_cost = distance_km * rule.per_km;
    let time_cost = duration_min * rule.per_min;

    let breakdown = FareBreakdown {
        base: rule.base.round() as i64,
        distance_cost: distance_cost.round() as i64,
        time_cost: time_cost.round() as i64,
        total: (rule.base + distance_cost + time_cost).round() as i64,
    };

    Ok(FareEstimate {
        distance_km,
        duration_min,
        vehicle_class,
        breakdown,
    })
}
