use serde::{Deserialize, Serialize};

/// Fare rates per vehicle class, in whole rupees except the per-unit rates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingRule {
    pub base: f64,
    pub per_km: f64,
    pub per_min: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Auto,
    Car,
    Premium,
}

impl Default for VehicleClass {
    fn default() -> Self {
        Self::Car
    }
}

impl VehicleClass {
    /// Unrecognized selectors fall back to the default class rather than
    /// failing the request.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Self::Auto,
            "car" => Self::Car,
            "premium" => Self::Premium,
            _ => Self::default(),
        }
    }

    pub fn pricing(&self) -> PricingRule {
        match self {
            Self::Auto => PricingRule {
                base: 30.0,
                per_km: 12.0,
                per_min: 1.0,
            },
            Self::Car => PricingRule {
                base: 50.0,
                per_km: 15.0,
                per_min: 2.0,
            },
            Self::Premium => PricingRule {
                base: 80.0,
                per_km: 20.0,
                per_min: 3.0,
            },
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Auto => "auto".into(),
            Self::Car => "car".into(),
            Self::Premium => "premium".into(),
        }
    }
}
