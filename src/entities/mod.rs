pub mod fare;

mod location;
mod rider;
mod vehicle;

pub use fare::{FareBreakdown, FareEstimate};
pub use location::Coordinates;
pub use rider::Rider;
pub use vehicle::{PricingRule, VehicleClass};
