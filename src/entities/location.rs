use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lat, coordinates.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_format_as_lat_lng_pair() {
        let location: String = Coordinates {
            lat: 12.9716,
            lng: 77.5946,
        }
        .into();

        assert_eq!(location, "12.9716,77.5946");
    }
}
