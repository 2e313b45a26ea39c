use super::model::Location;
use rand::Rng;

/// Latitude in [-90, 90) and longitude in [-180, 180), drawn independently.
pub fn random_location<R: Rng>(rng: &mut R) -> Location {
    Location {
        latitude: rng.random_range(-90..90),
        longitude: rng.random_range(-180..180),
    }
}
