use super::address::NormalizedAddress;

/// Resolved position of a supported city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub city: &'static str,
    pub county: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy)]
struct GazetteerEntry {
    city: &'static str,
    county: &'static str,
    latitude: f64,
    longitude: f64,
}

const fn entry(
    city: &'static str,
    county: &'static str,
    latitude: f64,
    longitude: f64,
) -> GazetteerEntry {
    GazetteerEntry {
        city,
        county,
        latitude,
        longitude,
    }
}

const GAZETTEER: &[GazetteerEntry] = &[
    entry("Los Angeles", "Los Angeles", 34.0522, -118.2437),
    entry("Pasadena", "Los Angeles", 34.1478, -118.1445),
    entry("Glendale", "Los Angeles", 34.1425, -118.2551),
    entry("Burbank", "Los Angeles", 34.1808, -118.3090),
    entry("Santa Monica", "Los Angeles", 34.0195, -118.4912),
    entry("Long Beach", "Los Angeles", 33.7701, -118.1937),
    entry("Irvine", "Orange", 33.6846, -117.8265),
    entry("San Diego", "San Diego", 32.7157, -117.1611),
    entry("Riverside", "Riverside", 33.9806, -117.3755),
    entry("Sacramento", "Sacramento", 38.5816, -121.4944),
    entry("Oakland", "Alameda", 37.8044, -122.2712),
    entry("Berkeley", "Alameda", 37.8715, -122.2730),
    entry("San Francisco", "San Francisco", 37.7749, -122.4194),
    entry("San Jose", "Santa Clara", 37.3382, -121.8863),
    entry("Fresno", "Fresno", 36.7378, -119.7871),
];

/// Static lookup of the California cities the service currently covers.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gazetteer;

impl Gazetteer {
    pub fn locate(&self, address: &NormalizedAddress) -> Result<Location, UnsupportedArea> {
        if !address.is_california() {
            return Err(UnsupportedArea::State(address.state.clone()));
        }

        GAZETTEER
            .iter()
            .find(|entry| entry.city.eq_ignore_ascii_case(&address.city))
            .map(|entry| Location {
                city: entry.city,
                county: entry.county,
                latitude: entry.latitude,
                longitude: entry.longitude,
            })
            .ok_or_else(|| UnsupportedArea::City(address.city.clone()))
    }

    pub fn supported_cities(&self) -> impl Iterator<Item = &'static str> {
        GAZETTEER.iter().map(|entry| entry.city)
    }
}

/// Address falls outside the serviceable geography.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedArea {
    #[error("we currently analyze California properties only (got state '{0}')")]
    State(String),
    #[error("{0} is not in our coverage area yet; try a nearby supported California city")]
    City(String),
}
