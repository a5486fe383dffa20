use thiserror::Error;
use urlencoding::encode;

pub const MIN_RADIUS_M: u32 = 1_000;
pub const MAX_RADIUS_M: u32 = 50_000;
pub const DEFAULT_RADIUS_M: u32 = 5_000;

// Appended to every text query so Google ranks eateries over other place types.
const BIAS_TERM: &str = "restaurant";

#[derive(Debug, Error, PartialEq)]
pub enum SearchQueryError {
    #[error("Missing query")]
    MissingQuery,
    #[error("Invalid {field}: {value:?} is not a valid coordinate")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Search parameters exactly as the caller sent them.
#[derive(Debug, Default)]
pub struct SearchFilterInput {
    pub query: Option<String>,
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius_m: Option<String>,
    pub open_now: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub diets: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Inclusive Google price levels, `None` meaning unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBand {
    pub min: Option<u8>,
    pub max: Option<u8>,
}

impl PriceBand {
    pub fn new(min: Option<&str>, max: Option<&str>) -> Self {
        let min = parse_price_level(min);
        let max = parse_price_level(max);

        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => PriceBand::default(),
            _ => PriceBand { min, max },
        }
    }
}

/// Validated search state. When `coordinates` is set, `location_text` is
/// always `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub text: String,
    pub coordinates: Option<Coordinates>,
    pub location_text: Option<String>,
    pub radius_m: u32,
    pub open_now: bool,
    pub price: PriceBand,
    pub diet: Option<String>,
}

impl SearchFilters {
    pub fn parse(input: SearchFilterInput) -> Result<Self, SearchQueryError> {
        let text = non_blank(input.query)
            .or_else(|| non_blank(input.q))
            .ok_or(SearchQueryError::MissingQuery)?;

        let coordinates = match (non_blank(input.lat), non_blank(input.lng)) {
            (Some(lat), Some(lng)) => Some(Coordinates {
                lat: parse_coordinate("lat", &lat, 90.0)?,
                lng: parse_coordinate("lng", &lng, 180.0)?,
            }),
            _ => None,
        };

        let location_text = match coordinates {
            Some(_) => None,
            None => non_blank(input.location),
        };

        Ok(SearchFilters {
            text,
            coordinates,
            location_text,
            radius_m: clamp_radius(input.radius_m.as_deref()),
            open_now: input
                .open_now
                .as_deref()
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            price: PriceBand::new(input.price_min.as_deref(), input.price_max.as_deref()),
            diet: non_blank(input.diets),
        })
    }
}

/// Ordered Google Text Search parameters, without the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(&'static str, String)>,
}

impl SearchQuery {
    pub fn build(filters: &SearchFilters) -> Self {
        let mut terms = vec![filters.text.as_str()];
        if let Some(diet) = &filters.diet {
            terms.push(diet);
        }
        if let Some(location) = &filters.location_text {
            terms.push(location);
        }
        terms.push(BIAS_TERM);

        let text = terms.join(" ").split_whitespace().collect::<Vec<_>>().join(" ");

        let mut params = vec![("query", text)];

        if let Some(Coordinates { lat, lng }) = filters.coordinates {
            params.push(("location", format!("{},{}", lat, lng)));
            params.push(("radius", filters.radius_m.to_string()));
        }

        if let Some(min) = filters.price.min {
            params.push(("minprice", min.to_string()));
        }
        if let Some(max) = filters.price.max {
            params.push(("maxprice", max.to_string()));
        }

        if filters.open_now {
            params.push(("opennow", "true".to_string()));
        }

        SearchQuery { params }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Maps any requested radius into the range Google accepts for text search.
/// Absent, unparsable and zero values fall back to the default.
pub fn clamp_radius(radius_m: Option<&str>) -> u32 {
    let requested = radius_m
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r != 0.0)
        .unwrap_or(DEFAULT_RADIUS_M as f64);

    requested
        .clamp(MIN_RADIUS_M as f64, MAX_RADIUS_M as f64)
        .round() as u32
}

fn parse_price_level(value: Option<&str>) -> Option<u8> {
    let value = value?;
    if value.len() != 1 {
        return None;
    }
    value.parse::<u8>().ok().filter(|level| *level <= 4)
}

fn parse_coordinate(
    field: &'static str,
    value: &str,
    bound: f64,
) -> Result<f64, SearchQueryError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= bound)
        .ok_or_else(|| SearchQueryError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
