use serde::{Deserialize, Serialize};

/// A single record returned by the remote places service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Place {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl Place {
    pub fn map_link(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lng)
    }
}

/// What gets sent to the remote service, built fresh for every submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub latitude: f64,
    pub longitude: f64,
    // Same unit the remote service expects, passed through untouched
    pub radius: f64,
}

impl Query {
    /// Query string pairs, numbers in shortest decimal form ("10" rather than "10.0")
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("radius", self.radius.to_string()),
        ]
    }
}
