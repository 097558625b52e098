use serde::{Deserialize, Serialize};

/// Raw field values as typed into the form
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub radius: String,
}
