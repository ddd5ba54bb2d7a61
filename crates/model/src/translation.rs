use serde::{Deserialize, Serialize};

use crate::{id::Id, station::Station};

/// One per-language name/description row for a station, unique per
/// `(evse_id, language)`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationTranslation {
    pub evse_id: Id<Station>,
    pub language: String,
    pub charging_station_name: Option<String>,
    pub additional_info: Option<String>,
}

impl StationTranslation {
    pub fn new<L: Into<String>>(
        evse_id: Id<Station>,
        language: L,
        charging_station_name: Option<String>,
        additional_info: Option<String>,
    ) -> Self {
        Self {
            evse_id,
            language: language.into(),
            charging_station_name,
            additional_info,
        }
    }
}
