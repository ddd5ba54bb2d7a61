//! Unpacks the multi-language additional-info field into per-language
//! translation rows. The packed field holds `CODE:freetext` segments
//! separated and terminated by `|||`; the two anchor codes additionally
//! bind the station's scalar name fields to their language.

use model::{
    id::Id,
    station::Station,
    translation::StationTranslation,
};

use crate::{
    languages::CountryLanguages,
    operators::StationRecord,
};

pub const SEGMENT_DELIMITER: &str = "|||";

/// Anchor code whose row carries the primary station name.
pub const NATIVE_COUNTRY: &str = "DEU";
/// Anchor code whose row carries the English station name.
pub const ENGLISH_COUNTRY: &str = "GBR";

#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    pub country: &'a str,
    pub text: &'a str,
}

/// Tokenizes a packed field. The delimiter terminates a segment, so
/// whatever follows the last delimiter is never a segment. A segment's
/// country code is the three ASCII uppercase letters immediately before
/// its first colon; tokens without a valid code are skipped.
pub fn segments(packed: &str) -> Vec<Segment<'_>> {
    let mut tokens: Vec<&str> = packed.split(SEGMENT_DELIMITER).collect();
    tokens.pop();

    tokens
        .into_iter()
        .filter_map(|token| {
            let (before_colon, text) = token.split_once(':')?;
            let code = before_colon
                .get(before_colon.len().saturating_sub(3)..)?;
            if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
                Some(Segment {
                    country: code,
                    text: text.trim(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Derives the full ordered translation-row sequence for a batch.
/// Re-running over the same input yields the same rows.
pub fn extract_translations(
    stations: &[StationRecord],
    languages: &dyn CountryLanguages,
) -> Vec<StationTranslation> {
    let mut rows = Vec::new();
    for station in stations {
        extract_for_station(station, languages, &mut rows);
    }
    rows
}

fn extract_for_station(
    station: &StationRecord,
    languages: &dyn CountryLanguages,
    rows: &mut Vec<StationTranslation>,
) {
    let evse = &station.evse;
    let evse_id = Id::<Station>::new(evse.evse_id.clone());
    let mut seen_native = false;
    let mut seen_english = false;

    if let Some(packed) = &evse.additional_info {
        for segment in segments(packed) {
            seen_native |= segment.country == NATIVE_COUNTRY;
            seen_english |= segment.country == ENGLISH_COUNTRY;

            let name = match segment.country {
                NATIVE_COUNTRY => evse.charging_station_name.clone(),
                ENGLISH_COUNTRY => evse.en_charging_station_name.clone(),
                _ => None,
            };
            rows.push(StationTranslation::new(
                evse_id.clone(),
                language_for(languages, segment.country),
                name,
                Some(segment.text.to_owned()),
            ));
        }
    }

    // anchors without a scanned segment fall back to the scalar name
    // fields, independently of each other
    if !seen_native {
        backfill(
            rows,
            &evse_id,
            languages,
            NATIVE_COUNTRY,
            evse.charging_station_name.as_deref(),
        );
    }
    if !seen_english {
        backfill(
            rows,
            &evse_id,
            languages,
            ENGLISH_COUNTRY,
            evse.en_charging_station_name.as_deref(),
        );
    }
}

fn backfill(
    rows: &mut Vec<StationTranslation>,
    evse_id: &Id<Station>,
    languages: &dyn CountryLanguages,
    country: &str,
    name: Option<&str>,
) {
    let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
        return;
    };
    rows.push(StationTranslation::new(
        evse_id.clone(),
        language_for(languages, country),
        Some(name.to_owned()),
        None,
    ));
}

/// A failed lookup never fails the row; the raw country code stands in
/// for the language instead.
fn language_for(languages: &dyn CountryLanguages, country: &str) -> String {
    match languages.language_for(country) {
        Ok(language) => language.to_owned(),
        Err(why) => {
            log::warn!("language lookup failed, keeping country code: {}", why);
            country.to_owned()
        }
    }
}
