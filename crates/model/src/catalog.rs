use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{id::Id, station::Station};

/// The six enumerated categories persisted through join tables.
/// Accessibility is the seventh catalog but lives inline on the station
/// row, so it is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkCategory {
    Plug,
    ChargingFacility,
    ChargingMode,
    AuthenticationMode,
    PaymentOption,
    ValueAddedService,
}

impl LinkCategory {
    pub const ALL: [LinkCategory; 6] = [
        LinkCategory::Plug,
        LinkCategory::ChargingFacility,
        LinkCategory::ChargingMode,
        LinkCategory::AuthenticationMode,
        LinkCategory::PaymentOption,
        LinkCategory::ValueAddedService,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LinkCategory::Plug => "plug",
            LinkCategory::ChargingFacility => "charging facility",
            LinkCategory::ChargingMode => "charging mode",
            LinkCategory::AuthenticationMode => "authentication mode",
            LinkCategory::PaymentOption => "payment option",
            LinkCategory::ValueAddedService => "value added service",
        }
    }
}

/// A `{id, name}` reference row of one of the simple catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
}

/// Charging facilities are keyed by facility class and nominal power
/// jointly, not by a single name.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingFacilityEntry {
    pub id: i32,
    pub name: String,
    pub power: Option<i32>,
}

/// The full reference data of all seven categories, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub accessibility: Vec<CatalogEntry>,
    pub plugs: Vec<CatalogEntry>,
    pub charging_facilities: Vec<ChargingFacilityEntry>,
    pub charging_modes: Vec<CatalogEntry>,
    pub authentication_modes: Vec<CatalogEntry>,
    pub payment_options: Vec<CatalogEntry>,
    pub value_added_services: Vec<CatalogEntry>,
}

impl Catalogs {
    /// Builds the read-only lookup view the resolvers work against.
    pub fn snapshot(&self) -> CatalogSnapshot {
        fn by_name(entries: &[CatalogEntry]) -> HashMap<String, i32> {
            entries
                .iter()
                .map(|entry| (entry.name.clone(), entry.id))
                .collect()
        }

        let mut simple = HashMap::new();
        simple.insert(LinkCategory::Plug, by_name(&self.plugs));
        simple.insert(LinkCategory::ChargingMode, by_name(&self.charging_modes));
        simple.insert(
            LinkCategory::AuthenticationMode,
            by_name(&self.authentication_modes),
        );
        simple.insert(LinkCategory::PaymentOption, by_name(&self.payment_options));
        simple.insert(
            LinkCategory::ValueAddedService,
            by_name(&self.value_added_services),
        );

        CatalogSnapshot {
            accessibility: by_name(&self.accessibility),
            simple,
            charging_facilities: self
                .charging_facilities
                .iter()
                .map(|entry| ((entry.name.clone(), entry.power), entry.id))
                .collect(),
        }
    }
}

/// Immutable name → id view over the catalogs. Passed explicitly to the
/// resolvers so they carry no hidden shared state.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    accessibility: HashMap<String, i32>,
    simple: HashMap<LinkCategory, HashMap<String, i32>>,
    charging_facilities: HashMap<(String, Option<i32>), i32>,
}

impl CatalogSnapshot {
    pub fn accessibility_id(&self, name: &str) -> Option<i32> {
        self.accessibility.get(name).copied()
    }

    /// Exact-match resolution for the five single-name categories.
    /// Returns `None` for `ChargingFacility`, which needs the compound
    /// lookup below.
    pub fn resolve(&self, category: LinkCategory, name: &str) -> Option<i32> {
        self.simple
            .get(&category)
            .and_then(|entries| entries.get(name))
            .copied()
    }

    pub fn charging_facility_id(
        &self,
        name: &str,
        power: Option<i32>,
    ) -> Option<i32> {
        self.charging_facilities
            .get(&(name.to_owned(), power))
            .copied()
    }
}

/// A station ↔ catalog-entry join row, unique per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationLink {
    pub evse_id: Id<Station>,
    pub catalog_id: i32,
}

impl StationLink {
    pub fn new(evse_id: Id<Station>, catalog_id: i32) -> Self {
        Self { evse_id, catalog_id }
    }
}
