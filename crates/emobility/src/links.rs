//! Resolves the free-text option lists of every station against the
//! catalog snapshot, producing one join-row set per category. Names
//! without a catalog match are dropped, but never silently: each miss
//! is logged and counted.

use model::{
    catalog::{CatalogSnapshot, LinkCategory, StationLink},
    feed::EvseDataRecord,
    id::Id,
    station::Station,
};

use crate::operators::StationRecord;

/// Join rows per category, in the fixed [`LinkCategory::ALL`] order,
/// plus the number of option names that had no catalog entry.
#[derive(Debug, Clone, Default)]
pub struct LinkResolution {
    pub links: Vec<(LinkCategory, Vec<StationLink>)>,
    pub unresolved: usize,
}

pub fn resolve_links(
    stations: &[StationRecord],
    catalogs: &CatalogSnapshot,
) -> LinkResolution {
    let mut resolution = LinkResolution::default();

    for category in LinkCategory::ALL {
        let mut rows = Vec::new();
        for station in stations {
            resolve_category(
                category,
                station,
                catalogs,
                &mut rows,
                &mut resolution.unresolved,
            );
        }
        resolution.links.push((category, rows));
    }

    resolution
}

fn resolve_category(
    category: LinkCategory,
    station: &StationRecord,
    catalogs: &CatalogSnapshot,
    rows: &mut Vec<StationLink>,
    unresolved: &mut usize,
) {
    let evse = &station.evse;
    let evse_id = Id::<Station>::new(evse.evse_id.clone());

    if category == LinkCategory::ChargingFacility {
        for option in &evse.charging_facilities {
            match catalogs.charging_facility_id(&option.name, option.power) {
                Some(id) => rows.push(StationLink::new(evse_id.clone(), id)),
                None => {
                    log::warn!(
                        "unresolved charging facility at {}: {:?} / {:?}",
                        evse.evse_id,
                        option.name,
                        option.power
                    );
                    *unresolved += 1;
                }
            }
        }
        return;
    }

    let names = match category {
        LinkCategory::Plug => &evse.plugs,
        LinkCategory::ChargingMode => &evse.charging_modes,
        LinkCategory::AuthenticationMode => &evse.authentication_modes,
        LinkCategory::PaymentOption => &evse.payment_options,
        LinkCategory::ValueAddedService => &evse.value_added_services,
        LinkCategory::ChargingFacility => unreachable!(),
    };

    for name in names {
        match catalogs.resolve(category, name) {
            Some(id) => rows.push(StationLink::new(evse_id.clone(), id)),
            None => {
                log::warn!(
                    "unresolved {} at {}: {:?}",
                    category.name(),
                    evse.evse_id,
                    name
                );
                *unresolved += 1;
            }
        }
    }
}

/// Accessibility lives inline on the station row instead of in a join
/// table, with the same drop-and-count policy on a miss.
pub fn resolve_accessibility(
    evse: &EvseDataRecord,
    catalogs: &CatalogSnapshot,
    unresolved: &mut usize,
) -> Option<i32> {
    let name = evse.accessibility.as_deref()?;
    match catalogs.accessibility_id(name) {
        Some(id) => Some(id),
        None => {
            log::warn!("unresolved accessibility at {}: {:?}", evse.evse_id, name);
            *unresolved += 1;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use model::{
        catalog::{CatalogEntry, Catalogs, ChargingFacilityEntry},
        feed::ChargingFacilityOption,
    };

    use super::*;

    fn snapshot() -> CatalogSnapshot {
        Catalogs {
            accessibility: vec![CatalogEntry {
                id: 1,
                name: "Free publicly accessible".to_owned(),
            }],
            plugs: vec![
                CatalogEntry { id: 10, name: "Type 2 Outlet".to_owned() },
                CatalogEntry { id: 11, name: "CHAdeMO".to_owned() },
            ],
            charging_facilities: vec![ChargingFacilityEntry {
                id: 20,
                name: "380 - 480V, 3-Phase".to_owned(),
                power: Some(22),
            }],
            charging_modes: vec![CatalogEntry { id: 30, name: "Mode_3".to_owned() }],
            authentication_modes: vec![CatalogEntry {
                id: 40,
                name: "NFC RFID Classic".to_owned(),
            }],
            payment_options: vec![CatalogEntry {
                id: 50,
                name: "Contract".to_owned(),
            }],
            value_added_services: vec![CatalogEntry {
                id: 60,
                name: "Reservation".to_owned(),
            }],
        }
        .snapshot()
    }

    fn station(evse: EvseDataRecord) -> StationRecord {
        StationRecord {
            operator_id: "DE*TBA".to_owned(),
            evse,
        }
    }

    fn links_for(
        resolution: &LinkResolution,
        category: LinkCategory,
    ) -> &[StationLink] {
        resolution
            .links
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rows)| rows.as_slice())
            .unwrap()
    }

    #[test]
    fn exact_matches_become_join_rows() {
        let resolution = resolve_links(
            &[station(EvseDataRecord {
                evse_id: "DE*TBA*E1".to_owned(),
                plugs: vec!["Type 2 Outlet".to_owned(), "CHAdeMO".to_owned()],
                charging_modes: vec!["Mode_3".to_owned()],
                ..EvseDataRecord::default()
            })],
            &snapshot(),
        );

        let plugs = links_for(&resolution, LinkCategory::Plug);
        assert_eq!(plugs.len(), 2);
        assert_eq!(plugs[0].catalog_id, 10);
        assert_eq!(plugs[1].catalog_id, 11);
        assert_eq!(links_for(&resolution, LinkCategory::ChargingMode).len(), 1);
        assert_eq!(resolution.unresolved, 0);
    }

    #[test]
    fn unresolved_names_are_dropped_and_counted() {
        let resolution = resolve_links(
            &[station(EvseDataRecord {
                evse_id: "DE*TBA*E1".to_owned(),
                plugs: vec!["Type 2 Outlet".to_owned(), "Unknown Plug".to_owned()],
                ..EvseDataRecord::default()
            })],
            &snapshot(),
        );

        assert_eq!(links_for(&resolution, LinkCategory::Plug).len(), 1);
        assert_eq!(resolution.unresolved, 1);
    }

    #[test]
    fn charging_facilities_match_on_both_attributes() {
        let resolution = resolve_links(
            &[station(EvseDataRecord {
                evse_id: "DE*TBA*E1".to_owned(),
                charging_facilities: vec![
                    ChargingFacilityOption {
                        name: "380 - 480V, 3-Phase".to_owned(),
                        power: Some(22),
                    },
                    // same class, different power: no match
                    ChargingFacilityOption {
                        name: "380 - 480V, 3-Phase".to_owned(),
                        power: Some(43),
                    },
                ],
                ..EvseDataRecord::default()
            })],
            &snapshot(),
        );

        let facilities = links_for(&resolution, LinkCategory::ChargingFacility);
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].catalog_id, 20);
        assert_eq!(resolution.unresolved, 1);
    }

    #[test]
    fn empty_categories_stay_empty() {
        let resolution = resolve_links(
            &[station(EvseDataRecord {
                evse_id: "DE*TBA*E1".to_owned(),
                ..EvseDataRecord::default()
            })],
            &snapshot(),
        );

        for (_, rows) in &resolution.links {
            assert!(rows.is_empty());
        }
    }

    #[test]
    fn accessibility_resolves_inline() {
        let mut unresolved = 0;
        let id = resolve_accessibility(
            &EvseDataRecord {
                evse_id: "DE*TBA*E1".to_owned(),
                accessibility: Some("Free publicly accessible".to_owned()),
                ..EvseDataRecord::default()
            },
            &snapshot(),
            &mut unresolved,
        );
        assert_eq!(id, Some(1));
        assert_eq!(unresolved, 0);

        let id = resolve_accessibility(
            &EvseDataRecord {
                evse_id: "DE*TBA*E1".to_owned(),
                accessibility: Some("Members only".to_owned()),
                ..EvseDataRecord::default()
            },
            &snapshot(),
            &mut unresolved,
        );
        assert_eq!(id, None);
        assert_eq!(unresolved, 1);
    }
}
