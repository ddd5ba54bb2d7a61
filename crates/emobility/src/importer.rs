//! Orchestrates one full import run. All derivation happens up front on
//! the in-memory feed; each phase is then an explicit ordered list of
//! write operations applied inside a single transaction. Sub-operators
//! are written before the stations referencing them, stations before
//! the translation and join rows referencing those.

use model::{
    catalog::{CatalogSnapshot, LinkCategory, StationLink},
    feed::FeedOperator,
    operator::Operator,
    station::Station,
    translation::StationTranslation,
};
use serde::Serialize;

use crate::{
    database::{Database, DatabaseOperations, DatabaseTransaction, Result},
    languages::CountryLanguages,
    links, localization, operators, stations, ImportResult,
};

/// One write against the destination store. A phase is a plain ordered
/// list of these, so ordering and atomicity live in [`apply`] and the
/// enclosing transaction rather than in the planning code.
#[derive(Debug, Clone)]
pub enum WriteOp {
    ClearOperators,
    PutOperators(Vec<Operator>),
    ClearStations,
    PutStations(Vec<Station>),
    ClearTranslations,
    PutTranslations(Vec<StationTranslation>),
    ClearLinks(LinkCategory),
    PutLinks(LinkCategory, Vec<StationLink>),
}

/// Applies a phase plan in order. The caller owns the transaction and
/// decides whether to commit.
pub async fn apply<T>(tx: &mut T, plan: Vec<WriteOp>) -> Result<()>
where
    T: DatabaseOperations + Send,
{
    for op in plan {
        match op {
            WriteOp::ClearOperators => tx.clear_operators().await?,
            WriteOp::PutOperators(rows) => tx.put_operators(&rows).await?,
            WriteOp::ClearStations => tx.clear_stations().await?,
            WriteOp::PutStations(rows) => tx.put_stations(&rows).await?,
            WriteOp::ClearTranslations => tx.clear_translations().await?,
            WriteOp::PutTranslations(rows) => tx.put_translations(&rows).await?,
            WriteOp::ClearLinks(category) => tx.clear_links(category).await?,
            WriteOp::PutLinks(category, rows) => {
                tx.put_links(category, &rows).await?
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub operators: usize,
    pub derived_operators: usize,
    pub stations: usize,
    pub translations: usize,
    pub plug_links: usize,
    pub charging_facility_links: usize,
    pub charging_mode_links: usize,
    pub authentication_mode_links: usize,
    pub payment_option_links: usize,
    pub value_added_service_links: usize,
    pub unresolved_options: usize,
}

impl ImportReport {
    fn count_links(&mut self, category: LinkCategory, count: usize) {
        match category {
            LinkCategory::Plug => self.plug_links = count,
            LinkCategory::ChargingFacility => self.charging_facility_links = count,
            LinkCategory::ChargingMode => self.charging_mode_links = count,
            LinkCategory::AuthenticationMode => {
                self.authentication_mode_links = count
            }
            LinkCategory::PaymentOption => self.payment_option_links = count,
            LinkCategory::ValueAddedService => {
                self.value_added_service_links = count
            }
        }
    }

    fn log(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(rendered) => log::info!("import report: {}", rendered),
            Err(why) => log::warn!("could not render import report: {}", why),
        }
    }
}

fn operator_phase_plan(top_level: Vec<Operator>) -> Vec<WriteOp> {
    vec![WriteOp::ClearOperators, WriteOp::PutOperators(top_level)]
}

fn station_phase_plan(
    resolution: &operators::Resolution,
    catalogs: &CatalogSnapshot,
    languages: &dyn CountryLanguages,
    report: &mut ImportReport,
) -> Vec<WriteOp> {
    let mut unresolved = 0;
    let station_rows: Vec<Station> = resolution
        .stations
        .iter()
        .map(|station| stations::flatten(station, catalogs, &mut unresolved))
        .collect();
    let translations =
        localization::extract_translations(&resolution.stations, languages);
    let link_resolution = links::resolve_links(&resolution.stations, catalogs);

    report.derived_operators = resolution.derived.len();
    report.stations = station_rows.len();
    report.translations = translations.len();
    report.unresolved_options = unresolved + link_resolution.unresolved;

    // clear the previous generation first, then rebuild in reference
    // order
    let mut plan = vec![WriteOp::ClearStations, WriteOp::ClearTranslations];
    for category in LinkCategory::ALL {
        plan.push(WriteOp::ClearLinks(category));
    }
    if !resolution.derived.is_empty() {
        plan.push(WriteOp::PutOperators(resolution.derived.clone()));
    }
    if !station_rows.is_empty() {
        plan.push(WriteOp::PutStations(station_rows));
    }
    if !translations.is_empty() {
        plan.push(WriteOp::PutTranslations(translations));
    }
    for (category, rows) in link_resolution.links {
        report.count_links(category, rows.len());
        // categories without a single resolved row issue no write
        if !rows.is_empty() {
            plan.push(WriteOp::PutLinks(category, rows));
        }
    }
    plan
}

/// Runs one full clear-and-replace import of the feed.
///
/// The operator phase replaces the declared top-level operators and
/// commits on its own. The station phase derives sub-operators,
/// flattens stations and extracts translation and join rows, then
/// writes everything in a single transaction; on any error that
/// transaction rolls back as a whole and the operator phase stays
/// committed.
pub async fn import<D: Database>(
    database: &D,
    languages: &dyn CountryLanguages,
    catalogs: &CatalogSnapshot,
    feed: &[FeedOperator],
) -> ImportResult<ImportReport> {
    let mut report = ImportReport::default();

    // operator phase
    let top_level: Vec<Operator> = feed
        .iter()
        .map(|operator| {
            Operator::top_level(
                operator.operator_id.clone(),
                operator.operator_name.clone(),
            )
        })
        .collect();
    report.operators = top_level.len();
    log::info!("replacing {} top-level operators", report.operators);
    let mut tx = database.transaction().await?;
    apply(&mut tx, operator_phase_plan(top_level)).await?;
    tx.commit().await?;

    // station phase
    let resolution = operators::resolve(feed)?;
    let plan = station_phase_plan(&resolution, catalogs, languages, &mut report);
    log::info!(
        "replacing station generation: {} stations, {} write operations",
        report.stations,
        plan.len()
    );
    let mut tx = database.transaction().await?;
    apply(&mut tx, plan).await?;
    tx.commit().await?;

    report.log();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use model::{
        catalog::{CatalogEntry, Catalogs, ChargingFacilityEntry},
        feed::{ChargingFacilityOption, EvseDataRecord},
    };

    use crate::{languages::IsoLanguageTable, memory::MemoryDatabase, ImportError};

    use super::*;

    fn catalogs() -> Catalogs {
        Catalogs {
            accessibility: vec![CatalogEntry {
                id: 1,
                name: "Free publicly accessible".to_owned(),
            }],
            plugs: vec![CatalogEntry { id: 10, name: "Type 2 Outlet".to_owned() }],
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
    }

    fn feed() -> Vec<FeedOperator> {
        vec![FeedOperator {
            operator_id: "DE*TBA".to_owned(),
            operator_name: Some("Testbetreiber A".to_owned()),
            evse_data_records: vec![
                EvseDataRecord {
                    evse_id: "DE*TBA*E1234".to_owned(),
                    charging_station_name: Some("StationName-DE".to_owned()),
                    en_charging_station_name: Some("StationName-EN".to_owned()),
                    additional_info: Some(
                        "DEU:Inhalt|||GBR:Content|||FRA:Objet|||".to_owned(),
                    ),
                    accessibility: Some("Free publicly accessible".to_owned()),
                    plugs: vec!["Type 2 Outlet".to_owned()],
                    charging_facilities: vec![ChargingFacilityOption {
                        name: "380 - 480V, 3-Phase".to_owned(),
                        power: Some(22),
                    }],
                    charging_modes: vec!["Mode_3".to_owned()],
                    authentication_modes: vec!["NFC RFID Classic".to_owned()],
                    ..EvseDataRecord::default()
                },
                EvseDataRecord {
                    evse_id: "DE*TBB*E5678".to_owned(),
                    charging_station_name: Some("Nebenstelle".to_owned()),
                    plugs: vec!["Type 2 Outlet".to_owned()],
                    ..EvseDataRecord::default()
                },
            ],
        }]
    }

    async fn snapshot_of(database: &MemoryDatabase) -> CatalogSnapshot {
        use crate::catalog::CatalogSource as _;
        database.load_catalogs().await.unwrap().snapshot()
    }

    #[tokio::test]
    async fn full_run_regenerates_every_table() {
        let database = MemoryDatabase::with_catalogs(catalogs());
        let snapshot = snapshot_of(&database).await;

        let report = import(&database, &IsoLanguageTable, &snapshot, &feed())
            .await
            .unwrap();

        assert_eq!(report.operators, 1);
        assert_eq!(report.derived_operators, 1);
        assert_eq!(report.stations, 2);
        // 3 scanned rows plus the native backfill of the second station
        assert_eq!(report.translations, 4);
        assert_eq!(report.plug_links, 2);
        assert_eq!(report.charging_facility_links, 1);
        assert_eq!(report.payment_option_links, 0);
        assert_eq!(report.unresolved_options, 0);

        let operators = database.operators();
        assert_eq!(operators.len(), 2);
        assert_eq!(operators[1].id.raw(), "DE*TBB");
        assert_eq!(
            operators[1].parent_id.as_ref().map(|id| id.raw()),
            Some("DE*TBA".to_owned())
        );

        // every station references an operator from this run
        let stations = database.stations();
        for station in &stations {
            assert!(operators
                .iter()
                .any(|operator| operator.id == station.operator_id));
        }
        assert_eq!(stations[1].operator_id.raw(), "DE*TBB");
        assert_eq!(stations[0].accessibility_id, Some(1));

        // every translation and join row references a station
        for translation in database.translations() {
            assert!(stations
                .iter()
                .any(|station| station.evse_id == translation.evse_id));
        }
        for link in database.links(LinkCategory::Plug) {
            assert!(stations
                .iter()
                .any(|station| station.evse_id == link.evse_id));
        }
    }

    #[tokio::test]
    async fn each_phase_commits_exactly_once() {
        let database = MemoryDatabase::with_catalogs(catalogs());
        let snapshot = snapshot_of(&database).await;

        import(&database, &IsoLanguageTable, &snapshot, &feed())
            .await
            .unwrap();

        let journal = database.journal();
        let commits = journal.iter().filter(|op| *op == "commit").count();
        assert_eq!(commits, 2);
        // no write precedes the operator phase or follows the station
        // phase commit
        assert_eq!(journal.first().map(String::as_str), Some("clear_operators"));
        assert_eq!(journal.last().map(String::as_str), Some("commit"));
    }

    #[tokio::test]
    async fn empty_categories_issue_no_write() {
        let database = MemoryDatabase::with_catalogs(catalogs());
        let snapshot = snapshot_of(&database).await;

        import(&database, &IsoLanguageTable, &snapshot, &feed())
            .await
            .unwrap();

        let journal = database.journal();
        assert!(journal.contains(&"put_links:plug".to_owned()));
        assert!(!journal.contains(&"put_links:payment option".to_owned()));
        assert!(!journal.contains(&"put_links:value added service".to_owned()));
        // clears still run for every category
        assert!(journal.contains(&"clear_links:payment option".to_owned()));
    }

    #[tokio::test]
    async fn mid_phase_failure_rolls_the_station_phase_back() {
        let database = MemoryDatabase::with_catalogs(catalogs());
        let snapshot = snapshot_of(&database).await;
        import(&database, &IsoLanguageTable, &snapshot, &feed())
            .await
            .unwrap();
        let stations_before = database.stations();
        let translations_before = database.translations();
        let links_before = database.links(LinkCategory::Plug);

        database.fail_on("put_translations");
        let mut changed = feed();
        changed[0].operator_name = Some("Testbetreiber A2".to_owned());
        changed[0].evse_data_records.truncate(1);
        let why = import(&database, &IsoLanguageTable, &snapshot, &changed)
            .await
            .unwrap_err();
        assert!(matches!(why, ImportError::Database(_)));

        // station-derived tables are untouched despite the clears that
        // ran inside the aborted transaction
        assert_eq!(database.stations(), stations_before);
        assert_eq!(database.translations(), translations_before);
        assert_eq!(database.links(LinkCategory::Plug), links_before);

        // the operator phase committed on its own and is not re-run
        let operators = database.operators();
        assert_eq!(
            operators[0].name.as_deref(),
            Some("Testbetreiber A2")
        );
    }

    #[tokio::test]
    async fn malformed_evse_id_aborts_before_any_station_write() {
        let database = MemoryDatabase::with_catalogs(catalogs());
        let snapshot = snapshot_of(&database).await;
        import(&database, &IsoLanguageTable, &snapshot, &feed())
            .await
            .unwrap();
        let stations_before = database.stations();

        let mut changed = feed();
        changed[0].evse_data_records[0].evse_id = "???".to_owned();
        let why = import(&database, &IsoLanguageTable, &snapshot, &changed)
            .await
            .unwrap_err();
        assert!(matches!(why, ImportError::MalformedEvseId { .. }));
        assert_eq!(database.stations(), stations_before);
    }
}
