//! In-memory implementation of the destination store, used by the
//! orchestrator tests. A transaction stages a full copy of the tables
//! and swaps it in on commit; dropping it discards the copy. Every
//! issued operation is recorded in a journal, and a single operation
//! can be armed to fail.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use model::{
    catalog::{Catalogs, LinkCategory, StationLink},
    operator::Operator,
    station::Station,
    translation::StationTranslation,
};

use crate::{
    catalog::CatalogSource,
    database::{
        Database, DatabaseError, DatabaseOperations, DatabaseTransaction, Result,
    },
};

#[derive(Debug, Clone, Default)]
struct Tables {
    operators: HashMap<String, Operator>,
    stations: HashMap<String, Station>,
    translations: HashMap<(String, String), StationTranslation>,
    links: HashMap<LinkCategory, HashMap<(String, i32), StationLink>>,
}

impl Tables {
    fn put_operators(&mut self, operators: &[Operator]) {
        for operator in operators {
            self.operators.insert(operator.id.raw(), operator.clone());
        }
    }

    fn put_stations(&mut self, stations: &[Station]) {
        for station in stations {
            self.stations.insert(station.evse_id.raw(), station.clone());
        }
    }

    fn put_translations(&mut self, translations: &[StationTranslation]) {
        for translation in translations {
            self.translations.insert(
                (translation.evse_id.raw(), translation.language.clone()),
                translation.clone(),
            );
        }
    }

    fn put_links(&mut self, category: LinkCategory, links: &[StationLink]) {
        let table = self.links.entry(category).or_default();
        for link in links {
            table.insert((link.evse_id.raw(), link.catalog_id), link.clone());
        }
    }
}

#[derive(Debug, Default)]
struct State {
    tables: Tables,
    journal: Vec<String>,
    fail_on: Option<String>,
    catalogs: Catalogs,
}

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<State>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalogs(catalogs: Catalogs) -> Self {
        let database = Self::new();
        database.inner.lock().unwrap().catalogs = catalogs;
        database
    }

    /// Arms a single operation label (e.g. `"put_translations"`) to
    /// fail on every call until disarmed.
    pub fn fail_on<S: Into<String>>(&self, operation: S) {
        self.inner.lock().unwrap().fail_on = Some(operation.into());
    }

    /// All operation labels issued so far, committed or not.
    pub fn journal(&self) -> Vec<String> {
        self.inner.lock().unwrap().journal.clone()
    }

    pub fn operators(&self) -> Vec<Operator> {
        let mut rows: Vec<_> = self
            .inner
            .lock()
            .unwrap()
            .tables
            .operators
            .values()
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.id.raw().cmp(&b.id.raw()));
        rows
    }

    pub fn stations(&self) -> Vec<Station> {
        let mut rows: Vec<_> = self
            .inner
            .lock()
            .unwrap()
            .tables
            .stations
            .values()
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.evse_id.raw().cmp(&b.evse_id.raw()));
        rows
    }

    pub fn translations(&self) -> Vec<StationTranslation> {
        let mut rows: Vec<_> = self
            .inner
            .lock()
            .unwrap()
            .tables
            .translations
            .values()
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.evse_id.raw(), &a.language).cmp(&(b.evse_id.raw(), &b.language))
        });
        rows
    }

    pub fn links(&self, category: LinkCategory) -> Vec<StationLink> {
        let mut rows: Vec<_> = self
            .inner
            .lock()
            .unwrap()
            .tables
            .links
            .get(&category)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| {
            (a.evse_id.raw(), a.catalog_id).cmp(&(b.evse_id.raw(), b.catalog_id))
        });
        rows
    }

    fn record(&self, operation: &str) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        state.journal.push(operation.to_owned());
        if state.fail_on.as_deref() == Some(operation) {
            return Err(DatabaseError::Other(
                format!("injected failure at {}", operation).into(),
            ));
        }
        Ok(())
    }

    fn snapshot_tables(&self) -> Tables {
        self.inner.lock().unwrap().tables.clone()
    }
}

#[async_trait]
impl CatalogSource for MemoryDatabase {
    async fn load_catalogs(&self) -> Result<Catalogs> {
        Ok(self.inner.lock().unwrap().catalogs.clone())
    }
}

pub struct MemoryTransaction {
    database: MemoryDatabase,
    staging: Tables,
}

#[async_trait]
impl Database for MemoryDatabase {
    type Transaction = MemoryTransaction;

    const BULK_INSERT_MAX: usize = 1024;

    async fn transaction(&self) -> Result<Self::Transaction> {
        Ok(MemoryTransaction {
            staging: self.snapshot_tables(),
            database: self.clone(),
        })
    }
}

#[async_trait]
impl DatabaseTransaction for MemoryTransaction {
    async fn commit(self) -> Result<()> {
        self.database.record("commit")?;
        self.database.inner.lock().unwrap().tables = self.staging;
        Ok(())
    }
}

#[async_trait]
impl DatabaseOperations for MemoryTransaction {
    async fn clear_operators(&mut self) -> Result<()> {
        self.database.record("clear_operators")?;
        self.staging.operators.clear();
        Ok(())
    }

    async fn put_operators(&mut self, operators: &[Operator]) -> Result<()> {
        self.database.record("put_operators")?;
        self.staging.put_operators(operators);
        Ok(())
    }

    async fn clear_stations(&mut self) -> Result<()> {
        self.database.record("clear_stations")?;
        self.staging.stations.clear();
        Ok(())
    }

    async fn put_stations(&mut self, stations: &[Station]) -> Result<()> {
        self.database.record("put_stations")?;
        self.staging.put_stations(stations);
        Ok(())
    }

    async fn clear_translations(&mut self) -> Result<()> {
        self.database.record("clear_translations")?;
        self.staging.translations.clear();
        Ok(())
    }

    async fn put_translations(
        &mut self,
        translations: &[StationTranslation],
    ) -> Result<()> {
        self.database.record("put_translations")?;
        self.staging.put_translations(translations);
        Ok(())
    }

    async fn clear_links(&mut self, category: LinkCategory) -> Result<()> {
        self.database
            .record(&format!("clear_links:{}", category.name()))?;
        self.staging.links.remove(&category);
        Ok(())
    }

    async fn put_links(
        &mut self,
        category: LinkCategory,
        links: &[StationLink],
    ) -> Result<()> {
        self.database
            .record(&format!("put_links:{}", category.name()))?;
        self.staging.put_links(category, links);
        Ok(())
    }
}
