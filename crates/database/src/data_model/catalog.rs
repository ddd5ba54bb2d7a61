use model::catalog::{CatalogEntry, ChargingFacilityEntry};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    pub id: i32,
    pub name: String,
}

impl CatalogRow {
    pub fn to_model(self) -> CatalogEntry {
        CatalogEntry {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ChargingFacilityRow {
    pub id: i32,
    pub name: String,
    pub power: Option<i32>,
}

impl ChargingFacilityRow {
    pub fn to_model(self) -> ChargingFacilityEntry {
        ChargingFacilityEntry {
            id: self.id,
            name: self.name,
            power: self.power,
        }
    }
}
