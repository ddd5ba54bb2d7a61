use std::{error, fmt};

use crate::database::DatabaseError;

pub mod catalog;
pub mod database;
pub mod importer;
pub mod languages;
pub mod links;
pub mod localization;
pub mod memory;
pub mod operators;
pub mod stations;

#[derive(Debug)]
pub enum ImportError {
    /// A station identifier no operator-id prefix could be derived
    /// from. Fatal to the station phase.
    MalformedEvseId { evse_id: String },
    Database(DatabaseError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::MalformedEvseId { evse_id } => {
                write!(f, "no operator id derivable from evse id: {}", evse_id)
            }
            ImportError::Database(why) => write!(f, "database error: {:?}", why),
        }
    }
}

impl error::Error for ImportError {}

impl From<DatabaseError> for ImportError {
    fn from(why: DatabaseError) -> Self {
        ImportError::Database(why)
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
