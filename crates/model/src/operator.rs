use serde::{Deserialize, Serialize};

use crate::id::{HasId, Id};

/// A charging-point operator. Top-level operators come straight from the
/// feed; derived sub-operators carry the declaring operator in
/// `parent_id` and no name of their own.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: Id<Operator>,
    pub name: Option<String>,
    pub parent_id: Option<Id<Operator>>,
}

impl HasId for Operator {
    type IdType = String;
}

impl Operator {
    pub fn top_level<S: Into<String>>(id: S, name: Option<String>) -> Self {
        Self {
            id: Id::new(id.into()),
            name,
            parent_id: None,
        }
    }

    pub fn derived<S: Into<String>, P: Into<String>>(id: S, parent: P) -> Self {
        Self {
            id: Id::new(id.into()),
            name: None,
            parent_id: Some(Id::new(parent.into())),
        }
    }
}
