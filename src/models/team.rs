use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Team model for reading from database
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = crate::schema::team)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// NewTeam model for inserting new records
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::team)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
