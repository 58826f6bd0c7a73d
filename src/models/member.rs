use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Team;

/// Member model for reading from database
///
/// A member belongs to at most one team; `team_id` is `None` for members
/// registered without one.
#[derive(
    Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq, Eq, Serialize,
)]
#[diesel(table_name = crate::schema::member)]
#[diesel(belongs_to(Team))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
}

/// NewMember model for inserting new records
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::member)]
pub struct NewMember {
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl NewMember {
    /// A member assigned to `team`.
    pub fn new(username: impl Into<String>, age: i32, team: &Team) -> Self {
        Self {
            username: username.into(),
            age,
            team_id: Some(team.id),
        }
    }

    /// A member without a team.
    pub fn without_team(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: username.into(),
            age,
            team_id: None,
        }
    }
}
