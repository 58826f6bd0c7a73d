//! Search conditions and their translation into filters.

use serde::{Deserialize, Serialize};

use crate::query::filter::{Clause, MemberFilter};

/// Optional search fields for the member/team search.
///
/// Every field is optional; a condition with nothing set matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSearchCondition {
    username: Option<String>,
    team_name: Option<String>,
    age_goe: Option<i32>,
    age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.team_name.is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }

    /// Composes the filter for this condition.
    pub fn to_filter(&self) -> MemberFilter {
        compose(self)
    }
}

/// Turns a search condition into a filter.
///
/// Clauses are applied in field order (username, team name, lower age bound,
/// upper age bound). Absent fields add nothing; an empty condition yields
/// [`MemberFilter::all`].
pub fn compose(condition: &MemberSearchCondition) -> MemberFilter {
    MemberFilter::all().and_all([
        username_eq(condition.username()),
        team_name_eq(condition.team_name()),
        age_goe(condition.age_goe()),
        age_loe(condition.age_loe()),
    ])
}

pub fn username_eq(username: Option<&str>) -> Option<Clause> {
    username.map(|username| Clause::UsernameEq(username.to_string()))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Clause> {
    team_name.map(|name| Clause::TeamNameEq(name.to_string()))
}

pub fn age_eq(age: Option<i32>) -> Option<Clause> {
    age.map(Clause::AgeEq)
}

pub fn age_goe(age: Option<i32>) -> Option<Clause> {
    age.map(Clause::AgeGoe)
}

pub fn age_loe(age: Option<i32>) -> Option<Clause> {
    age.map(Clause::AgeLoe)
}

/// Username and exact-age filter.
///
/// Either side may be absent. Each operand is checked before it is combined,
/// so `all_eq(None, Some(10))` is just the age clause and `all_eq(None, None)`
/// matches everything.
pub fn all_eq(username: Option<&str>, age: Option<i32>) -> MemberFilter {
    MemberFilter::all()
        .and(username_eq(username))
        .and(age_eq(age))
}
