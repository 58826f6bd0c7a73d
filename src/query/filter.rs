//! Filter expressions over the member/team join.
//!
//! A [`MemberFilter`] is a conjunction of [`Clause`]s. It carries no SQL of
//! its own: each store translates the clauses into its native query form
//! (diesel `filter` calls for PostgreSQL, [`MemberFilter::matches`] for the
//! in-memory store).

use std::fmt;

use serde::Serialize;

use crate::models::MemberTeamDto;

/// A single comparison against one column of the joined row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Clause {
    /// `member.username = ?`
    UsernameEq(String),
    /// `team.name = ?`; never matches a member without a team
    TeamNameEq(String),
    /// `member.age = ?`
    AgeEq(i32),
    /// `member.age >= ?`
    AgeGoe(i32),
    /// `member.age <= ?`
    AgeLoe(i32),
    /// `member.age < ?`
    AgeLt(i32),
}

impl Clause {
    /// Evaluates the clause against a projected row.
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        match self {
            Clause::UsernameEq(username) => row.username == *username,
            Clause::TeamNameEq(name) => row.team_name.as_deref() == Some(name.as_str()),
            Clause::AgeEq(age) => row.age == *age,
            Clause::AgeGoe(age) => row.age >= *age,
            Clause::AgeLoe(age) => row.age <= *age,
            Clause::AgeLt(age) => row.age < *age,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::UsernameEq(username) => write!(f, "member.username = '{}'", username),
            Clause::TeamNameEq(name) => write!(f, "team.name = '{}'", name),
            Clause::AgeEq(age) => write!(f, "member.age = {}", age),
            Clause::AgeGoe(age) => write!(f, "member.age >= {}", age),
            Clause::AgeLoe(age) => write!(f, "member.age <= {}", age),
            Clause::AgeLt(age) => write!(f, "member.age < {}", age),
        }
    }
}

/// Conjunction of clauses. The empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MemberFilter {
    clauses: Vec<Clause>,
}

impl MemberFilter {
    /// The empty filter.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter holding exactly one clause.
    pub fn only(clause: Clause) -> Self {
        Self {
            clauses: vec![clause],
        }
    }

    /// ANDs `clause` onto the filter. `None` leaves the filter untouched.
    pub fn and(mut self, clause: Option<Clause>) -> Self {
        if let Some(clause) = clause {
            self.clauses.push(clause);
        }
        self
    }

    /// ANDs every present clause, in iteration order.
    pub fn and_all<I>(self, clauses: I) -> Self
    where
        I: IntoIterator<Item = Option<Clause>>,
    {
        clauses.into_iter().fold(self, MemberFilter::and)
    }

    /// True when no clause was added.
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Evaluates every clause against the row.
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        self.clauses.iter().all(|clause| clause.matches(row))
    }
}

impl FromIterator<Clause> for MemberFilter {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for MemberFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "<all>");
        }
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
