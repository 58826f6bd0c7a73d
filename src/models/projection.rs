//! Read-side projections.
//!
//! These shapes are produced by queries only and are never persisted.

use serde::{Deserialize, Serialize};

/// Raw row selected from `member LEFT JOIN team`.
///
/// Column order: member id, username, age, team id, team name.
pub type MemberTeamRow = (i64, String, i32, Option<i64>, Option<String>);

/// Member joined with its team, flattened for search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    /// Maps a joined row onto the projection.
    pub fn from_row(row: MemberTeamRow) -> Self {
        let (member_id, username, age, team_id, team_name) = row;
        Self {
            member_id,
            username,
            age,
            team_id,
            team_name,
        }
    }
}

impl From<MemberTeamRow> for MemberTeamDto {
    fn from(row: MemberTeamRow) -> Self {
        Self::from_row(row)
    }
}

/// Username and age only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub username: String,
    pub age: i32,
}

impl From<&MemberTeamDto> for MemberDto {
    fn from(dto: &MemberTeamDto) -> Self {
        Self {
            username: dto.username.clone(),
            age: dto.age,
        }
    }
}

/// Aggregate figures over member ages.
///
/// `sum`, `average`, `max` and `min` are `None` when no member matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: i64,
    pub sum: Option<i64>,
    pub average: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

impl AgeSummary {
    /// Computes the summary from a list of ages.
    pub fn from_ages(ages: &[i32]) -> Self {
        if ages.is_empty() {
            return Self {
                count: 0,
                sum: None,
                average: None,
                max: None,
                min: None,
            };
        }

        let sum: i64 = ages.iter().map(|age| i64::from(*age)).sum();
        let count = ages.len() as i64;
        Self {
            count,
            sum: Some(sum),
            average: Some(sum as f64 / count as f64),
            max: ages.iter().copied().max(),
            min: ages.iter().copied().min(),
        }
    }
}

/// Average member age of one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub average_age: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_keeps_column_order() {
        let dto = MemberTeamDto::from_row((7, "member7".to_string(), 33, Some(2), Some("teamB".to_string())));

        assert_eq!(dto.member_id, 7);
        assert_eq!(dto.username, "member7");
        assert_eq!(dto.age, 33);
        assert_eq!(dto.team_id, Some(2));
        assert_eq!(dto.team_name.as_deref(), Some("teamB"));
    }

    #[test]
    fn test_member_dto_from_projection() {
        let dto = MemberTeamDto::from_row((1, "member1".to_string(), 10, None, None));
        let member = MemberDto::from(&dto);

        assert_eq!(member, MemberDto { username: "member1".to_string(), age: 10 });
    }

    #[test]
    fn test_age_summary() {
        let summary = AgeSummary::from_ages(&[10, 20, 30, 40]);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.sum, Some(100));
        assert_eq!(summary.average, Some(25.0));
        assert_eq!(summary.max, Some(40));
        assert_eq!(summary.min, Some(10));
    }

    #[test]
    fn test_age_summary_empty() {
        let summary = AgeSummary::from_ages(&[]);

        assert_eq!(summary.count, 0);
        assert!(summary.sum.is_none());
        assert!(summary.average.is_none());
    }
}
