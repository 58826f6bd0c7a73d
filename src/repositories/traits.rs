//! MemberStore trait definition.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{AgeSummary, Member, MemberTeamDto, NewMember, NewTeam, Team, TeamAgeAverage};
use crate::query::{MemberFilter, PageRequest};

/// Query-execution boundary for members and their teams.
///
/// Every read runs against `member LEFT JOIN team`, so a member without a team
/// is still visible (with empty team fields) unless a team clause excludes it.
/// Rows come back ordered by member id ascending; implementations must keep
/// that order so that consecutive pages and repeated calls line up.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Inserts a team and returns it with its generated id.
    async fn insert_team(&self, team: NewTeam) -> AppResult<Team>;

    /// Inserts a member and returns it with its generated id.
    async fn insert_member(&self, member: NewMember) -> AppResult<Member>;

    /// Loads projected rows matching `filter`, optionally sliced by `page`.
    async fn fetch(
        &self,
        filter: &MemberFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<MemberTeamDto>>;

    /// Counts rows matching `filter`, ignoring any paging.
    async fn count(&self, filter: &MemberFilter) -> AppResult<i64>;

    /// Sets the username of every matching member. Returns the affected rows.
    async fn update_username(&self, filter: &MemberFilter, username: &str) -> AppResult<usize>;

    /// Adds `delta` to the age of every matching member. Returns the affected rows.
    async fn add_age(&self, filter: &MemberFilter, delta: i32) -> AppResult<usize>;

    /// Deletes every matching member. Returns the affected rows.
    async fn delete(&self, filter: &MemberFilter) -> AppResult<usize>;

    /// Count, sum, average, max and min of the ages of matching members.
    async fn age_summary(&self, filter: &MemberFilter) -> AppResult<AgeSummary>;

    /// Average age per team name, ordered by team name. Members without a team
    /// are not included.
    async fn team_age_averages(&self) -> AppResult<Vec<TeamAgeAverage>>;
}
