//! In-process member store.
//!
//! Evaluates filters with [`MemberFilter::matches`] over a join built on the
//! fly. Enforces the same integrity rules as the PostgreSQL schema (team
//! reference, non-negative age) so callers see the same error variants.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{AgeSummary, Member, MemberTeamDto, NewMember, NewTeam, Team, TeamAgeAverage};
use crate::query::{MemberFilter, PageRequest};
use crate::repositories::MemberStore;

#[derive(Debug, Default)]
struct State {
    teams: BTreeMap<i64, Team>,
    members: BTreeMap<i64, Member>,
    last_team_id: i64,
    last_member_id: i64,
}

impl State {
    /// Left join of members onto teams, in member id order.
    fn joined(&self) -> impl Iterator<Item = MemberTeamDto> + '_ {
        self.members.values().map(|member| {
            let team = member.team_id.and_then(|id| self.teams.get(&id));
            MemberTeamDto {
                member_id: member.id,
                username: member.username.clone(),
                age: member.age,
                team_id: team.map(|team| team.id),
                team_name: team.map(|team| team.name.clone()),
            }
        })
    }

    fn matching_ids(&self, filter: &MemberFilter) -> Vec<i64> {
        self.joined()
            .filter(|row| filter.matches(row))
            .map(|row| row.member_id)
            .collect()
    }
}

/// Member store backed by ordered maps behind a lock.
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    state: RwLock<State>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("member store lock poisoned: {}", e),
        })
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("member store lock poisoned: {}", e),
        })
    }
}

fn check_age(age: i64) -> AppResult<i32> {
    i32::try_from(age)
        .ok()
        .filter(|age| *age >= 0)
        .ok_or_else(|| AppError::Validation {
            field: "age".to_string(),
            reason: "Check constraint failed for member field".to_string(),
        })
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn insert_team(&self, team: NewTeam) -> AppResult<Team> {
        let mut state = self.write()?;
        state.last_team_id += 1;
        let team = Team {
            id: state.last_team_id,
            name: team.name,
        };
        state.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn insert_member(&self, member: NewMember) -> AppResult<Member> {
        let mut state = self.write()?;
        if let Some(team_id) = member.team_id {
            if !state.teams.contains_key(&team_id) {
                return Err(AppError::Validation {
                    field: "team_id".to_string(),
                    reason: format!("Invalid reference from member with value '{}'", team_id),
                });
            }
        }
        let age = check_age(i64::from(member.age))?;

        state.last_member_id += 1;
        let member = Member {
            id: state.last_member_id,
            username: member.username,
            age,
            team_id: member.team_id,
        };
        state.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn fetch(
        &self,
        filter: &MemberFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<MemberTeamDto>> {
        let state = self.read()?;
        let rows = state.joined().filter(|row| filter.matches(row));

        let rows: Vec<MemberTeamDto> = match page {
            Some(page) => rows
                .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
                .collect(),
            None => rows.collect(),
        };
        Ok(rows)
    }

    async fn count(&self, filter: &MemberFilter) -> AppResult<i64> {
        let state = self.read()?;
        Ok(state.joined().filter(|row| filter.matches(row)).count() as i64)
    }

    async fn update_username(&self, filter: &MemberFilter, username: &str) -> AppResult<usize> {
        let mut state = self.write()?;
        let ids = state.matching_ids(filter);
        for id in &ids {
            if let Some(member) = state.members.get_mut(id) {
                member.username = username.to_string();
            }
        }
        Ok(ids.len())
    }

    async fn add_age(&self, filter: &MemberFilter, delta: i32) -> AppResult<usize> {
        let mut state = self.write()?;
        let ids = state.matching_ids(filter);

        // validate every row first so a failing update leaves nothing changed
        let mut updated = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(member) = state.members.get(id) {
                updated.push((*id, check_age(i64::from(member.age) + i64::from(delta))?));
            }
        }
        for (id, age) in updated {
            if let Some(member) = state.members.get_mut(&id) {
                member.age = age;
            }
        }
        Ok(ids.len())
    }

    async fn delete(&self, filter: &MemberFilter) -> AppResult<usize> {
        let mut state = self.write()?;
        let ids = state.matching_ids(filter);
        for id in &ids {
            state.members.remove(id);
        }
        Ok(ids.len())
    }

    async fn age_summary(&self, filter: &MemberFilter) -> AppResult<AgeSummary> {
        let state = self.read()?;
        let ages: Vec<i32> = state
            .joined()
            .filter(|row| filter.matches(row))
            .map(|row| row.age)
            .collect();
        Ok(AgeSummary::from_ages(&ages))
    }

    async fn team_age_averages(&self) -> AppResult<Vec<TeamAgeAverage>> {
        let state = self.read()?;
        let mut groups: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for row in state.joined() {
            if let Some(team_name) = row.team_name {
                let entry = groups.entry(team_name).or_insert((0, 0));
                entry.0 += i64::from(row.age);
                entry.1 += 1;
            }
        }

        Ok(groups
            .into_iter()
            .map(|(team_name, (sum, count))| TeamAgeAverage {
                team_name,
                average_age: sum as f64 / count as f64,
            })
            .collect())
    }
}
