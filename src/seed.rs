//! Fixture data: two teams with two members each.

use crate::error::AppResult;
use crate::models::{Member, NewMember, NewTeam, Team};
use crate::repositories::MemberStore;

/// Rows created by [`seed_fixture`].
#[derive(Debug, Clone)]
pub struct Fixture {
    pub teams: Vec<Team>,
    pub members: Vec<Member>,
}

/// Inserts teamA (member1 age 10, member2 age 20) and teamB (member3 age 30,
/// member4 age 40).
pub async fn seed_fixture(store: &dyn MemberStore) -> AppResult<Fixture> {
    let team_a = store.insert_team(NewTeam::new("teamA")).await?;
    let team_b = store.insert_team(NewTeam::new("teamB")).await?;

    let mut members = Vec::with_capacity(4);
    for (username, age, team) in [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ] {
        members.push(store.insert_member(NewMember::new(username, age, team)).await?);
    }

    tracing::info!(teams = 2, members = members.len(), "fixture seeded");
    Ok(Fixture {
        teams: vec![team_a, team_b],
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MemberFilter;
    use crate::repositories::InMemoryMemberStore;

    #[tokio::test]
    async fn test_seed_fixture() {
        let store = InMemoryMemberStore::new();

        let fixture = seed_fixture(&store).await.unwrap();

        assert_eq!(fixture.teams.len(), 2);
        assert_eq!(fixture.members.len(), 4);
        assert_eq!(fixture.members[2].team_id, Some(fixture.teams[1].id));
        assert_eq!(store.count(&MemberFilter::all()).await.unwrap(), 4);
    }
}
