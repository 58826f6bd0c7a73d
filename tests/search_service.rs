use std::sync::Arc;

use member_search::models::{NewMember, NewTeam};
use member_search::repositories::{InMemoryMemberStore, MemberStore};
use member_search::seed::seed_fixture;
use member_search::{AppError, CountStrategy, MemberSearchCondition, MemberSearchService, PageRequest};
use proptest::prelude::*;

async fn seeded_service() -> MemberSearchService {
    let store = Arc::new(InMemoryMemberStore::new());
    seed_fixture(store.as_ref()).await.unwrap();
    MemberSearchService::new(store)
}

fn usernames<'a>(rows: impl IntoIterator<Item = &'a member_search::models::MemberTeamDto>) -> Vec<String> {
    rows.into_iter().map(|row| row.username.clone()).collect()
}

#[tokio::test]
async fn fixture_search_by_team_and_age() {
    let service = seeded_service().await;
    let condition = MemberSearchCondition::new()
        .with_team_name("teamB")
        .with_age_goe(35);

    let rows = service.search(&condition).await.unwrap();

    assert_eq!(usernames(&rows), ["member4"]);
    assert_eq!(rows[0].age, 40);
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
}

#[tokio::test]
async fn fixture_pages_walk_every_member_once() {
    let service = seeded_service().await;
    let condition = MemberSearchCondition::new();
    let mut seen = Vec::new();

    for index in 0..3 {
        let page = PageRequest::of_page(index, 2).unwrap();
        let result = service.search_page_simple(&condition, page).await.unwrap();
        assert_eq!(result.total_count(), 4);
        seen.extend(usernames(result.content()));
    }

    assert_eq!(seen, ["member1", "member2", "member3", "member4"]);
}

#[tokio::test]
async fn teamless_member_is_visible_without_team_filter() {
    let store = Arc::new(InMemoryMemberStore::new());
    seed_fixture(store.as_ref()).await.unwrap();
    store
        .insert_member(NewMember::without_team("loner", 25))
        .await
        .unwrap();
    let service = MemberSearchService::new(store);

    let all = service
        .search(&MemberSearchCondition::new().with_age_goe(25))
        .await
        .unwrap();
    let in_team_a = service
        .search(&MemberSearchCondition::new().with_team_name("teamA"))
        .await
        .unwrap();

    assert_eq!(usernames(&all), ["member3", "member4", "loner"]);
    assert_eq!(all[2].team_id, None);
    assert_eq!(usernames(&in_team_a), ["member1", "member2"]);
}

#[tokio::test]
async fn negative_page_is_rejected() {
    let service = seeded_service().await;

    assert!(matches!(
        PageRequest::new(-1, 10),
        Err(AppError::InvalidPageRequest { .. })
    ));
    assert!(matches!(
        PageRequest::of_page(0, -5),
        Err(AppError::InvalidPageRequest { .. })
    ));
    assert_eq!(service.count_custom().await.unwrap(), 4);
}

#[derive(Debug, Clone)]
struct Row {
    username: String,
    age: i32,
    team: Option<usize>,
}

fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            prop_oneof![Just("alpha"), Just("beta"), Just("gamma")],
            0i32..60,
            prop::option::of(0usize..2),
        )
            .prop_map(|(username, age, team)| Row {
                username: username.to_string(),
                age,
                team,
            }),
        0..25,
    )
}

fn arb_condition() -> impl Strategy<Value = MemberSearchCondition> {
    (
        prop::option::of(prop_oneof![Just("alpha"), Just("beta")]),
        prop::option::of(prop_oneof![Just("teamA"), Just("teamB")]),
        prop::option::of(0i32..60),
        prop::option::of(0i32..60),
    )
        .prop_map(|(username, team_name, goe, loe)| {
            let mut condition = MemberSearchCondition::new();
            if let Some(username) = username {
                condition = condition.with_username(username);
            }
            if let Some(team_name) = team_name {
                condition = condition.with_team_name(team_name);
            }
            if let Some(age) = goe {
                condition = condition.with_age_goe(age);
            }
            if let Some(age) = loe {
                condition = condition.with_age_loe(age);
            }
            condition
        })
}

const TEAM_NAMES: [&str; 2] = ["teamA", "teamB"];

/// Evaluates `condition` against a generated row without going through a store.
fn satisfies(row: &Row, condition: &MemberSearchCondition) -> bool {
    let team_name = row.team.map(|index| TEAM_NAMES[index]);
    condition.username().is_none_or(|username| row.username == username)
        && condition.team_name().is_none_or(|name| team_name == Some(name))
        && condition.age_goe().is_none_or(|age| row.age >= age)
        && condition.age_loe().is_none_or(|age| row.age <= age)
}

async fn service_with(rows: &[Row]) -> MemberSearchService {
    let store = Arc::new(InMemoryMemberStore::new());
    let teams = [
        store.insert_team(NewTeam::new(TEAM_NAMES[0])).await.unwrap(),
        store.insert_team(NewTeam::new(TEAM_NAMES[1])).await.unwrap(),
    ];
    for row in rows {
        let member = match row.team {
            Some(index) => NewMember::new(row.username.as_str(), row.age, &teams[index]),
            None => NewMember::without_team(row.username.as_str(), row.age),
        };
        store.insert_member(member).await.unwrap();
    }
    MemberSearchService::new(store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pages_agree_with_unpaged_search(
        rows in arb_rows(),
        condition in arb_condition(),
        index in 0i64..4,
        size in 0i64..6,
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let service = service_with(&rows).await;
            let page = PageRequest::of_page(index, size).unwrap();

            let all = service.search(&condition).await.unwrap();
            let simple = service.search_page(&condition, page, CountStrategy::Simple).await.unwrap();
            let complex = service.search_page(&condition, page, CountStrategy::Complex).await.unwrap();

            let start = (page.offset() as usize).min(all.len());
            let end = (start + page.limit() as usize).min(all.len());

            prop_assert!(simple.len() as i64 <= page.limit());
            prop_assert_eq!(simple.content(), &all[start..end]);
            prop_assert_eq!(simple.total_count(), all.len() as i64);
            prop_assert_eq!(complex.content(), simple.content());
            prop_assert_eq!(complex.total_count(), simple.total_count());

            for row in &all {
                if let Some(username) = condition.username() {
                    prop_assert_eq!(row.username.as_str(), username);
                }
                if let Some(team_name) = condition.team_name() {
                    prop_assert_eq!(row.team_name.as_deref(), Some(team_name));
                }
                if let Some(age) = condition.age_goe() {
                    prop_assert!(row.age >= age);
                }
                if let Some(age) = condition.age_loe() {
                    prop_assert!(row.age <= age);
                }
            }

            let expected: Vec<String> = rows
                .iter()
                .filter(|row| satisfies(row, &condition))
                .map(|row| row.username.clone())
                .collect();
            prop_assert_eq!(usernames(&all), expected);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
