//! PostgreSQL member store using diesel_async.
//!
//! Filters are applied as successive `filter` calls on a boxed
//! `member LEFT JOIN team` query, one per clause, which diesel ANDs together.

use bigdecimal::{BigDecimal, ToPrimitive};
use diesel::dsl::{IntoBoxed, LeftJoin, avg, count_star, max, min, sum};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{
    AgeSummary, Member, MemberTeamDto, MemberTeamRow, NewMember, NewTeam, Team, TeamAgeAverage,
};
use crate::query::{Clause, MemberFilter, PageRequest};
use crate::repositories::MemberStore;
use crate::schema::{member, team};

type MemberTeamQuery<'a> = IntoBoxed<'a, LeftJoin<member::table, team::table>, Pg>;

/// Member store holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct MemberRepository {
    pool: AsyncDbPool,
}

impl MemberRepository {
    /// Creates a new MemberRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Builds the joined query with one `WHERE` term per clause.
    fn filtered(filter: &MemberFilter) -> MemberTeamQuery<'static> {
        let query: MemberTeamQuery<'static> = member::table.left_join(team::table).into_boxed();

        filter
            .clauses()
            .iter()
            .fold(query, |query, clause| match clause {
                Clause::UsernameEq(username) => query.filter(member::username.eq(username.clone())),
                Clause::TeamNameEq(name) => query.filter(team::name.eq(name.clone())),
                Clause::AgeEq(age) => query.filter(member::age.eq(*age)),
                Clause::AgeGoe(age) => query.filter(member::age.ge(*age)),
                Clause::AgeLoe(age) => query.filter(member::age.le(*age)),
                Clause::AgeLt(age) => query.filter(member::age.lt(*age)),
            })
    }

    fn convert(operation: &'static str) -> impl Fn(diesel::result::Error) -> AppError {
        move |e| DatabaseErrorConverter::convert_diesel_error(e, operation)
    }
}

#[async_trait::async_trait]
impl MemberStore for MemberRepository {
    async fn insert_team(&self, new_team: NewTeam) -> AppResult<Team> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::insert_into(team::table)
            .values(&new_team)
            .returning(Team::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Self::convert("insert team"))
    }

    async fn insert_member(&self, new_member: NewMember) -> AppResult<Member> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::insert_into(member::table)
            .values(&new_member)
            .returning(Member::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Self::convert("insert member"))
    }

    async fn fetch(
        &self,
        filter: &MemberFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<MemberTeamDto>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        let mut query = Self::filtered(filter)
            .select((
                member::id,
                member::username,
                member::age,
                team::id.nullable(),
                team::name.nullable(),
            ))
            .order(member::id.asc());
        if let Some(page) = page {
            query = query.offset(page.offset()).limit(page.limit());
        }

        tracing::debug!(filter = %filter, ?page, "fetching members");
        let rows = query
            .load::<MemberTeamRow>(&mut conn)
            .await
            .map_err(Self::convert("fetch members"))?;

        Ok(rows.into_iter().map(MemberTeamDto::from_row).collect())
    }

    async fn count(&self, filter: &MemberFilter) -> AppResult<i64> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        tracing::debug!(filter = %filter, "counting members");
        Self::filtered(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(Self::convert("count members"))
    }

    async fn update_username(&self, filter: &MemberFilter, username: &str) -> AppResult<usize> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;
        let ids = Self::filtered(filter).select(member::id);
        let username = username.to_string();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            async move {
                let ids: Vec<i64> = ids.load(conn).await?;
                diesel::update(member::table.filter(member::id.eq_any(ids)))
                    .set(member::username.eq(username))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(Self::convert("bulk update username"))
    }

    async fn add_age(&self, filter: &MemberFilter, delta: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;
        let ids = Self::filtered(filter).select(member::id);

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            async move {
                let ids: Vec<i64> = ids.load(conn).await?;
                diesel::update(member::table.filter(member::id.eq_any(ids)))
                    .set(member::age.eq(member::age + delta))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(Self::convert("bulk add age"))
    }

    async fn delete(&self, filter: &MemberFilter) -> AppResult<usize> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;
        let ids = Self::filtered(filter).select(member::id);

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            async move {
                let ids: Vec<i64> = ids.load(conn).await?;
                diesel::delete(member::table.filter(member::id.eq_any(ids)))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(Self::convert("bulk delete members"))
    }

    async fn age_summary(&self, filter: &MemberFilter) -> AppResult<AgeSummary> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        let (count, total, average, oldest, youngest) = Self::filtered(filter)
            .select((
                count_star(),
                sum(member::age),
                avg(member::age),
                max(member::age),
                min(member::age),
            ))
            .get_result::<(i64, Option<i64>, Option<BigDecimal>, Option<i32>, Option<i32>)>(
                &mut conn,
            )
            .await
            .map_err(Self::convert("summarize member ages"))?;

        Ok(AgeSummary {
            count,
            sum: total,
            average: average.and_then(|value| value.to_f64()),
            max: oldest,
            min: youngest,
        })
    }

    async fn team_age_averages(&self) -> AppResult<Vec<TeamAgeAverage>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        let rows = member::table
            .inner_join(team::table)
            .group_by(team::name)
            .select((team::name, avg(member::age)))
            .order(team::name.asc())
            .load::<(String, Option<BigDecimal>)>(&mut conn)
            .await
            .map_err(Self::convert("average age by team"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(team_name, average)| {
                average
                    .and_then(|value| value.to_f64())
                    .map(|average_age| TeamAgeAverage {
                        team_name,
                        average_age,
                    })
            })
            .collect())
    }
}
