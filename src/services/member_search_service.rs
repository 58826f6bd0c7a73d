//! Member search service.
//!
//! Turns search conditions into filters and runs them through a
//! [`MemberStore`], producing flat lists or pages.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{AgeSummary, MemberTeamDto, TeamAgeAverage};
use crate::query::{CountStrategy, MemberFilter, MemberSearchCondition, Page, PageRequest, all_eq};
use crate::repositories::MemberStore;

/// Search service over members and their teams.
///
/// Holds no state besides the store handle; cloning is cheap and clones can
/// be used from concurrent tasks.
#[derive(Clone)]
pub struct MemberSearchService {
    store: Arc<dyn MemberStore>,
}

impl MemberSearchService {
    /// Creates a new MemberSearchService over the given store.
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// Every member matching `condition`, in member id order.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, condition: &MemberSearchCondition) -> AppResult<Vec<MemberTeamDto>> {
        let filter = condition.to_filter();
        tracing::debug!(filter = %filter, "searching members");
        self.store.fetch(&filter, None).await
    }

    /// One page of matches plus an exact total from a separate count query.
    ///
    /// The count runs even when the page is empty, so requesting a page past
    /// the end still reports the real total.
    ///
    /// # Errors
    /// `InvalidPageRequest` before any query when `page` is out of range;
    /// store failures are returned unchanged
    #[tracing::instrument(skip(self))]
    pub async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> AppResult<Page<MemberTeamDto>> {
        page.ensure_valid()?;
        let filter = condition.to_filter();

        let content = self.store.fetch(&filter, Some(page)).await?;
        let total = self.store.count(&filter).await?;

        Ok(Page::new(content, &page, total))
    }

    /// Like [`search_page_simple`](Self::search_page_simple), but skips the
    /// count query when the first page comes back short: the total is then
    /// the number of rows already fetched.
    ///
    /// # Errors
    /// `InvalidPageRequest` before any query when `page` is out of range;
    /// store failures are returned unchanged
    #[tracing::instrument(skip(self))]
    pub async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> AppResult<Page<MemberTeamDto>> {
        page.ensure_valid()?;
        let filter = condition.to_filter();

        let content = self.store.fetch(&filter, Some(page)).await?;
        let held = content.len() as i64;
        let total = if page.is_first() && held < page.limit() {
            tracing::debug!(total = held, "count query skipped");
            held
        } else {
            self.store.count(&filter).await?
        };

        Ok(Page::new(content, &page, total))
    }

    /// Dispatches to the simple or complex paged search.
    pub async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
        strategy: CountStrategy,
    ) -> AppResult<Page<MemberTeamDto>> {
        match strategy {
            CountStrategy::Simple => self.search_page_simple(condition, page).await,
            CountStrategy::Complex => self.search_page_complex(condition, page).await,
        }
    }

    /// Total number of members.
    pub async fn count_custom(&self) -> AppResult<i64> {
        self.store.count(&MemberFilter::all()).await
    }

    /// Members matching an optional username and an optional exact age.
    #[tracing::instrument(skip(self))]
    pub async fn search_members(
        &self,
        username: Option<&str>,
        age: Option<i32>,
    ) -> AppResult<Vec<MemberTeamDto>> {
        self.store.fetch(&all_eq(username, age), None).await
    }

    /// Renames every member matching `filter`. Returns the affected rows.
    #[tracing::instrument(skip(self, filter), fields(filter = %filter))]
    pub async fn bulk_update_username(&self, filter: &MemberFilter, username: &str) -> AppResult<usize> {
        let affected = self.store.update_username(filter, username).await?;
        tracing::info!(affected, "usernames updated");
        Ok(affected)
    }

    /// Adds `delta` to the age of every member matching `filter`.
    #[tracing::instrument(skip(self, filter), fields(filter = %filter))]
    pub async fn bulk_add_age(&self, filter: &MemberFilter, delta: i32) -> AppResult<usize> {
        let affected = self.store.add_age(filter, delta).await?;
        tracing::info!(affected, "ages updated");
        Ok(affected)
    }

    /// Deletes every member matching `filter`.
    #[tracing::instrument(skip(self, filter), fields(filter = %filter))]
    pub async fn bulk_delete(&self, filter: &MemberFilter) -> AppResult<usize> {
        let affected = self.store.delete(filter).await?;
        tracing::info!(affected, "members deleted");
        Ok(affected)
    }

    pub async fn age_summary(&self, filter: &MemberFilter) -> AppResult<AgeSummary> {
        self.store.age_summary(filter).await
    }

    pub async fn team_age_averages(&self) -> AppResult<Vec<TeamAgeAverage>> {
        self.store.team_age_averages().await
    }
}
