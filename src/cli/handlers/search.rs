//! Search command handler

use serde::Serialize;

use crate::cli::parser::SearchArgs;
use crate::config::SearchConfig;
use crate::error::{AppError, AppResult};
use crate::models::MemberTeamDto;
use crate::query::{CountStrategy, Page, PageRequest};
use crate::services::MemberSearchService;

/// Paged search output: the page plus derived navigation fields.
#[derive(Debug, Serialize)]
struct PagedOutput {
    #[serde(flatten)]
    page: Page<MemberTeamDto>,
    total_pages: i64,
    has_next: bool,
    count_strategy: CountStrategy,
}

/// Handler for the search command
pub struct SearchCommandHandler {
    service: MemberSearchService,
    config: SearchConfig,
}

impl SearchCommandHandler {
    pub fn new(service: MemberSearchService, config: SearchConfig) -> Self {
        Self { service, config }
    }

    /// Runs the search and renders the result as pretty JSON.
    ///
    /// With `--count none` every match is returned as a JSON array. Otherwise
    /// the output is one page with its total count.
    ///
    /// # Errors
    /// - `Validation` when paging flags are combined with `--count none` or
    ///   the size exceeds `search.max_page_size`
    /// - `InvalidPageRequest` for a negative page or size
    /// - store errors
    pub async fn execute(&self, args: &SearchArgs) -> AppResult<String> {
        let condition = args.condition();
        let strategy = match args.count {
            Some(mode) => mode.strategy(),
            None => Some(self.config.count_strategy),
        };

        let Some(strategy) = strategy else {
            if args.page.is_some() || args.size.is_some() {
                return Err(AppError::Validation {
                    field: "count".to_string(),
                    reason: "--page and --size cannot be used with --count none".to_string(),
                });
            }
            let rows = self.service.search(&condition).await?;
            return render(&rows);
        };

        let page = self.page_request(args)?;
        let page = self.service.search_page(&condition, page, strategy).await?;
        render(&PagedOutput {
            total_pages: page.total_pages(),
            has_next: page.has_next(),
            count_strategy: strategy,
            page,
        })
    }

    fn page_request(&self, args: &SearchArgs) -> AppResult<PageRequest> {
        let size = args.size.unwrap_or(self.config.default_page_size);
        if size > self.config.max_page_size {
            return Err(AppError::Validation {
                field: "size".to_string(),
                reason: format!(
                    "Page size {} exceeds the maximum of {}",
                    size, self.config.max_page_size
                ),
            });
        }
        PageRequest::of_page(args.page.unwrap_or(0), size)
    }
}

fn render<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use super::*;
    use crate::cli::parser::CountMode;
    use crate::repositories::InMemoryMemberStore;
    use crate::seed::seed_fixture;

    async fn handler(config: SearchConfig) -> SearchCommandHandler {
        let store = Arc::new(InMemoryMemberStore::new());
        seed_fixture(store.as_ref()).await.unwrap();
        SearchCommandHandler::new(MemberSearchService::new(store), config)
    }

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[tokio::test]
    async fn test_paged_output_uses_config_defaults() {
        let handler = handler(SearchConfig::default()).await;

        let output = parse(&handler.execute(&SearchArgs::default()).await.unwrap());

        assert_eq!(output["content"].as_array().unwrap().len(), 4);
        assert_eq!(output["total_count"], 4);
        assert_eq!(output["page_size"], 20);
        assert_eq!(output["total_pages"], 1);
        assert_eq!(output["has_next"], false);
        assert_eq!(output["count_strategy"], "complex");
    }

    #[tokio::test]
    async fn test_second_page() {
        let handler = handler(SearchConfig::default()).await;
        let args = SearchArgs {
            page: Some(1),
            size: Some(2),
            count: Some(CountMode::Simple),
            ..SearchArgs::default()
        };

        let output = parse(&handler.execute(&args).await.unwrap());

        assert_eq!(output["content"][0]["username"], "member3");
        assert_eq!(output["content"][1]["team_name"], "teamB");
        assert_eq!(output["page_index"], 1);
        assert_eq!(output["total_count"], 4);
        assert_eq!(output["count_strategy"], "simple");
    }

    #[tokio::test]
    async fn test_unpaged_search() {
        let handler = handler(SearchConfig::default()).await;
        let args = SearchArgs {
            age_goe: Some(20),
            age_loe: Some(30),
            count: Some(CountMode::None),
            ..SearchArgs::default()
        };

        let output = parse(&handler.execute(&args).await.unwrap());
        let names: Vec<_> = output
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["username"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(names, ["member2", "member3"]);
    }

    #[tokio::test]
    async fn test_paging_flags_rejected_without_count() {
        let handler = handler(SearchConfig::default()).await;
        let args = SearchArgs {
            size: Some(5),
            count: Some(CountMode::None),
            ..SearchArgs::default()
        };

        match handler.execute(&args).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "count"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_size_above_maximum() {
        let handler = handler(SearchConfig::default()).await;
        let args = SearchArgs {
            size: Some(101),
            ..SearchArgs::default()
        };

        match handler.execute(&args).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "size"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_last_addressable_page() {
        let handler = handler(SearchConfig::default()).await;
        let args = SearchArgs {
            page: Some(i64::MAX),
            size: Some(1),
            ..SearchArgs::default()
        };

        let output = parse(&handler.execute(&args).await.unwrap());

        assert!(output["content"].as_array().unwrap().is_empty());
        assert_eq!(output["total_count"], 4);
        assert_eq!(output["total_pages"], 4);
        assert_eq!(output["has_next"], false);
    }

    #[tokio::test]
    async fn test_negative_page() {
        let handler = handler(SearchConfig::default()).await;
        let args = SearchArgs {
            page: Some(-1),
            ..SearchArgs::default()
        };

        assert!(matches!(
            handler.execute(&args).await,
            Err(AppError::InvalidPageRequest { .. })
        ));
    }
}
