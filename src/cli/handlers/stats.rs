//! Stats command handler

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{AgeSummary, TeamAgeAverage};
use crate::query::MemberFilter;
use crate::services::MemberSearchService;

#[derive(Debug, Serialize)]
struct StatsOutput {
    ages: AgeSummary,
    teams: Vec<TeamAgeAverage>,
}

/// Handler for the stats command
pub struct StatsCommandHandler {
    service: MemberSearchService,
}

impl StatsCommandHandler {
    pub fn new(service: MemberSearchService) -> Self {
        Self { service }
    }

    /// Age summary over all members and average age per team, as pretty JSON.
    pub async fn execute(&self) -> AppResult<String> {
        let output = StatsOutput {
            ages: self.service.age_summary(&MemberFilter::all()).await?,
            teams: self.service.team_age_averages().await?,
        };
        serde_json::to_string_pretty(&output).map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })
    }
}
