//! Seed command handler

use std::sync::Arc;

use crate::error::AppResult;
use crate::query::MemberFilter;
use crate::repositories::MemberStore;
use crate::seed::seed_fixture;

/// Handler for the seed command
pub struct SeedCommandHandler {
    store: Arc<dyn MemberStore>,
}

impl SeedCommandHandler {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// Inserts the fixture unless members already exist.
    pub async fn execute(&self) -> AppResult<String> {
        let existing = self.store.count(&MemberFilter::all()).await?;
        if existing > 0 {
            tracing::warn!(existing, "members already present, fixture not inserted");
            return Ok(format!(
                "Skipped seeding: {} member(s) already present",
                existing
            ));
        }

        let fixture = seed_fixture(self.store.as_ref()).await?;
        Ok(format!(
            "Seeded {} team(s) and {} member(s)",
            fixture.teams.len(),
            fixture.members.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryMemberStore;

    #[tokio::test]
    async fn test_seed_once() {
        let store = Arc::new(InMemoryMemberStore::new());
        let handler = SeedCommandHandler::new(store.clone());

        let first = handler.execute().await.unwrap();
        let second = handler.execute().await.unwrap();

        assert_eq!(first, "Seeded 2 team(s) and 4 member(s)");
        assert!(second.starts_with("Skipped seeding"));
        assert_eq!(store.count(&MemberFilter::all()).await.unwrap(), 4);
    }
}
