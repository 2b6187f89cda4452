use std::sync::Arc;

use anyhow::{Context, Result};

use super::session_store::SessionStore;
use crate::models::{AggregateStats, SessionRecord};

#[derive(Debug, Clone)]
pub struct StatsReport {
    pub stats: AggregateStats,
    pub latest: Option<SessionRecord>,
}

pub struct ReportingService {
    store: Arc<dyn SessionStore>,
}

impl ReportingService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// `Ok(None)` means nothing has been stored yet.
    pub async fn stats(&self) -> Result<Option<StatsReport>> {
        let sessions = self
            .store
            .find_all()
            .await
            .context("Failed to load sessions")?;

        let Some(stats) = AggregateStats::compute(&sessions) else {
            tracing::info!("No sessions stored, nothing to report");
            return Ok(None);
        };

        let latest = self
            .store
            .find_most_recent()
            .await
            .context("Failed to load the latest session")?;

        tracing::debug!(
            sessions = stats.session_count,
            exercises = stats.total_exercise_count,
            "Stats computed"
        );
        Ok(Some(StatsReport { stats, latest }))
    }

    /// Sessions in storage order.
    pub async fn history(&self) -> Result<Vec<SessionRecord>> {
        self.store
            .find_all()
            .await
            .context("Failed to load sessions")
    }
}
