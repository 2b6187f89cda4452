use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::{drill_service::DrillSummary, session_store::SessionStore};
use crate::{
    models::{ElapsedTime, ExerciseOutcome, SessionRecord, Transcript},
    utils::format::two_decimals,
};

/// Elapsed time as stored and shown: hundredths of a second, rounded from
/// whole milliseconds (12.345 s is 12.35).
pub fn rounded_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_millis() as f64 / 10.0).round() / 100.0
}

pub struct SessionRecorder {
    store: Arc<dyn SessionStore>,
}

impl SessionRecorder {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Packs a finished drill into the stored document shape. `rawText` is
    /// rendered from the same rounded seconds that go into `totalTime`.
    pub fn build_record(
        outcomes: Vec<ExerciseOutcome>,
        elapsed: Duration,
        date: DateTime<Utc>,
    ) -> SessionRecord {
        let seconds = rounded_seconds(elapsed);
        let raw_text = Transcript::render(&outcomes, &two_decimals(seconds));

        SessionRecord {
            id: None,
            date,
            total_time: Some(ElapsedTime::Seconds(seconds)),
            exercises: outcomes,
            raw_text: Some(raw_text),
        }
    }

    pub async fn record(&self, summary: DrillSummary) -> Result<SessionRecord> {
        let record = Self::build_record(summary.outcomes, summary.elapsed, Utc::now());

        self.store
            .insert_session(&record)
            .await
            .context("Failed to save session")?;

        tracing::info!(
            exercises = record.exercises.len(),
            correct = record.correct_count(),
            "Session recorded"
        );
        Ok(record)
    }
}
