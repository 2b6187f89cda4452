use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;

use super::RunStatus;
use crate::{
    models::{ElapsedTime, SessionRecord},
    services::{reporting_service::ReportingService, AppState},
    utils::format::two_decimals,
};

pub async fn run_history<W: Write>(state: &AppState, out: &mut W) -> Result<RunStatus> {
    let sessions = ReportingService::new(state.store.clone())
        .history()
        .await
        .context("Ошибка чтения истории")?;

    render_history(&sessions, out)?;
    Ok(RunStatus::Completed)
}

pub fn render_history<W: Write>(sessions: &[SessionRecord], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "История тренировок:")?;

    for (index, session) in sessions.iter().enumerate() {
        let elapsed = match &session.total_time {
            Some(ElapsedTime::Seconds(seconds)) => two_decimals(*seconds),
            Some(ElapsedTime::Text(text)) => text.clone(),
            None => "неизвестно".to_string(),
        };

        writeln!(out, "\nТренировка #{}", index + 1)?;
        writeln!(
            out,
            "Дата: {}",
            session.date.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "Время выполнения: {} секунд", elapsed)?;
        for (i, exercise) in session.exercises.iter().enumerate() {
            writeln!(out, "  {}. {} = {}", i + 1, exercise.example, exercise.result)?;
        }
    }

    Ok(())
}
