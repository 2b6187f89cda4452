use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;

use super::RunStatus;
use crate::{
    services::{
        reporting_service::{ReportingService, StatsReport},
        AppState,
    },
    utils::{format::two_decimals, time::format_ru_long_date},
};

pub async fn run_stats<W: Write>(state: &AppState, out: &mut W) -> Result<RunStatus> {
    let service = ReportingService::new(state.store.clone());

    match service.stats().await.context("Ошибка при выводе статистики")? {
        Some(report) => render_stats(&report, out)?,
        None => writeln!(out, "Нет данных для отображения статистики.")?,
    }

    Ok(RunStatus::Completed)
}

pub fn render_stats<W: Write>(report: &StatsReport, out: &mut W) -> std::io::Result<()> {
    let stats = &report.stats;
    let average = stats
        .average_elapsed_seconds
        .map(two_decimals)
        .unwrap_or_else(|| "неизвестно".to_string());

    writeln!(out, "=== Статистика тренировок ===")?;
    writeln!(out, "Всего тренировок: {}", stats.session_count)?;
    writeln!(out, "Общее количество примеров: {}", stats.total_exercise_count)?;
    writeln!(out, "Среднее время выполнения: {} секунд", average)?;
    writeln!(
        out,
        "Процент правильных ответов: {}%",
        two_decimals(stats.correct_percentage)
    )?;
    writeln!(
        out,
        "Процент неправильных ответов: {}%",
        two_decimals(stats.incorrect_percentage)
    )?;
    writeln!(out)?;

    match &report.latest {
        Some(latest) => {
            writeln!(out, "Последняя решённая тренировка:")?;
            writeln!(
                out,
                "Дата и время тренировки: {}",
                format_ru_long_date(&latest.date.with_timezone(&Local))
            )?;
            writeln!(out, "Содержимое:")?;
            writeln!(
                out,
                "{}",
                latest
                    .raw_text
                    .as_deref()
                    .unwrap_or("Нет данных для отображения")
            )?;
        }
        None => writeln!(out, "Нет данных о тренировках.")?,
    }

    Ok(())
}
