use std::io::Write;

use anyhow::Result;

use super::{RunStatus, ABORT_MESSAGE};
use crate::{
    services::{
        drill_service::{AnswerSource, DrillError, DrillService},
        problem_generator::{OperandSource, ProblemGenerator},
        session_recorder::{rounded_seconds, SessionRecorder},
        AppState,
    },
    utils::format::two_decimals,
};

/// Generate, drill, then save. A failed save is reported but does not undo
/// the drill the operator already saw.
pub async fn run_drill<S, A, O, E>(
    state: &AppState,
    count: usize,
    operands: &mut S,
    answers: &mut A,
    out: &mut O,
    err: &mut E,
) -> Result<RunStatus>
where
    S: OperandSource,
    A: AnswerSource + ?Sized,
    O: Write,
    E: Write,
{
    let problems = ProblemGenerator::from_config(&state.config.drill).generate(count, operands);
    tracing::info!(count = problems.len(), "Starting drill");

    let summary = match DrillService::from_config(&state.config.drill)
        .run(&problems, answers, out)
        .await
    {
        Ok(summary) => summary,
        Err(DrillError::InputClosed { answered }) => {
            tracing::debug!(answered, "Input closed before the drill finished");
            writeln!(err, "\n{}", ABORT_MESSAGE)?;
            return Ok(RunStatus::Aborted);
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(
        out,
        "Время выполнения: {} секунд",
        two_decimals(rounded_seconds(summary.elapsed))
    )?;

    state.mark_saving();
    let recorder = SessionRecorder::new(state.store.clone());
    match recorder.record(summary).await {
        Ok(_) => writeln!(out, "Результаты успешно сохранены в базу данных!")?,
        Err(e) => {
            tracing::debug!("Failed to save session: {:#}", e);
            writeln!(err, "Ошибка сохранения в MongoDB: {:#}", e)?;
        }
    }

    Ok(RunStatus::Completed)
}
