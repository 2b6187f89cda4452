pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use handlers::{Mode, RunStatus};
pub use services::AppState;

use std::io;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

use services::{drill_service::LineAnswers, problem_generator::RandomOperands};

/// Runs one mode against the real console: stdin for answers, stdout for
/// the drill and reports, stderr for non-fatal save errors.
pub async fn run(mode: Mode, state: &AppState) -> Result<RunStatus> {
    let mut out = io::stdout();

    match mode {
        Mode::Drill { count } => {
            let mut operands = RandomOperands::new(StdRng::from_os_rng());
            let mut answers = LineAnswers::stdin();
            handlers::drill::run_drill(
                state,
                count,
                &mut operands,
                &mut answers,
                &mut out,
                &mut io::stderr(),
            )
            .await
        }
        Mode::Stats => handlers::stats::run_stats(state, &mut out).await,
        Mode::History => handlers::history::run_history(state, &mut out).await,
    }
}
