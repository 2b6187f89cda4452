use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mindcalc::{
    config::Config,
    handlers::{Mode, RunStatus, ABORT_MESSAGE},
    services::AppState,
};

/// Mental arithmetic drill with stored results.
#[derive(Parser, Debug)]
#[command(name = "mindcalc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of problems in the drill (0 uses the configured default)
    #[arg(value_name = "COUNT")]
    count: Option<usize>,

    /// Show aggregate statistics and the latest session
    #[arg(long, conflicts_with_all = ["history", "count"])]
    stats: bool,

    /// List every stored session
    #[arg(long, conflicts_with = "count")]
    history: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn mode(&self, default_count: usize) -> Mode {
        if self.stats {
            Mode::Stats
        } else if self.history {
            Mode::History
        } else {
            let count = self.count.filter(|c| *c > 0).unwrap_or(default_count);
            Mode::Drill { count }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ошибка конфигурации: {e}");
            return ExitCode::from(RunStatus::Failed.exit_code());
        }
    };

    init_tracing(args.verbose, config.log_json);

    let mode = args.mode(config.drill.default_count);
    tracing::debug!(?mode, "Configuration loaded");

    let state = AppState::new(config);

    let run = mindcalc::run(mode, &state);
    tokio::pin!(run);

    loop {
        tokio::select! {
            result = &mut run => {
                return match result {
                    Ok(status) => ExitCode::from(status.exit_code()),
                    Err(e) => {
                        tracing::debug!("{:#}", e);
                        eprintln!("{:#}", e);
                        ExitCode::from(RunStatus::Failed.exit_code())
                    }
                };
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                // let an in-flight save finish
                if state.is_saving() {
                    tracing::debug!("Interrupt ignored while the session is being saved");
                    continue;
                }
                println!("\n{}", ABORT_MESSAGE);
                // a blocked stdin read would keep the runtime from shutting down
                std::process::exit(i32::from(RunStatus::Aborted.exit_code()))
            }
        }
    }
}

// Priority: RUST_LOG env var > --verbose flag > default (warn). Logs go to
// stderr so they never interleave with the drill on stdout.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "mindcalc=debug" } else { "mindcalc=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
