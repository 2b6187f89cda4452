pub mod drill;
pub mod history;
pub mod stats;

pub const ABORT_MESSAGE: &str = "Программа завершена досрочно. Результаты не сохранены.";

/// What the process tells its caller once a mode is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Finished normally, including "no data" and a drill whose save failed.
    Completed,
    /// Persistence or report failure.
    Failed,
    /// Interrupted or input closed; nothing was saved.
    Aborted,
}

impl RunStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            RunStatus::Completed => 0,
            RunStatus::Failed => 1,
            RunStatus::Aborted => 130,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Drill { count: usize },
    Stats,
    History,
}
