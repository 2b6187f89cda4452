pub mod problem;
pub mod session;
pub mod stats;

pub use problem::{Operator, Problem};
pub use session::{ElapsedTime, ExerciseOutcome, SessionRecord, Transcript, Verdict};
pub use stats::AggregateStats;
