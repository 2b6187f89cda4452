use super::session::SessionRecord;

/// Statistics over every stored session. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    pub session_count: usize,
    pub total_exercise_count: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// `None` when no session carries a numeric `totalTime`.
    pub average_elapsed_seconds: Option<f64>,
    pub correct_percentage: f64,
    pub incorrect_percentage: f64,
}

impl AggregateStats {
    /// Returns `None` for an empty collection.
    pub fn compute(sessions: &[SessionRecord]) -> Option<Self> {
        if sessions.is_empty() {
            return None;
        }

        let mut total_exercise_count = 0;
        let mut correct_count = 0;
        let mut timed_sessions = 0usize;
        let mut total_seconds = 0.0;

        for session in sessions {
            total_exercise_count += session.exercises.len();
            correct_count += session.correct_count();

            if let Some(seconds) = session.elapsed_seconds() {
                total_seconds += seconds;
                timed_sessions += 1;
            }
        }

        let incorrect_count = total_exercise_count - correct_count;
        let average_elapsed_seconds =
            (timed_sessions > 0).then(|| round2(total_seconds / timed_sessions as f64));

        Some(Self {
            session_count: sessions.len(),
            total_exercise_count,
            correct_count,
            incorrect_count,
            average_elapsed_seconds,
            correct_percentage: percentage(correct_count, total_exercise_count),
            incorrect_percentage: percentage(incorrect_count, total_exercise_count),
        })
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
