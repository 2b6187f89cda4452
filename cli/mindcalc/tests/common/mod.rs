#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mindcalc::{
    config::Config,
    models::{ElapsedTime, ExerciseOutcome, SessionRecord, Transcript},
    services::{
        session_store::{SessionStore, StoreError},
        AppState,
    },
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Log lines a default-filtered (`warn`) operator would see on stderr.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Routes this thread's events into the capture until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn test_state(store: Arc<dyn SessionStore>) -> AppState {
    init_tracing();
    let mut config = Config::default();
    config.drill.clear_screen = false;
    AppState::with_store(config, store)
}

/// Session on 2024-01-`day` with `correct` right and `incorrect` wrong answers.
pub fn session(day: u32, correct: usize, incorrect: usize, total_time: Option<f64>) -> SessionRecord {
    let mut exercises = Vec::new();
    for i in 0..correct {
        exercises.push(ExerciseOutcome {
            example: format!("{} + 100", 100 + i),
            result: "ПРАВИЛЬНО!".to_string(),
        });
    }
    for i in 0..incorrect {
        exercises.push(ExerciseOutcome {
            example: format!("{} - 100", 300 + i),
            result: format!("НЕПРАВИЛЬНО! Правильный ответ: {}", 200 + i),
        });
    }

    let raw_text = total_time.map(|t| Transcript::render(&exercises, &format!("{:.2}", t)));
    SessionRecord {
        id: None,
        date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        total_time: total_time.map(ElapsedTime::Seconds),
        exercises,
        raw_text,
    }
}

/// Store that is never reachable.
pub struct UnreachableStore;

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn insert_session(&self, _record: &SessionRecord) -> Result<(), StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }

    async fn find_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }

    async fn find_most_recent(&self) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }
}
