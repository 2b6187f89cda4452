use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::problem::Problem;

pub const CORRECT_MARKER: &str = "ПРАВИЛЬНО!";
const CORRECT_PREFIX: &str = "ПРАВИЛЬНО";
const ELAPSED_LINE_PREFIX: &str = "Время выполнения: ";
const ELAPSED_LINE_SUFFIX: &str = " секунд";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect { expected: i64 },
}

impl Verdict {
    pub fn judge(problem: &Problem, answer: Option<i64>) -> Self {
        if answer == Some(problem.expected_answer) {
            Verdict::Correct
        } else {
            Verdict::Incorrect {
                expected: problem.expected_answer,
            }
        }
    }

    pub fn text(&self) -> String {
        match self {
            Verdict::Correct => CORRECT_MARKER.to_string(),
            Verdict::Incorrect { expected } => {
                format!("НЕПРАВИЛЬНО! Правильный ответ: {}", expected)
            }
        }
    }
}

/// One answered problem as it is stored in the `exercises` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseOutcome {
    pub example: String,
    pub result: String,
}

impl ExerciseOutcome {
    pub fn new(problem: &Problem, verdict: Verdict) -> Self {
        Self {
            example: problem.expression(),
            result: verdict.text(),
        }
    }

    /// Stored results are classified by prefix so records written by older
    /// clients (with slightly different wording) still count.
    pub fn is_correct(&self) -> bool {
        self.result.starts_with(CORRECT_PREFIX)
    }
}

/// `totalTime` as found in the collection: new records store seconds as a
/// number, legacy ones stored the formatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElapsedTime {
    Seconds(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(with = "bson_datetime_as_chrono")]
    pub date: DateTime<Utc>,
    #[serde(rename = "totalTime", default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<ElapsedTime>,
    #[serde(default)]
    pub exercises: Vec<ExerciseOutcome>,
    #[serde(rename = "rawText", default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl SessionRecord {
    /// Seconds only when stored as a number; text values do not count.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        match self.total_time {
            Some(ElapsedTime::Seconds(seconds)) => Some(seconds),
            _ => None,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.is_correct()).count()
    }
}

/// Human-readable rendering of a session, stored as `rawText`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub exercises: Vec<ExerciseOutcome>,
    pub elapsed: Option<String>,
}

impl Transcript {
    pub fn render(exercises: &[ExerciseOutcome], elapsed: &str) -> String {
        let body = exercises
            .iter()
            .map(|e| format!("{} = {}", e.example, e.result))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{}\n{}{}{}",
            body, ELAPSED_LINE_PREFIX, elapsed, ELAPSED_LINE_SUFFIX
        )
    }

    pub fn parse(raw: &str) -> Self {
        let mut exercises = Vec::new();
        let mut elapsed = None;

        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            if let Some(value) = line
                .strip_prefix(ELAPSED_LINE_PREFIX)
                .and_then(|rest| rest.strip_suffix(ELAPSED_LINE_SUFFIX))
            {
                elapsed = Some(value.to_string());
            } else if let Some((example, result)) = line.split_once(" = ") {
                exercises.push(ExerciseOutcome {
                    example: example.to_string(),
                    result: result.to_string(),
                });
            }
        }

        Self { exercises, elapsed }
    }
}

pub(super) mod bson_datetime_as_chrono {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use crate::utils::time::chrono_to_bson;

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        chrono_to_bson(*date).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bson_dt = bson::DateTime::deserialize(deserializer)?;
        DateTime::from_timestamp_millis(bson_dt.timestamp_millis())
            .ok_or_else(|| D::Error::custom("session date is out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::problem::Operator;
    use mongodb::bson::{self, doc, Bson};

    fn outcome(example: &str, result: &str) -> ExerciseOutcome {
        ExerciseOutcome {
            example: example.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn verdict_text_names_correct_answer() {
        let problem = Problem::new(7, 3, Operator::Add);
        assert_eq!(Verdict::judge(&problem, Some(10)).text(), "ПРАВИЛЬНО!");
        assert_eq!(
            Verdict::judge(&problem, Some(9)).text(),
            "НЕПРАВИЛЬНО! Правильный ответ: 10"
        );
        assert_eq!(
            Verdict::judge(&problem, None),
            Verdict::Incorrect { expected: 10 }
        );
    }

    #[test]
    fn incorrect_marker_is_not_counted_as_correct() {
        assert!(outcome("1 + 1", "ПРАВИЛЬНО!").is_correct());
        assert!(!outcome("1 + 1", "НЕПРАВИЛЬНО! Правильный ответ: 2").is_correct());
    }

    #[test]
    fn transcript_matches_legacy_layout() {
        let exercises = vec![
            outcome("500 + 300", "ПРАВИЛЬНО!"),
            outcome("400 - 200", "НЕПРАВИЛЬНО! Правильный ответ: 200"),
        ];
        let raw = Transcript::render(&exercises, "12.34");
        assert_eq!(
            raw,
            "500 + 300 = ПРАВИЛЬНО!\n\
             400 - 200 = НЕПРАВИЛЬНО! Правильный ответ: 200\n\
             Время выполнения: 12.34 секунд"
        );

        let parsed = Transcript::parse(&raw);
        assert_eq!(parsed.exercises, exercises);
        assert_eq!(parsed.elapsed.as_deref(), Some("12.34"));
    }

    #[test]
    fn empty_session_transcript_has_only_time_line() {
        let raw = Transcript::render(&[], "0.00");
        assert_eq!(raw, "\nВремя выполнения: 0.00 секунд");
        let parsed = Transcript::parse(&raw);
        assert!(parsed.exercises.is_empty());
        assert_eq!(parsed.elapsed.as_deref(), Some("0.00"));
    }

    #[test]
    fn document_uses_legacy_field_names() {
        let record = SessionRecord {
            id: None,
            date: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            total_time: Some(ElapsedTime::Seconds(12.5)),
            exercises: vec![outcome("7 + 3", "ПРАВИЛЬНО!")],
            raw_text: Some("7 + 3 = ПРАВИЛЬНО!\nВремя выполнения: 12.50 секунд".into()),
        };

        let document = bson::to_document(&record).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(matches!(document.get("date"), Some(Bson::DateTime(_))));
        assert_eq!(document.get_f64("totalTime").unwrap(), 12.5);
        assert_eq!(
            document.get_array("exercises").unwrap()[0],
            Bson::Document(doc! { "example": "7 + 3", "result": "ПРАВИЛЬНО!" })
        );
        assert!(document.contains_key("rawText"));
    }

    #[test]
    fn legacy_documents_are_readable() {
        let date = bson::DateTime::from_millis(1_700_000_000_000);
        let with_text_time = doc! {
            "_id": bson::oid::ObjectId::new(),
            "date": date,
            "totalTime": "41.07",
            "exercises": [{ "example": "1 + 2", "result": "ПРАВИЛЬНО!" }],
        };
        let record: SessionRecord = bson::from_document(with_text_time).unwrap();
        assert_eq!(record.total_time, Some(ElapsedTime::Text("41.07".into())));
        assert_eq!(record.elapsed_seconds(), None);
        assert!(record.raw_text.is_none());
        assert_eq!(record.correct_count(), 1);

        let without_time = doc! { "date": date, "exercises": [] };
        let record: SessionRecord = bson::from_document(without_time).unwrap();
        assert!(record.total_time.is_none());

        let integer_time = doc! { "date": date, "totalTime": 30_i32, "exercises": [] };
        let record: SessionRecord = bson::from_document(integer_time).unwrap();
        assert_eq!(record.elapsed_seconds(), Some(30.0));
    }
}
