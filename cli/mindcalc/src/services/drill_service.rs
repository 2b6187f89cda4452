use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::time::Instant;

use crate::{
    config::DrillConfig,
    models::{ExerciseOutcome, Problem, Verdict},
    utils::format::parse_leading_int,
};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
const ANSWER_PROMPT: &str = "Введите ваш ответ: ";

#[derive(Debug, Error)]
pub enum DrillError {
    #[error("input closed after {answered} answers")]
    InputClosed { answered: usize },

    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// One line of operator input per problem.
#[async_trait]
pub trait AnswerSource: Send {
    /// `None` once the input is closed.
    async fn next_answer(&mut self) -> io::Result<Option<String>>;
}

/// Newline-delimited answers. Bytes that are not UTF-8 are replaced rather
/// than rejected, so such a line is simply scored as wrong.
pub struct LineAnswers<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin + Send> LineAnswers<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl LineAnswers<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> AnswerSource for LineAnswers<R> {
    async fn next_answer(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillSummary {
    pub outcomes: Vec<ExerciseOutcome>,
    pub elapsed: Duration,
}

impl DrillSummary {
    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_correct()).count()
    }
}

pub struct DrillService {
    answer_window: Duration,
    clear_screen: bool,
}

impl DrillService {
    pub fn new(answer_window: Duration, clear_screen: bool) -> Self {
        Self {
            answer_window,
            clear_screen,
        }
    }

    pub fn from_config(config: &DrillConfig) -> Self {
        Self::new(
            Duration::from_secs(config.answer_window_secs),
            config.clear_screen,
        )
    }

    /// Presents every problem in order and waits for exactly one line per
    /// problem. The answer window only hides the problem and shows the
    /// prompt; late answers are still scored.
    pub async fn run<A, W>(
        &self,
        problems: &[Problem],
        answers: &mut A,
        out: &mut W,
    ) -> Result<DrillSummary, DrillError>
    where
        A: AnswerSource + ?Sized,
        W: Write,
    {
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(problems.len());

        for (index, problem) in problems.iter().enumerate() {
            writeln!(out, "{}", problem)?;
            out.flush()?;

            let line = self
                .await_answer(answers, out)
                .await?
                .ok_or(DrillError::InputClosed { answered: index })?;

            let verdict = Verdict::judge(problem, parse_leading_int(&line));
            writeln!(out, "{}", verdict.text())?;

            tracing::debug!(
                index,
                expression = %problem.expression(),
                answer = %line.trim(),
                correct = matches!(verdict, Verdict::Correct),
                "Problem scored"
            );
            outcomes.push(ExerciseOutcome::new(problem, verdict));
        }

        Ok(DrillSummary {
            outcomes,
            elapsed: started.elapsed(),
        })
    }

    async fn await_answer<A, W>(
        &self,
        answers: &mut A,
        out: &mut W,
    ) -> Result<Option<String>, DrillError>
    where
        A: AnswerSource + ?Sized,
        W: Write,
    {
        let read = answers.next_answer();
        tokio::pin!(read);
        let window = tokio::time::sleep(self.answer_window);
        tokio::pin!(window);
        let mut window_open = true;

        loop {
            tokio::select! {
                biased;

                line = &mut read => return Ok(line?),
                () = &mut window, if window_open => {
                    window_open = false;
                    self.show_answer_prompt(out)?;
                }
            }
        }
    }

    fn show_answer_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.clear_screen {
            write!(out, "{}", CLEAR_SCREEN)?;
        } else {
            writeln!(out)?;
        }
        write!(out, "{}", ANSWER_PROMPT)?;
        out.flush()
    }
}
