use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
        }
    }
}

/// One generated question. Subtraction problems always have
/// `first_operand >= second_operand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub first_operand: i64,
    pub second_operand: i64,
    pub operator: Operator,
    pub expected_answer: i64,
}

impl Problem {
    pub fn new(first_operand: i64, second_operand: i64, operator: Operator) -> Self {
        let (first_operand, second_operand) =
            if operator == Operator::Subtract && first_operand < second_operand {
                (second_operand, first_operand)
            } else {
                (first_operand, second_operand)
            };

        let expected_answer = match operator {
            Operator::Add => first_operand + second_operand,
            Operator::Subtract => first_operand - second_operand,
        };

        Self {
            first_operand,
            second_operand,
            operator,
            expected_answer,
        }
    }

    /// Text stored as `example` in the session document, e.g. `500 + 300`.
    pub fn expression(&self) -> String {
        format!(
            "{} {} {}",
            self.first_operand,
            self.operator.symbol(),
            self.second_operand
        )
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ?", self.expression())
    }
}
