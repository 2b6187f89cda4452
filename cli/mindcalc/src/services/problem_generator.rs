use std::ops::RangeInclusive;

use rand::Rng;

use crate::{
    config::DrillConfig,
    models::{Operator, Problem},
};

/// Supplies operands; swapped for a scripted source in tests.
pub trait OperandSource {
    fn next_operand(&mut self, range: &RangeInclusive<i64>) -> i64;
}

pub struct RandomOperands<R> {
    rng: R,
}

impl<R: Rng> RandomOperands<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OperandSource for RandomOperands<R> {
    fn next_operand(&mut self, range: &RangeInclusive<i64>) -> i64 {
        self.rng.random_range(range.clone())
    }
}

pub struct ProblemGenerator {
    operands: RangeInclusive<i64>,
}

impl ProblemGenerator {
    pub fn new(operands: RangeInclusive<i64>) -> Self {
        Self { operands }
    }

    pub fn from_config(config: &DrillConfig) -> Self {
        Self::new(i64::from(config.operand_min)..=i64::from(config.operand_max))
    }

    /// `count` problems: the first half (rounded up) addition, the rest
    /// subtraction with non-negative answers.
    pub fn generate<S: OperandSource>(&self, count: usize, source: &mut S) -> Vec<Problem> {
        (0..count)
            .map(|i| {
                let first = source.next_operand(&self.operands);
                let second = source.next_operand(&self.operands);
                let operator = if 2 * i < count {
                    Operator::Add
                } else {
                    Operator::Subtract
                };
                Problem::new(first, second, operator)
            })
            .collect()
    }
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::from_config(&DrillConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::VecDeque;

    struct ScriptedOperands(VecDeque<i64>);

    impl OperandSource for ScriptedOperands {
        fn next_operand(&mut self, _range: &RangeInclusive<i64>) -> i64 {
            self.0.pop_front().expect("script exhausted")
        }
    }

    #[test]
    fn scripted_operands_produce_expected_problems() {
        let mut source = ScriptedOperands(VecDeque::from(vec![500, 300, 200, 400]));
        let problems = ProblemGenerator::default().generate(2, &mut source);

        assert_eq!(
            problems,
            vec![
                Problem {
                    first_operand: 500,
                    second_operand: 300,
                    operator: Operator::Add,
                    expected_answer: 800,
                },
                Problem {
                    first_operand: 400,
                    second_operand: 200,
                    operator: Operator::Subtract,
                    expected_answer: 200,
                },
            ]
        );
    }

    #[test]
    fn generated_problems_hold_invariants() {
        let generator = ProblemGenerator::default();
        let mut source = RandomOperands::new(StdRng::seed_from_u64(7));

        for count in 0..40 {
            let problems = generator.generate(count, &mut source);
            assert_eq!(problems.len(), count);

            for problem in &problems {
                assert!((100..=999).contains(&problem.first_operand));
                assert!((100..=999).contains(&problem.second_operand));
                match problem.operator {
                    Operator::Add => assert_eq!(
                        problem.expected_answer,
                        problem.first_operand + problem.second_operand
                    ),
                    Operator::Subtract => {
                        assert!(problem.first_operand >= problem.second_operand);
                        assert!(problem.expected_answer >= 0);
                        assert_eq!(
                            problem.expected_answer,
                            problem.first_operand - problem.second_operand
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn odd_count_gives_addition_the_larger_half() {
        let mut source = RandomOperands::new(StdRng::seed_from_u64(1));
        let operators: Vec<_> = ProblemGenerator::default()
            .generate(5, &mut source)
            .into_iter()
            .map(|p| p.operator)
            .collect();

        assert_eq!(
            operators,
            vec![
                Operator::Add,
                Operator::Add,
                Operator::Add,
                Operator::Subtract,
                Operator::Subtract,
            ]
        );
    }

    #[test]
    fn narrow_range_is_respected() {
        let generator = ProblemGenerator::new(5..=5);
        let mut source = RandomOperands::new(StdRng::seed_from_u64(3));
        let problems = generator.generate(2, &mut source);
        assert_eq!(problems[0].expected_answer, 10);
        assert_eq!(problems[1].expected_answer, 0);
    }
}
