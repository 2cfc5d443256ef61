//! Random arithmetic problem generation.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::model::{Difficulty, Operator, Problem, Slot};

/// Operand and decoy ranges for one difficulty level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandRanges {
    pub add: RangeInclusive<i32>,
    pub sub_left: RangeInclusive<i32>,
    pub sub_right: RangeInclusive<i32>,
    pub mul: RangeInclusive<i32>,
    pub decoy_offset: RangeInclusive<i32>,
}

impl OperandRanges {
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Normal => Self {
                add: 2..=19,
                sub_left: 2..=29,
                sub_right: 2..=19,
                mul: 2..=12,
                decoy_offset: 1..=5,
            },
            Difficulty::Hard => Self {
                add: 2..=39,
                sub_left: 2..=49,
                sub_right: 2..=29,
                mul: 2..=12,
                decoy_offset: 1..=9,
            },
        }
    }
}

/// Deals problems from an injected random source.
///
/// The generator owns no randomness itself so tests can drive it with a
/// seeded `StdRng`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemGenerator;

impl ProblemGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate one problem at the given difficulty.
    ///
    /// The result is never negative and the decoy never equals it.
    pub fn generate<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Problem {
        let ranges = OperandRanges::for_difficulty(difficulty);
        let ops = Operator::available(difficulty);
        let op = ops[rng.random_range(0..ops.len())];

        let (x, y) = match op {
            Operator::Add => (
                rng.random_range(ranges.add.clone()),
                rng.random_range(ranges.add.clone()),
            ),
            Operator::Sub => {
                let x = rng.random_range(ranges.sub_left.clone());
                let y = rng.random_range(ranges.sub_right.clone());
                if y > x { (y, x) } else { (x, y) }
            }
            Operator::Mul => (
                rng.random_range(ranges.mul.clone()),
                rng.random_range(ranges.mul.clone()),
            ),
        };
        let answer = op.apply(x, y);

        let offset = rng.random_range(ranges.decoy_offset.clone());
        let mut decoy = if rng.random_bool(0.5) {
            answer - offset
        } else {
            answer + offset
        };
        if decoy == answer {
            decoy += 2;
        }

        let answer_slot = if rng.random_bool(0.5) {
            Slot::Left
        } else {
            Slot::Right
        };

        Problem::from_generated(x, y, op, answer, decoy, answer_slot)
    }
}
