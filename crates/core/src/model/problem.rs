use std::fmt;

use thiserror::Error;

/// Difficulty setting for generated problems.
///
/// `Hard` widens operand ranges and enables multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn from_hard(hard: bool) -> Self {
        if hard { Self::Hard } else { Self::Normal }
    }

    #[must_use]
    pub fn is_hard(self) -> bool {
        matches!(self, Self::Hard)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Hard,
            Self::Hard => Self::Normal,
        }
    }
}

impl From<bool> for Difficulty {
    fn from(hard: bool) -> Self {
        Self::from_hard(hard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl Operator {
    /// Operators available at the given difficulty.
    #[must_use]
    pub fn available(difficulty: Difficulty) -> &'static [Operator] {
        match difficulty {
            Difficulty::Normal => &[Operator::Add, Operator::Sub],
            Difficulty::Hard => &[Operator::Add, Operator::Sub, Operator::Mul],
        }
    }

    #[must_use]
    pub fn apply(self, x: i32, y: i32) -> i32 {
        match self {
            Operator::Add => x + y,
            Operator::Sub => x - y,
            Operator::Mul => x * y,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "\u{2212}",
            Operator::Mul => "\u{d7}",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Display position of a candidate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Slot::Left => Slot::Right,
            Slot::Right => Slot::Left,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("decoy {decoy} equals the answer")]
    DecoyMatchesAnswer { decoy: i32 },

    #[error("result {answer} is negative")]
    NegativeAnswer { answer: i32 },
}

/// One live equation with its two candidate answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    x: i32,
    y: i32,
    op: Operator,
    answer: i32,
    decoy: i32,
    answer_slot: Slot,
}

impl Problem {
    /// Build a problem, computing the answer from the operands.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::NegativeAnswer` if the result is below zero, or
    /// `ProblemError::DecoyMatchesAnswer` if both candidates would be equal.
    pub fn new(
        x: i32,
        y: i32,
        op: Operator,
        decoy: i32,
        answer_slot: Slot,
    ) -> Result<Self, ProblemError> {
        let answer = op.apply(x, y);
        if answer < 0 {
            return Err(ProblemError::NegativeAnswer { answer });
        }
        if decoy == answer {
            return Err(ProblemError::DecoyMatchesAnswer { decoy });
        }
        Ok(Self {
            x,
            y,
            op,
            answer,
            decoy,
            answer_slot,
        })
    }

    /// Assemble a problem whose invariants the caller already upholds.
    pub(crate) fn from_generated(
        x: i32,
        y: i32,
        op: Operator,
        answer: i32,
        decoy: i32,
        answer_slot: Slot,
    ) -> Self {
        debug_assert!(answer >= 0 && decoy != answer);
        Self {
            x,
            y,
            op,
            answer,
            decoy,
            answer_slot,
        }
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub fn answer(&self) -> i32 {
        self.answer
    }

    #[must_use]
    pub fn decoy(&self) -> i32 {
        self.decoy
    }

    /// The slot that holds the correct answer.
    #[must_use]
    pub fn answer_slot(&self) -> Slot {
        self.answer_slot
    }

    /// The value displayed in the given slot.
    #[must_use]
    pub fn value_at(&self, slot: Slot) -> i32 {
        if slot == self.answer_slot {
            self.answer
        } else {
            self.decoy
        }
    }

    #[must_use]
    pub fn is_correct(&self, slot: Slot) -> bool {
        slot == self.answer_slot
    }

    /// Equation text, e.g. `7 + 5`.
    #[must_use]
    pub fn equation(&self) -> String {
        format!("{} {} {}", self.x, self.op, self.y)
    }
}
