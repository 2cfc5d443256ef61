mod counters;
mod problem;

pub use counters::{Counters, CountersError};
pub use problem::{Difficulty, Operator, Problem, ProblemError, Slot};
