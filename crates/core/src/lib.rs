#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod scoring;

pub use generator::ProblemGenerator;
pub use scoring::{Verdict, score};
