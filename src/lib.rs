// src/lib.rs — Library root for summarena

pub mod cli;
pub mod eval;
pub mod extract;
pub mod grader;
pub mod infra;
pub mod pricing;
pub mod provider;
pub mod report;
pub mod rubric;
pub mod runner;
