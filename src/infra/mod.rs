// src/infra/mod.rs — Configuration, errors, logging

pub mod config;
pub mod errors;
pub mod logger;
