// src/infra/errors.rs — Error types for summarena

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    // Transport/auth failures from a vendor call. Fatal, never retried.
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    // A grading reply whose score tag is absent, non-numeric, or outside 0-5.
    // Raised at aggregation time; an unparseable score is never treated as 0.
    #[error("Could not parse score for '{dimension}': {raw:?}")]
    ScoreParse { dimension: String, raw: String },

    #[error("Judge reply missing <{tag}> tag")]
    MissingTag { tag: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
