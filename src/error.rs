// src/error.rs

//! Error types for the EOQ engine.
//!
//! Every failure mode has a named variant. The engine never swallows its own
//! errors; callers decide how to present them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EoqError {
    /// No sales rows were supplied, so no metrics can be derived.
    #[error("empty dataset: at least one sales record is required")]
    EmptyDataset,

    /// A cost, rate or confidence parameter is outside its domain.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// A sales row carries a negative quantity or an unparseable value.
    #[error("invalid input{}: {reason}", line_suffix(.line))]
    InvalidInput { line: Option<usize>, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl EoqError {
    pub(crate) fn param(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn input(line: Option<usize>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            line,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for `InvalidParameter`, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, EoqError>;
