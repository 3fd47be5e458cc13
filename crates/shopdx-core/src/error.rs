//! Input Error Model
use thiserror::Error;

/// A shop record that cannot be diagnosed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("INPUT/missing field '{0}'")]
    MissingField(&'static str),

    #[error("INPUT/field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("INPUT/field '{field}' is not a finite number")]
    NotFinite { field: &'static str },

    #[error("INPUT/field '{field}' = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("INPUT/unknown stage '{0}' (expected new, growth or mature)")]
    UnknownStage(String),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("PARSE/{0}")]
    Parse(#[from] serde_json::Error),

    #[error("PARSE/record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
