//! Script parse errors.
//!
//! Every variant names the offending token and the section being parsed, so
//! a malformed script yields one actionable message and no partial catalog.

use thiserror::Error;

/// Errors produced by the scenario parser.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unexpected token {token:?} in {section} section")]
    UnexpectedToken {
        token: String,
        section: &'static str,
        line: u32,
    },

    #[error("unexpected end of script in {section} section")]
    UnexpectedEnd { section: &'static str },

    #[error("line {line}: invalid number {token:?} in {section} section")]
    InvalidNumber {
        token: String,
        section: &'static str,
        line: u32,
    },

    #[error("line {line}: invalid color {token:?} in {section} section")]
    InvalidColor {
        token: String,
        section: &'static str,
        line: u32,
    },

    #[error("line {line}: {value} out of range for {what} (max {max})")]
    OutOfRange {
        what: &'static str,
        value: u32,
        max: u32,
        line: u32,
    },

    #[error("line {line}: duplicate {kind} {name:?}")]
    Duplicate {
        kind: &'static str,
        name: String,
        line: u32,
    },

    #[error("line {line}: unknown {kind} {name:?} referenced in {section} section")]
    Undefined {
        kind: &'static str,
        name: String,
        section: &'static str,
        line: u32,
    },

    #[error("line {line}: unit {unit:?} lists starting resource {resource:?} without a matching cap")]
    MissingCap {
        unit: String,
        resource: String,
        line: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
