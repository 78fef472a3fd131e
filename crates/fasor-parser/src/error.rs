//! Error types for fasor-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("unknown element type at line {line}: {name}")]
    UnknownElement { line: usize, name: String },

    #[error("invalid value at line {line}: {value}")]
    InvalidValue { line: usize, value: String },

    #[error("duplicate element name at line {line}: {name}")]
    DuplicateElement { line: usize, name: String },

    #[error("unknown control element at line {line}: {control}")]
    UnknownControl { line: usize, control: String },
}

pub type Result<T> = std::result::Result<T, Error>;
