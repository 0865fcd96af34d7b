use std::error;

use derive_more::{Display, Error};

use super::Tag;

/// A marker that was expected on a line but is not there.
/// Produced by [extract_field](super::extract_field), turned into a
/// [ParsingError::MalformedField] once the line number is known.
#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display("marker {marker} is missing")]
pub struct MissingMarker {
    #[error(not(source))]
    pub marker: &'static str,
}

/// An error that occurred somewhere within the broadly defined parsing
/// process. Line numbers are 1-based, as an editor would show them.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ParsingError {
    /// A line that should have carried a field is missing one of its markers
    #[display("line {line}: field {field} is malformed, {marker} is missing")]
    MalformedField {
        field: &'static str,
        marker: &'static str,
        line: usize,
    },
    /// The input ended before the block opened at `line` was closed
    #[display("line {line}: block is never closed by {close}")]
    UnterminatedBlock { close: &'static str, line: usize },
    /// A localization table or the symptom catalog defines a key twice
    #[display("{table} defines the key {key} more than once")]
    DuplicateKey { table: &'static str, key: String },
    /// A reference key has no entry in the table it points into
    #[display("{table} has no entry for the key {key}")]
    UnknownReference { table: &'static str, key: String },
    /// A field holds a value that does not make sense for it
    #[display("line {line}: invalid value {value:?} for {field}")]
    InvalidValue {
        field: &'static str,
        value: String,
        line: usize,
    },
}

impl ParsingError {
    /// Turns a [MissingMarker] into a [ParsingError::MalformedField] of the
    /// given field at the given line.
    pub fn malformed(field: Tag, missing: MissingMarker, line: usize) -> Self {
        ParsingError::MalformedField {
            field: field.open(),
            marker: missing.marker,
            line,
        }
    }
}

impl error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
