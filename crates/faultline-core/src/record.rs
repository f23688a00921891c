//! Tree-shaped records for transport and storage
//!
//! [`ErrorRecord`] mirrors an error chain link for link. In JSON the tree is
//! written as a flat array of links, outermost first and root cause last,
//! so chain length is bounded by neither the parser's nesting limit nor the
//! stack. Everything except `code` and `message` is omitted when empty.

use crate::classification::Classification;
use crate::error::AppError;
use crate::stack::{StackFrame, Stacktrace};
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Result type alias for record decoding
pub type RecordResult<T> = Result<T, RecordError>;

/// Failures while decoding records
#[derive(Error, Debug)]
pub enum RecordError {
    /// The text was not a valid record
    #[error("Invalid error record: {0}")]
    Json(#[from] serde_json::Error),

    /// A link carried no code
    #[error("Error record at depth {depth} has an empty code")]
    MissingCode { depth: usize },
}

/// One chain link and, recursively, its cause
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub code: String,
    pub message: String,
    pub classification: Classification,
    pub panic: bool,
    pub input: Option<Value>,
    pub stacktrace: Vec<StackFrame>,
    pub cause: Option<Box<ErrorRecord>>,
}

/// Wire form of one link
#[derive(Serialize, Deserialize)]
struct LinkRecord {
    code: String,
    message: String,
    #[serde(default, skip_serializing_if = "is_unclassified")]
    classification: Classification,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    panic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    stacktrace: Vec<StackFrame>,
}

fn is_unclassified(classification: &Classification) -> bool {
    *classification == Classification::None
}

impl ErrorRecord {
    /// Record `err` and its whole chain
    pub fn from_error(err: &AppError) -> Self {
        // Built root-first so the nesting needs no recursion.
        let causes: Vec<&AppError> = err.chain().skip(1).collect();
        let mut cause = None;
        for link in causes.into_iter().rev() {
            cause = Some(Box::new(Self::link(link, cause)));
        }
        Self::link(err, cause)
    }

    fn link(err: &AppError, cause: Option<Box<ErrorRecord>>) -> Self {
        Self {
            code: err.code.clone(),
            message: err.message.clone(),
            classification: err.classification,
            panic: err.panic,
            input: err.input.clone(),
            stacktrace: err
                .stacktrace
                .as_ref()
                .map(|t| t.frames().to_vec())
                .unwrap_or_default(),
            cause,
        }
    }

    /// Rebuild the error chain this record describes
    pub fn into_error(mut self) -> RecordResult<AppError> {
        let mut causes = Vec::new();
        let mut next = self.cause.take();
        while let Some(mut record) = next {
            next = record.cause.take();
            causes.push(*record);
        }

        if self.code.is_empty() {
            return Err(RecordError::MissingCode { depth: 0 });
        }
        if let Some(pos) = causes.iter().position(|r| r.code.is_empty()) {
            return Err(RecordError::MissingCode { depth: pos + 1 });
        }

        let mut cause: Option<AppError> = None;
        for record in causes.into_iter().rev() {
            let mut link = record.into_link();
            link.cause = cause.map(Box::new);
            cause = Some(link);
        }

        let mut err = self.into_link();
        err.cause = cause.map(Box::new);
        Ok(err)
    }

    /// This record alone, without its cause
    fn into_link(mut self) -> AppError {
        let mut link = AppError::bare(
            self.classification,
            std::mem::take(&mut self.code),
            std::mem::take(&mut self.message),
        );
        link.panic = self.panic;
        link.input = self.input.take();
        link.stacktrace = Stacktrace::from_frames(std::mem::take(&mut self.stacktrace));
        link
    }

    /// Number of causes below this record
    pub fn depth(&self) -> usize {
        self.links().count() - 1
    }

    /// This record and every cause below it, outermost first
    fn links(&self) -> impl Iterator<Item = &ErrorRecord> {
        std::iter::successors(Some(self), |r| r.cause.as_deref())
    }

    fn to_wire(&self) -> LinkRecord {
        LinkRecord {
            code: self.code.clone(),
            message: self.message.clone(),
            classification: self.classification,
            panic: self.panic,
            input: self.input.clone(),
            stacktrace: self.stacktrace.clone(),
        }
    }

    /// Nest wire links, outermost first, back into a tree
    fn from_wire(links: Vec<LinkRecord>) -> Option<Self> {
        let mut cause: Option<Box<ErrorRecord>> = None;
        for link in links.into_iter().rev() {
            cause = Some(Box::new(Self {
                code: link.code,
                message: link.message,
                classification: link.classification,
                panic: link.panic,
                input: link.input,
                stacktrace: link.stacktrace,
                cause,
            }));
        }
        cause.map(|record| *record)
    }
}

impl Drop for ErrorRecord {
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(mut record) = next {
            next = record.cause.take();
        }
    }
}

impl Serialize for ErrorRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.depth() + 1))?;
        for record in self.links() {
            seq.serialize_element(&record.to_wire())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ErrorRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let links = Vec::<LinkRecord>::deserialize(deserializer)?;
        Self::from_wire(links).ok_or_else(|| D::Error::invalid_length(0, &"at least one error link"))
    }
}

impl AppError {
    /// Record this error and its chain
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord::from_error(self)
    }

    /// Rebuild an error chain from a record
    pub fn from_record(record: ErrorRecord) -> RecordResult<Self> {
        record.into_error()
    }

    /// Serialize the chain as JSON
    pub fn to_json(&self) -> String {
        // A record holds only strings, numbers and JSON values.
        serde_json::to_string(&self.to_record()).unwrap_or_default()
    }

    /// Serialize the chain as a JSON value
    pub fn to_json_value(&self) -> Value {
        serde_json::to_value(self.to_record()).unwrap_or(Value::Null)
    }

    /// Parse a chain from JSON
    pub fn from_json(json: &str) -> RecordResult<Self> {
        let record: ErrorRecord = serde_json::from_str(json)?;
        record.into_error()
    }
}

impl From<&AppError> for ErrorRecord {
    fn from(err: &AppError) -> Self {
        Self::from_error(err)
    }
}

impl TryFrom<ErrorRecord> for AppError {
    type Error = RecordError;

    fn try_from(record: ErrorRecord) -> RecordResult<Self> {
        record.into_error()
    }
}

impl Serialize for AppError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AppError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ErrorRecord::deserialize(deserializer)?
            .into_error()
            .map_err(serde::de::Error::custom)
    }
}
