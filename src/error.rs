use thiserror::Error;

use crate::game_data::ComponentKind;

#[derive(Error, Debug)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("{kind} not found: {name}")]
    NotFound { kind: ComponentKind, name: String },
    #[error("Invariant violated: {detail}")]
    InvariantViolation { detail: String },
    #[cfg(feature = "json")]
    #[error("Error serializing or deserializing json: {err}")]
    SerdeJson {
        #[from]
        err: serde_json::Error,
    },
}

impl Error {
    /// Whether this error is a missing module/ammunition lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind }
    }
}

#[cfg(feature = "json")]
impl std::convert::From<serde_json::Error> for Error {
    fn from(x: serde_json::Error) -> Error {
        Error { kind: x.into() }
    }
}

pub type IResult<T> = Result<T, Error>;

pub fn failure_from_kind(kind: ErrorKind) -> Error {
    Error { kind }
}

pub(crate) fn not_found(kind: ComponentKind, name: &str) -> Error {
    failure_from_kind(ErrorKind::NotFound {
        kind,
        name: name.to_string(),
    })
}

pub(crate) fn invariant(detail: impl Into<String>) -> Error {
    failure_from_kind(ErrorKind::InvariantViolation {
        detail: detail.into(),
    })
}
