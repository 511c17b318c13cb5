use std::{backtrace::Backtrace, fmt::Formatter, ops::Deref};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrorCode {
    #[error("invalid key: key must be present")]
    InvalidKey,
    #[error("key not found")]
    KeyNotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("cannot allocate store slots: {0}")]
    Alloc(#[from] std::collections::TryReserveError),
}

pub type Result<T> = std::result::Result<T, KvError>;

#[derive(Error)]
#[error("{inner}")]
pub struct KvError {
    #[source]
    inner: Box<ErrorCode>,
    backtrace: Box<Backtrace>,
}

impl Deref for KvError {
    type Target = ErrorCode;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ErrorCode> for KvError {
    fn from(value: ErrorCode) -> Self {
        KvError {
            inner: Box::new(value),
            backtrace: Box::new(Backtrace::capture()),
        }
    }
}

impl core::fmt::Debug for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.inner, self.backtrace)
    }
}

impl From<std::io::Error> for KvError {
    fn from(value: std::io::Error) -> Self {
        ErrorCode::Io(value).into()
    }
}
