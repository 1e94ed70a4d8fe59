use crate::Time;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown reaction kind {0:?}")]
    UnknownReactionKind(String),

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Time out of supported range {0}")]
    InvalidTime(Time),
}
