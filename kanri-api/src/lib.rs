use chrono::{Datelike, Utc};

pub type Time = chrono::DateTime<Utc>;

mod comment;
pub use comment::{Comment, CommentId};

mod error;
pub use error::Error;

mod reaction;
pub use reaction::{CommentReactions, Reaction, ReactionKind, ReactionToggle};

mod task;
pub use task::{ProjectId, TaskId, ThreadOwner};

mod user;
pub use user::{Member, MemberId};

// Strings that will end up in postgres on the server side cannot hold null bytes, so
// refuse them before they reach the collaborator
pub(crate) fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

pub(crate) fn validate_time(t: &Time) -> Result<(), Error> {
    match (1..=9999).contains(&t.year()) {
        true => Ok(()),
        false => Err(Error::InvalidTime(*t)),
    }
}
