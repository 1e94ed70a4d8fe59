use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{CommentId, Error, MemberId};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Heart,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 2] = [ReactionKind::Like, ReactionKind::Heart];

    pub fn name(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Heart => "heart",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<ReactionKind, Error> {
        ReactionKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::UnknownReactionKind(String::from(s)))
    }
}

/// All the members who applied one reaction kind to one comment
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Reaction {
    pub kind: ReactionKind,
    pub members: BTreeSet<MemberId>,
}

impl Reaction {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Reactions of a single comment, as exchanged with the server of record
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReactions {
    pub comment_id: CommentId,
    pub reactions: Vec<Reaction>,
}

/// Outcome of toggling a reaction locally, for the surrounding view to post upstream
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionToggle {
    pub comment_id: CommentId,
    pub kind: ReactionKind,
    pub member_id: MemberId,

    /// true if the member now holds the reaction, false if it was just removed
    pub now_reacted: bool,
}
