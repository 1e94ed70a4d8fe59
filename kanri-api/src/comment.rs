use crate::{Error, MemberId, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub i64);

/// A comment as handed over by the data-fetching layer
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,

    /// Comment this one replies to, if any
    #[serde(default)]
    pub parent_comment_id: Option<CommentId>,

    pub author_id: MemberId,
    pub author_name: String,
    pub body: String,

    pub created_at: Time,
    pub updated_at: Time,

    /// Last time the body was edited by its author, if ever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<Time>,
}

impl Comment {
    /// A comment with placeholder author and timestamps, for tests and tooling
    pub fn stub(id: CommentId, parent_comment_id: Option<CommentId>) -> Comment {
        Comment {
            id,
            parent_comment_id,
            author_id: MemberId(0),
            author_name: String::from("stub"),
            body: format!("comment {}", id.0),
            created_at: Time::default(),
            updated_at: Time::default(),
            edited_at: None,
        }
    }

    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    // Engine operations never call this: they accept anything. It is meant for the
    // edges, where a dump enters the system.
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.author_name)?;
        crate::validate_string(&self.body)?;
        crate::validate_time(&self.created_at)?;
        crate::validate_time(&self.updated_at)?;
        if let Some(t) = &self.edited_at {
            crate::validate_time(t)?;
        }
        Ok(())
    }
}
