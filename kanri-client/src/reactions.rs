use std::collections::{BTreeMap, BTreeSet};

use crate::api::{CommentId, CommentReactions, MemberId, Reaction, ReactionKind, ReactionToggle};

/// Local reaction state layered over the comments fetched from the server
///
/// Never holds empty member sets nor comments without reactions, so that two
/// overlays holding the same reactions always compare equal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReactionOverlay {
    comments: BTreeMap<CommentId, BTreeMap<ReactionKind, BTreeSet<MemberId>>>,
}

impl ReactionOverlay {
    pub fn new() -> ReactionOverlay {
        ReactionOverlay::default()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn clear(&mut self) {
        self.comments.clear();
    }

    pub fn toggle(
        &mut self,
        comment: CommentId,
        kind: ReactionKind,
        member: MemberId,
    ) -> ReactionToggle {
        let reactions = self.comments.entry(comment).or_default();
        let members = reactions.entry(kind).or_default();
        let now_reacted = members.insert(member);
        if !now_reacted {
            members.remove(&member);
        }
        if members.is_empty() {
            reactions.remove(&kind);
        }
        if reactions.is_empty() {
            self.comments.remove(&comment);
        }
        tracing::debug!(?comment, %kind, ?member, now_reacted, "toggled reaction");
        ReactionToggle {
            comment_id: comment,
            kind,
            member_id: member,
            now_reacted,
        }
    }

    pub fn count(&self, comment: &CommentId, kind: ReactionKind) -> usize {
        self.members(comment, kind).map(|m| m.len()).unwrap_or(0)
    }

    pub fn has_reacted(&self, comment: &CommentId, kind: ReactionKind, member: &MemberId) -> bool {
        self.members(comment, kind)
            .map(|m| m.contains(member))
            .unwrap_or(false)
    }

    /// Reactions of `comment`, ordered by kind
    pub fn reactions(&self, comment: &CommentId) -> Vec<Reaction> {
        self.comments
            .get(comment)
            .map(|reactions| {
                reactions
                    .iter()
                    .map(|(kind, members)| Reaction {
                        kind: *kind,
                        members: members.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Merges reactions known to the server of record into the overlay
    pub fn seed(&mut self, reactions: Vec<CommentReactions>) {
        for c in reactions {
            for r in c.reactions {
                if r.members.is_empty() {
                    continue;
                }
                self.comments
                    .entry(c.comment_id)
                    .or_default()
                    .entry(r.kind)
                    .or_default()
                    .extend(r.members);
            }
        }
    }

    /// Serializable form of the overlay, ordered by comment id
    pub fn dump(&self) -> Vec<CommentReactions> {
        self.comments
            .keys()
            .map(|id| CommentReactions {
                comment_id: *id,
                reactions: self.reactions(id),
            })
            .collect()
    }

    fn members(&self, comment: &CommentId, kind: ReactionKind) -> Option<&BTreeSet<MemberId>> {
        self.comments.get(comment)?.get(&kind)
    }
}
