use std::sync::Arc;

use crate::{
    api::{
        Comment, CommentId, CommentReactions, MemberId, Reaction, ReactionKind, ReactionToggle,
        ThreadOwner,
    },
    CommentNode, ReactionOverlay, ThreadIndex,
};

/// The comments of one project or task, as seen by one view
///
/// Cloning is cheap, and each clone then carries its own reactions: two views of
/// the same thread can diverge until they are both reloaded.
#[derive(Clone, Debug)]
pub struct CommentThread {
    pub owner: ThreadOwner,
    comments: Arc<Vec<Comment>>,
    index: Arc<ThreadIndex>,
    pub reactions: ReactionOverlay,
}

impl CommentThread {
    pub fn new(owner: ThreadOwner, comments: Vec<Comment>) -> CommentThread {
        let index = ThreadIndex::new(&comments);
        CommentThread {
            owner,
            comments: Arc::new(comments),
            index: Arc::new(index),
            reactions: ReactionOverlay::new(),
        }
    }

    /// Replaces the comments with a fresh snapshot from the server, forgetting all
    /// local reactions
    pub fn reload(&mut self, comments: Vec<Comment>) {
        tracing::debug!(owner = ?self.owner, num_comments = comments.len(), "reloading thread");
        self.index = Arc::new(ThreadIndex::new(&comments));
        self.comments = Arc::new(comments);
        self.reactions.clear();
    }

    pub fn seed_reactions(&mut self, reactions: Vec<CommentReactions>) {
        self.reactions.seed(reactions);
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn build_tree(&self) -> Vec<CommentNode> {
        CommentNode::build_forest(&self.comments, &self.index, &self.reactions)
    }

    pub fn toggle_reaction(
        &mut self,
        comment: CommentId,
        kind: ReactionKind,
        member: MemberId,
    ) -> ReactionToggle {
        self.reactions.toggle(comment, kind, member)
    }

    pub fn reaction_count(&self, comment: &CommentId, kind: ReactionKind) -> usize {
        self.reactions.count(comment, kind)
    }

    pub fn has_reacted(&self, comment: &CommentId, kind: ReactionKind, member: &MemberId) -> bool {
        self.reactions.has_reacted(comment, kind, member)
    }

    pub fn reactions_of(&self, comment: &CommentId) -> Vec<Reaction> {
        self.reactions.reactions(comment)
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.index.position(id).map(|pos| &self.comments[pos])
    }

    /// The comment `id` is displayed as a reply to, if any
    pub fn parent(&self, id: &CommentId) -> Option<&Comment> {
        let pos = self.index.position(id)?;
        self.index.parent(pos).map(|p| &self.comments[p])
    }

    pub fn replies(&self, id: &CommentId) -> Vec<&Comment> {
        match self.index.position(id) {
            None => Vec::new(),
            Some(pos) => self.at(self.index.replies(pos)),
        }
    }

    pub fn roots(&self) -> Vec<&Comment> {
        self.at(self.index.roots())
    }

    pub fn depth(&self, id: &CommentId) -> Option<usize> {
        self.index.position(id).map(|pos| self.index.depth(pos))
    }

    fn at(&self, positions: &[usize]) -> Vec<&Comment> {
        positions.iter().map(|p| &self.comments[*p]).collect()
    }
}
