use crate::{
    api::{Comment, Reaction},
    ReactionOverlay, ThreadIndex,
};

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,

    /// Reactions from the local overlay, ordered by kind
    pub reactions: Vec<Reaction>,

    /// Direct replies, in arrival order
    pub replies: Vec<CommentNode>,
}

/// Builds the reply forest of a flat comment list
///
/// Every comment yields exactly one node. Comments whose parent is missing, is
/// themselves, or closes a reply cycle end up at the root.
pub fn build_tree(comments: &[Comment], reactions: &ReactionOverlay) -> Vec<CommentNode> {
    CommentNode::build_forest(comments, &ThreadIndex::new(comments), reactions)
}

impl CommentNode {
    pub(crate) fn build_forest(
        comments: &[Comment],
        index: &ThreadIndex,
        reactions: &ReactionOverlay,
    ) -> Vec<CommentNode> {
        // Nodes get built replies-first, so that no recursion is needed for deep threads
        let mut built = (0..comments.len()).map(|_| None).collect::<Vec<_>>();
        for pos in index.preorder().into_iter().rev() {
            let replies = index
                .replies(pos)
                .iter()
                .filter_map(|r| built[*r].take())
                .collect();
            let comment = &comments[pos];
            built[pos] = Some(CommentNode {
                reactions: reactions.reactions(&comment.id),
                comment: comment.clone(),
                replies,
            });
        }
        index
            .roots()
            .iter()
            .filter_map(|r| built[*r].take())
            .collect()
    }

    /// Iterates over this node and all its descendants, depth-first, along with
    /// their depth relative to this node
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    pub fn descendant_count(&self) -> usize {
        self.walk().count() - 1
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a CommentNode)>,
}

impl<'a> Walk<'a> {
    pub fn forest(roots: &'a [CommentNode]) -> Walk<'a> {
        Walk {
            stack: roots.iter().rev().map(|n| (0, n)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a CommentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.replies.iter().rev().map(|r| (depth + 1, r)));
        Some((depth, node))
    }
}
