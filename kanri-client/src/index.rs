use std::collections::HashMap;

use crate::api::{Comment, CommentId};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Reply structure of a flat comment list, stored as positions into that list
///
/// Every position is either a root or the reply of exactly one other position, and
/// following parents from any position always ends on a root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadIndex {
    /// Position of the first comment carrying each id
    positions: HashMap<CommentId, usize>,

    /// Resolved parent of each position, None for roots
    parents: Vec<Option<usize>>,

    /// Replies of each position, in arrival order
    children: Vec<Vec<usize>>,

    /// Root positions, in arrival order
    roots: Vec<usize>,
}

impl ThreadIndex {
    pub fn new(comments: &[Comment]) -> ThreadIndex {
        let mut positions = HashMap::with_capacity(comments.len());
        for (pos, c) in comments.iter().enumerate() {
            positions.entry(c.id).or_insert(pos);
        }

        let mut parents = comments
            .iter()
            .map(|c| {
                let parent_id = c.parent_comment_id?;
                if parent_id == c.id {
                    tracing::warn!(
                        comment = ?c.id,
                        "comment replies to itself, placing it at the root"
                    );
                    return None;
                }
                let parent = positions.get(&parent_id).copied();
                if parent.is_none() {
                    tracing::debug!(
                        comment = ?c.id,
                        parent = ?parent_id,
                        "parent comment is not in this thread, placing it at the root"
                    );
                }
                parent
            })
            .collect::<Vec<_>>();
        break_cycles(comments, &mut parents);

        let mut children = vec![Vec::new(); comments.len()];
        let mut roots = Vec::new();
        for (pos, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(pos),
                None => roots.push(pos),
            }
        }

        ThreadIndex {
            positions,
            parents,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn position(&self, id: &CommentId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Returns the resolved parent of `pos`, which may differ from the comment's
    /// `parent_comment_id` when that one was dangling or cyclic
    pub fn parent(&self, pos: usize) -> Option<usize> {
        self.parents.get(pos).copied().flatten()
    }

    pub fn replies(&self, pos: usize) -> &[usize] {
        self.children.get(pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of ancestors of `pos`, 0 for roots
    pub fn depth(&self, pos: usize) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(pos);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    /// All positions, parents always before their replies, siblings in arrival order
    pub fn preorder(&self) -> Vec<usize> {
        let mut res = Vec::with_capacity(self.len());
        let mut stack = self.roots.iter().rev().copied().collect::<Vec<_>>();
        while let Some(pos) = stack.pop() {
            res.push(pos);
            stack.extend(self.children[pos].iter().rev().copied());
        }
        res
    }
}

// A well-behaved server only lets comments reply to earlier ones, so this never
// triggers outside of corrupted input. Each cycle loses the link of its
// earliest-arriving member, which becomes a root.
fn break_cycles(comments: &[Comment], parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::Unseen; parents.len()];
    let mut path = Vec::new();
    for start in 0..parents.len() {
        let mut cur = Some(start);
        while let Some(pos) = cur {
            match state[pos] {
                Visit::Unseen => {
                    state[pos] = Visit::OnPath;
                    path.push(pos);
                    cur = parents[pos];
                }
                Visit::OnPath => {
                    let cycle_start = path.iter().position(|p| *p == pos).unwrap_or(0);
                    if let Some(new_root) = path[cycle_start..].iter().copied().min() {
                        tracing::warn!(
                            comment = ?comments[new_root].id,
                            cycle_len = path.len() - cycle_start,
                            "reply cycle detected, placing its earliest comment at the root"
                        );
                        parents[new_root] = None;
                    }
                    break;
                }
                Visit::Done => break,
            }
        }
        for pos in path.drain(..) {
            state[pos] = Visit::Done;
        }
    }
}
