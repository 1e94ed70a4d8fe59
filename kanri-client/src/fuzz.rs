#![cfg(test)]

use std::collections::{HashMap, HashSet};

use crate::{
    api::{Comment, CommentId, MemberId, ReactionKind},
    build_tree, CommentNode, ReactionOverlay, Walk,
};

// Ids are kept in a small range so that generated threads often hit duplicate ids,
// dangling parents, self-replies and cycles. The body records the arrival position.
fn comments(layout: &[(u8, Option<u8>)]) -> Vec<Comment> {
    layout.iter()
        .enumerate()
        .map(|(pos, (id, parent))| {
            let mut c = Comment::stub(
                CommentId(i64::from(*id % 32)),
                parent.map(|p| CommentId(i64::from(p % 32))),
            );
            c.body = pos.to_string();
            c
        })
        .collect()
}

fn pos(n: &CommentNode) -> usize {
    n.comment.body.parse().expect("body is not a position")
}

fn is_increasing(nodes: &[CommentNode]) -> bool {
    nodes.windows(2).all(|w| pos(&w[0]) < pos(&w[1]))
}

fn reaction_kind(heart: bool) -> ReactionKind {
    match heart {
        true => ReactionKind::Heart,
        false => ReactionKind::Like,
    }
}

#[test]
fn fuzz_build_tree_is_a_forest() {
    bolero::check!()
        .with_type::<Vec<(u8, Option<u8>)>>()
        .cloned()
        .for_each(|layout| {
            let comments = comments(&layout);
            let ids = comments.iter().map(|c| c.id).collect::<HashSet<_>>();
            let forest = build_tree(&comments, &ReactionOverlay::new());

            // every record is found exactly once
            let mut seen = Walk::forest(&forest).map(|(_, n)| pos(n)).collect::<Vec<_>>();
            seen.sort_unstable();
            assert_eq!(seen, (0..comments.len()).collect::<Vec<_>>());

            assert!(is_increasing(&forest));
            for (_, n) in Walk::forest(&forest) {
                assert!(is_increasing(&n.replies));
                for r in &n.replies {
                    assert_eq!(r.comment.parent_comment_id, Some(n.comment.id));
                    assert_ne!(r.comment.id, n.comment.id);
                }
            }

            // comments without a usable parent are roots
            let roots = forest.iter().map(pos).collect::<HashSet<_>>();
            for (p, c) in comments.iter().enumerate() {
                match c.parent_comment_id {
                    Some(parent) if parent != c.id && ids.contains(&parent) => (),
                    _ => assert!(roots.contains(&p), "comment {p} should be a root"),
                }
            }
        })
}

#[test]
fn fuzz_build_tree_well_formed_threads() {
    // Each comment gets a unique id and may only reply to an earlier one, like the
    // server enforces
    bolero::check!()
        .with_type::<Vec<Option<u16>>>()
        .cloned()
        .for_each(|layout| {
            let comments = layout
                .iter()
                .enumerate()
                .map(|(p, parent)| {
                    let parent = parent
                        .filter(|_| p > 0)
                        .map(|par| CommentId((usize::from(par) % p) as i64));
                    let mut c = Comment::stub(CommentId(p as i64), parent);
                    c.body = p.to_string();
                    c
                })
                .collect::<Vec<_>>();
            let forest = build_tree(&comments, &ReactionOverlay::new());
            for root in &forest {
                assert_eq!(root.comment.parent_comment_id, None);
            }
            let mut count = 0;
            for (_, n) in Walk::forest(&forest) {
                count += 1;
                for r in &n.replies {
                    assert_eq!(r.comment.parent_comment_id, Some(n.comment.id));
                }
            }
            assert_eq!(count, comments.len());
        })
}

#[test]
fn fuzz_reaction_toggles() {
    bolero::check!()
        .with_type::<Vec<(u8, bool, u8)>>()
        .cloned()
        .for_each(|ops| {
            let mut overlay = ReactionOverlay::new();
            let mut model = HashMap::<(CommentId, ReactionKind), HashSet<MemberId>>::new();
            for (comment, heart, member) in ops {
                let comment = CommentId(i64::from(comment % 8));
                let kind = reaction_kind(heart);
                let member = MemberId(i64::from(member % 8));

                let before = overlay.clone();
                overlay.toggle(comment, kind, member);
                overlay.toggle(comment, kind, member);
                assert_eq!(overlay, before, "toggling twice must be a no-op");

                let toggle = overlay.toggle(comment, kind, member);
                let members = model.entry((comment, kind)).or_default();
                assert_eq!(toggle.now_reacted, members.insert(member));
                if !toggle.now_reacted {
                    members.remove(&member);
                }
                assert_eq!(overlay.count(&comment, kind), members.len());
                assert_eq!(
                    overlay.has_reacted(&comment, kind, &member),
                    toggle.now_reacted
                );
            }
            for ((comment, kind), members) in &model {
                assert_eq!(overlay.count(comment, *kind), members.len());
            }
            for c in overlay.dump() {
                assert!(!c.reactions.is_empty());
                assert!(c.reactions.iter().all(|r| !r.members.is_empty()));
            }
        })
}
