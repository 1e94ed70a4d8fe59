mod comment;
pub use comment::{build_tree, CommentNode, Walk};

mod index;
pub use index::ThreadIndex;

mod reactions;
pub use reactions::ReactionOverlay;

mod thread;
pub use thread::CommentThread;

#[cfg(test)]
mod fuzz;

pub mod api {
    pub use kanri_api::*;
}
