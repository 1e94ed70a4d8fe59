use std::path::{Path, PathBuf};

use anyhow::Context;
use kanri_api::{
    Comment, CommentId, CommentReactions, MemberId, ProjectId, ReactionKind, TaskId, ThreadOwner,
};
use kanri_client::{CommentThread, Walk};

#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
struct ThreadOpt {
    /// JSON file holding the flat list of comments
    comments: PathBuf,

    /// Project the comments belong to
    #[structopt(long, required_unless = "task", conflicts_with = "task")]
    project: Option<i64>,

    /// Task the comments belong to
    #[structopt(long)]
    task: Option<i64>,

    /// JSON file holding the reactions to layer over the comments
    #[structopt(short, long)]
    reactions: Option<PathBuf>,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Print the reply tree of a comment dump
    Tree {
        #[structopt(flatten)]
        thread: ThreadOpt,

        /// Print the tree as JSON instead of text
        #[structopt(long)]
        json: bool,
    },

    /// Toggle a member's reaction on a comment, saving it to the reactions file if any
    Toggle {
        #[structopt(flatten)]
        thread: ThreadOpt,

        #[structopt(long)]
        comment: i64,

        /// Reaction kind (like, heart)
        #[structopt(long)]
        kind: ReactionKind,

        /// Member reacting, defaults to KANRI_MEMBER_ID
        #[structopt(long)]
        member: Option<i64>,
    },
}

impl ThreadOpt {
    fn owner(&self) -> ThreadOwner {
        match (self.project, self.task) {
            (Some(p), _) => ThreadOwner::Project(ProjectId(p)),
            (None, t) => ThreadOwner::Task(TaskId(t.unwrap_or_default())),
        }
    }

    fn load(&self) -> anyhow::Result<CommentThread> {
        let data = std::fs::read(&self.comments)
            .with_context(|| format!("reading comments file {:?}", self.comments))?;
        let comments: Vec<Comment> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing comments file {:?}", self.comments))?;
        for c in comments.iter() {
            c.validate()
                .with_context(|| format!("validating comment {:?}", c.id))?;
        }
        let mut thread = CommentThread::new(self.owner(), comments);
        if let Some(path) = &self.reactions {
            thread.seed_reactions(load_reactions(path)?);
        }
        tracing::debug!(owner = ?thread.owner, num_comments = thread.len(), "loaded thread");
        Ok(thread)
    }
}

fn load_reactions(path: &Path) -> anyhow::Result<Vec<CommentReactions>> {
    if !path.exists() {
        tracing::info!(?path, "reactions file does not exist yet, starting without reactions");
        return Ok(Vec::new());
    }
    let data =
        std::fs::read(path).with_context(|| format!("reading reactions file {:?}", path))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing reactions file {:?}", path))
}

fn acting_member(member: Option<i64>) -> anyhow::Result<MemberId> {
    if let Some(m) = member {
        return Ok(MemberId(m));
    }
    let id = std::env::var("KANRI_MEMBER_ID")
        .context("no --member given, retrieving KANRI_MEMBER_ID environment variable")?;
    let id = id
        .parse()
        .with_context(|| format!("parsing KANRI_MEMBER_ID {id:?} as a member id"))?;
    Ok(MemberId(id))
}

fn print_tree(thread: &CommentThread) {
    let forest = thread.build_tree();
    for (depth, node) in Walk::forest(&forest) {
        let c = &node.comment;
        let mut line = format!(
            "{}#{} {}: {}",
            "  ".repeat(depth),
            c.id.0,
            c.author_name,
            c.body.replace('\n', " ")
        );
        if c.is_edited() {
            line.push_str(" (edited)");
        }
        if !node.reactions.is_empty() {
            let reactions = node
                .reactions
                .iter()
                .map(|r| format!("{} {}", r.kind, r.count()))
                .collect::<Vec<_>>();
            line.push_str(&format!(" [{}]", reactions.join(", ")));
        }
        println!("{line}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    match opt.cmd {
        Command::Tree { thread, json } => {
            let thread = thread.load()?;
            if json {
                let out = serde_json::to_string_pretty(&thread.build_tree())
                    .context("serializing comment tree")?;
                println!("{out}");
            } else {
                print_tree(&thread);
            }
        }
        Command::Toggle {
            thread: thread_opt,
            comment,
            kind,
            member,
        } => {
            let member = acting_member(member)?;
            let mut thread = thread_opt.load()?;
            let comment = CommentId(comment);
            if thread.comment(&comment).is_none() {
                tracing::warn!(?comment, "toggling a reaction on a comment absent from the dump");
            }
            let toggle = thread.toggle_reaction(comment, kind, member);
            if let Some(path) = &thread_opt.reactions {
                let data = serde_json::to_vec_pretty(&thread.reactions.dump())
                    .context("serializing reactions")?;
                std::fs::write(path, data)
                    .with_context(|| format!("writing reactions file {:?}", path))?;
            }
            let out = serde_json::to_string_pretty(&serde_json::json!({
                "toggle": toggle,
                "count": thread.reaction_count(&comment, kind),
            }))
            .context("serializing toggle result")?;
            println!("{out}");
        }
    }

    Ok(())
}
