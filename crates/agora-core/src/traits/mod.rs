//! Repository traits (ports)

mod repositories;

pub use repositories::{PostRepository, ReactionLedger, ReactionProjection, RepoResult};
