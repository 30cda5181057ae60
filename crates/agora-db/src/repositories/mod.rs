//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in agora-core.

mod error;
mod post;
mod reaction_ledger;
mod reaction_projection;

pub use post::PgPostRepository;
pub use reaction_ledger::PgReactionLedger;
pub use reaction_projection::PgReactionProjection;
