//! Model <-> entity mappers
//!
//! - `TryFrom<Model> for Entity`: rows are re-validated on the way in, a value
//!   outside the domain vocabulary is an internal error, not a caller error
//! - `*Insert` structs: borrow entity data in column form for writes

mod post;
mod reaction;

pub use reaction::{reaction_type_from_db, ReactionInsert};
