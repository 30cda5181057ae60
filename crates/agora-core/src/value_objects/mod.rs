//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod entity_id;
mod requester;

pub use capabilities::Capabilities;
pub use entity_id::{EntityId, IdParseError};
pub use requester::{RequesterContext, Role};
