//! Access policy - pure authorization decisions over requester and parent

mod access;

pub use access::AccessPolicy;
