//! Capability bitflags granted to a requester by its role

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// What a requester may do with content, independent of any one parent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Read community posts
        const VIEW_COMMUNITY   = 1 << 0;
        /// Read mentor news posts
        const VIEW_MENTOR_NEWS = 1 << 1;
        /// Add and remove own reactions
        const REACT            = 1 << 2;
        /// Clear reactions on content authored by others
        const MODERATE         = 1 << 3;

        /// Regular signed-in member
        const MEMBER = Self::VIEW_COMMUNITY.bits() | Self::REACT.bits();

        /// Member who can also read mentor news
        const MENTOR = Self::MEMBER.bits() | Self::VIEW_MENTOR_NEWS.bits();

        /// Every capability
        const ALL = Self::MENTOR.bits() | Self::MODERATE.bits();
    }
}

impl Capabilities {
    /// Check if the set contains a required capability
    #[inline]
    pub fn has(&self, capability: Capabilities) -> bool {
        self.contains(capability)
    }

    /// Names of the individual capabilities that are set
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.list().join("|"))
    }
}
