//! In-memory reaction ledger

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use agora_core::{
    EntityId, ParentRef, Reaction, ReactionCount, ReactionLedger, ReactionType, RepoResult,
};

type ParentRows = BTreeMap<(EntityId, ReactionType), DateTime<Utc>>;

/// Ledger rows grouped by parent
#[derive(Debug, Default)]
pub struct MemoryReactionLedger {
    rows: DashMap<ParentRef, ParentRows>,
}

impl MemoryReactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows stored for a parent
    pub fn len_for(&self, parent: ParentRef) -> usize {
        self.rows.get(&parent).map_or(0, |rows| rows.len())
    }
}

#[async_trait]
impl ReactionLedger for MemoryReactionLedger {
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<bool> {
        let mut rows = self.rows.entry(reaction.parent).or_default();
        let key = (reaction.reactor_id, reaction.reaction_type.clone());

        let inserted = match rows.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(reaction.created_at);
                true
            }
            Entry::Occupied(_) => false,
        };
        debug!(parent = %reaction.parent, inserted, "ledger upsert");
        Ok(inserted)
    }

    async fn remove(
        &self,
        parent: ParentRef,
        reactor_id: EntityId,
        reaction_type: &ReactionType,
    ) -> RepoResult<bool> {
        let removed = self.rows.get_mut(&parent).is_some_and(|mut rows| {
            rows.remove(&(reactor_id, reaction_type.clone())).is_some()
        });
        Ok(removed)
    }

    async fn reactions_by_user(
        &self,
        parent: ParentRef,
        reactor_id: EntityId,
    ) -> RepoResult<BTreeSet<ReactionType>> {
        let Some(rows) = self.rows.get(&parent) else {
            return Ok(BTreeSet::new());
        };

        Ok(rows
            .keys()
            .filter(|(reactor, _)| *reactor == reactor_id)
            .map(|(_, reaction_type)| reaction_type.clone())
            .collect())
    }

    async fn count_of(&self, parent: ParentRef, reaction_type: &ReactionType) -> RepoResult<i64> {
        let Some(rows) = self.rows.get(&parent) else {
            return Ok(0);
        };
        Ok(rows.keys().filter(|(_, kind)| kind == reaction_type).count() as i64)
    }

    async fn count_by_type(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>> {
        let Some(rows) = self.rows.get(&parent) else {
            return Ok(Vec::new());
        };

        let mut counts: BTreeMap<&ReactionType, i64> = BTreeMap::new();
        for (_, reaction_type) in rows.keys() {
            *counts.entry(reaction_type).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(reaction_type, count)| ReactionCount::new(reaction_type.clone(), count))
            .collect())
    }

    async fn remove_all(&self, parent: ParentRef) -> RepoResult<u64> {
        Ok(self
            .rows
            .remove(&parent)
            .map_or(0, |(_, rows)| rows.len() as u64))
    }
}
