//! In-memory reaction count projection

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use agora_core::{ParentRef, ReactionCount, ReactionProjection, ReactionType, RepoResult};

/// Per-type counts grouped by parent; zero counts are never stored
#[derive(Debug, Default)]
pub struct MemoryReactionProjection {
    counts: DashMap<ParentRef, BTreeMap<ReactionType, i64>>,
}

impl MemoryReactionProjection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReactionProjection for MemoryReactionProjection {
    async fn counts_by_parent(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>> {
        let Some(counts) = self.counts.get(&parent) else {
            return Ok(Vec::new());
        };

        Ok(counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(reaction_type, count)| ReactionCount::new(reaction_type.clone(), *count))
            .collect())
    }

    async fn set_count(
        &self,
        parent: ParentRef,
        reaction_type: &ReactionType,
        count: i64,
    ) -> RepoResult<()> {
        let mut counts = self.counts.entry(parent).or_default();
        if count > 0 {
            counts.insert(reaction_type.clone(), count);
        } else {
            counts.remove(reaction_type);
        }
        Ok(())
    }

    async fn replace(&self, parent: ParentRef, counts: &[ReactionCount]) -> RepoResult<()> {
        let rows: BTreeMap<ReactionType, i64> = counts
            .iter()
            .filter(|row| row.count > 0)
            .map(|row| (row.reaction_type.clone(), row.count))
            .collect();
        self.counts.insert(parent, rows);
        Ok(())
    }

    async fn clear(&self, parent: ParentRef) -> RepoResult<()> {
        self.counts.remove(&parent);
        Ok(())
    }
}
