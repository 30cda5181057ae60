//! Aggregation engine
//!
//! Combines the paged per-type counts of a parent with the set of types the
//! requester applied. The two reads are independent queries of different
//! shape and run concurrently; neither is derived from the other.

use std::collections::BTreeSet;

use agora_core::{EntityId, PageRequest, ParentRef, ReactionType, ReactionsView};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::timeout::bounded;

/// Reads the count projection and the ledger for one parent
pub struct ReactionAggregator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionAggregator<'a> {
    /// Create a new ReactionAggregator
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the view of `parent` for `requester_id`
    ///
    /// Counts are ordered by reaction type before the page window is applied,
    /// so identical input always yields the same page. The requester's own
    /// types are never paginated.
    #[instrument(skip(self, parent), fields(parent = %parent))]
    pub async fn aggregate(
        &self,
        parent: ParentRef,
        requester_id: Option<EntityId>,
        page: PageRequest,
    ) -> ServiceResult<ReactionsView> {
        let timeout = self.ctx.storage_timeout();

        let counts = bounded(
            timeout,
            "counts_by_parent",
            self.ctx.reaction_projection().counts_by_parent(parent),
        );
        let mine = async {
            match requester_id {
                Some(reactor_id) => {
                    bounded(
                        timeout,
                        "reactions_by_user",
                        self.ctx.reaction_ledger().reactions_by_user(parent, reactor_id),
                    )
                    .await
                }
                None => Ok(BTreeSet::<ReactionType>::new()),
            }
        };

        let (mut counts, mine) = tokio::try_join!(counts, mine)?;

        counts.retain(|row| row.count > 0);
        counts.sort_by(|a, b| a.reaction_type.cmp(&b.reaction_type));
        let total_types = counts.len();
        let counts = page.slice(&counts).to_vec();

        debug!(
            total_types,
            returned = counts.len(),
            mine = mine.len(),
            "Aggregated reactions"
        );

        Ok(ReactionsView {
            counts,
            reactions: mine.into_iter().collect(),
        })
    }
}
