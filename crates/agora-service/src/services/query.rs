//! Reaction query service (read path)
//!
//! One request walks `Start -> AccessChecked -> Paginated -> Aggregated ->
//! Done`. Any step may end in `Rejected` (authorization) or `Failed`
//! (validation or storage). Access is decided before the page parameters are
//! looked at, so a caller without rights learns nothing from validation
//! messages.

use std::fmt;

use agora_core::{PageRequest, ParentRef, ReactionsView, RequesterContext};
use tracing::{debug, instrument, warn};

use super::access::AccessService;
use super::aggregation::ReactionAggregator;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Progress of a single reaction query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    Start,
    AccessChecked,
    Paginated,
    Aggregated,
    Done,
    Rejected,
    Failed,
}

impl QueryStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::AccessChecked => "access_checked",
            Self::Paginated => "paginated",
            Self::Aggregated => "aggregated",
            Self::Done => "done",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transition can happen
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Rejected | Self::Failed)
    }

    /// Terminal stage an error ends the query in
    fn for_error(err: &ServiceError) -> Self {
        if err.is_unauthorized() {
            Self::Rejected
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records stage transitions of one query
struct StageTracker {
    parent: ParentRef,
    stage: QueryStage,
}

impl StageTracker {
    fn start(parent: ParentRef) -> Self {
        Self {
            parent,
            stage: QueryStage::Start,
        }
    }

    fn advance(&mut self, next: QueryStage) {
        debug_assert!(!self.stage.is_terminal(), "query already ended: {}", self.stage);
        debug!(parent = %self.parent, from = %self.stage, to = %next, "Query stage");
        self.stage = next;
    }

    /// Move to the terminal stage matching `err` and hand the error back
    fn fail(&mut self, err: ServiceError) -> ServiceError {
        debug_assert!(!self.stage.is_terminal(), "query already ended: {}", self.stage);
        let next = QueryStage::for_error(&err);
        warn!(parent = %self.parent, from = %self.stage, to = %next, error = %err, "Query ended");
        self.stage = next;
        err
    }
}

/// Reaction query service
pub struct ReactionQueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionQueryService<'a> {
    /// Create a new ReactionQueryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reaction counts and the requester's own reactions for a parent
    ///
    /// `page` and `per_page` are the raw caller values; they are validated
    /// only once the requester is known to be allowed to see the parent.
    #[instrument(skip(self, requester), fields(role = %requester.role))]
    pub async fn get_reactions(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
        page: Option<&str>,
        per_page: Option<&str>,
    ) -> ServiceResult<ReactionsView> {
        let mut tracker = StageTracker::start(parent);

        AccessService::new(self.ctx)
            .require_view(requester, parent)
            .await
            .map_err(|e| tracker.fail(e))?;
        tracker.advance(QueryStage::AccessChecked);

        let page = PageRequest::parse(page, per_page)
            .map_err(|e| tracker.fail(e.into()))?;
        tracker.advance(QueryStage::Paginated);

        let view = ReactionAggregator::new(self.ctx)
            .aggregate(parent, requester.user_id, page)
            .await
            .map_err(|e| tracker.fail(e))?;
        tracker.advance(QueryStage::Aggregated);

        tracker.advance(QueryStage::Done);
        Ok(view)
    }
}
