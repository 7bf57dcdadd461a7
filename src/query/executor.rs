use crate::entity::{Identifiable, SearchAdapter};
use crate::error::{BackendError, Result, SearchError};
use crate::query::planner::{SearchPlan, SearchRequest};
use crate::store::SearchBackend;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, warn};

/// One page of ranked records plus the unpaginated match count
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    pub records: Vec<T>,
    pub total_count: u64,
}

impl<T> SearchResult<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Runs searches for one adapter against one backend
pub struct SearchExecutor<'a, A, B> {
    adapter: &'a A,
    backend: &'a B,
}

impl<'a, A, B> SearchExecutor<'a, A, B>
where
    A: SearchAdapter,
    B: SearchBackend<A>,
{
    pub fn new(adapter: &'a A, backend: &'a B) -> Self {
        Self { adapter, backend }
    }

    /// Execute a search and return a ranked page with its total count.
    ///
    /// Invalid requests fail before the backend is touched. Backend errors are
    /// returned as [`SearchError::Backend`] with the original error as source.
    pub fn execute(&self, request: &SearchRequest) -> Result<SearchResult<A::Record>> {
        let plan = SearchPlan::build(self.adapter, request)?;
        self.execute_plan(&plan)
    }

    /// Execute an already validated plan
    pub fn execute_plan(&self, plan: &SearchPlan<A::Field>) -> Result<SearchResult<A::Record>> {
        let exact = self.backend.fetch(&plan.exact).map_err(|e| self.backend_error("exact", e))?;
        let partial = self
            .backend
            .fetch(&plan.partial)
            .map_err(|e| self.backend_error("partial", e))?;
        let total_count = self
            .backend
            .count(&plan.count)
            .map_err(|e| self.backend_error("count", e))?;

        debug!(
            entity = self.adapter.name(),
            exact = exact.len(),
            partial = partial.len(),
            total_count,
            "Executed search"
        );

        Ok(SearchResult {
            records: merge_ranked(exact, partial),
            total_count,
        })
    }

    fn backend_error(&self, pass: &'static str, error: BackendError) -> SearchError {
        warn!(entity = self.adapter.name(), pass, %error, "Backing store query failed");
        SearchError::Backend(error)
    }
}

/// Append `partial` to `exact`, skipping records whose id is already present.
/// Relative order within each list is kept.
pub fn merge_ranked<T: Identifiable>(exact: Vec<T>, partial: Vec<T>) -> Vec<T> {
    let mut seen: FxHashSet<u64> = FxHashSet::default();
    let mut merged = Vec::with_capacity(exact.len() + partial.len());

    for record in exact.into_iter().chain(partial) {
        if seen.insert(record.id()) {
            merged.push(record);
        }
    }

    merged
}
