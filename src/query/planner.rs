use crate::entity::SearchAdapter;
use crate::error::InvalidRequest;
use crate::query::filter::FilterSpec;
use crate::query::predicate::{build_match_predicate, MatchMode, Predicate};
use crate::query::sort::{Ordering, PageWindow};
use crate::query::tokenizer::{tokenize, SearchToken};
use crate::store::RecordQuery;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, trace};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Caller-supplied search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub query: String,
    pub filters: FilterSpec,
    /// 1-based page number
    pub page: i64,
    pub per_page: i64,
    /// Sort column name from the adapter's allow-list; blank means `created`
    pub sort_by: Option<String>,
    /// `asc` or `desc`; blank means `desc`
    pub order_by: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: FilterSpec::default(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: None,
            order_by: None,
        }
    }
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>) -> Self {
        self.sort_by = Some(column.into());
        self
    }

    pub fn order_by(mut self, direction: impl Into<String>) -> Self {
        self.order_by = Some(direction.into());
        self
    }

    pub fn filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }
}

/// Validated, backend-ready form of a [`SearchRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan<F> {
    pub tokens: Vec<SearchToken>,
    /// Exact-match predicate AND filters, ordered and windowed
    pub exact: RecordQuery<F>,
    /// Partial-match predicate AND filters, same ordering and window
    pub partial: RecordQuery<F>,
    /// Predicate behind the total count (partial AND filters, no window)
    pub count: Predicate<F>,
}

impl<F: Copy + Debug> SearchPlan<F> {
    /// Validate `request` against `adapter` and build the three queries.
    ///
    /// Every check runs before anything is returned, so an `Err` here means
    /// no backend work was described at all.
    pub fn build<A>(adapter: &A, request: &SearchRequest) -> Result<Self, InvalidRequest>
    where
        A: SearchAdapter<Field = F>,
    {
        request.filters.validate()?;
        let window = PageWindow::from_page(request.page, request.per_page)?;
        let ordering = Ordering::resolve(
            adapter,
            request.sort_by.as_deref(),
            request.order_by.as_deref(),
        )?;
        let filters = request.filters.compose(adapter)?;

        let tokens = tokenize(&request.query);
        let exact = build_match_predicate(&tokens, MatchMode::Exact, adapter).and(filters.clone());
        let partial = build_match_predicate(&tokens, MatchMode::Partial, adapter).and(filters);

        debug!(
            entity = adapter.name(),
            tokens = tokens.len(),
            filters = ?request.filters.requested_fields(),
            offset = window.offset,
            limit = window.limit,
            "Planned search"
        );
        trace!(?exact, ?partial, "Match predicates");

        Ok(SearchPlan {
            tokens,
            exact: RecordQuery {
                predicate: exact,
                ordering,
                window,
            },
            partial: RecordQuery {
                predicate: partial.clone(),
                ordering,
                window,
            },
            count: partial,
        })
    }
}
