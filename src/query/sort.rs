use crate::entity::SearchAdapter;
use crate::error::InvalidRequest;
use std::cmp;

/// Sort direction for the primary ordering column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Parse `asc` / `desc`, ignoring case. Blank or absent means descending.
    pub fn parse(value: Option<&str>) -> Result<Self, InvalidRequest> {
        let value = value.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Ok(SortDirection::default());
        }
        match value.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(InvalidRequest::UnknownOrder(value.to_string())),
        }
    }

    /// Apply this direction to an ascending comparison
    pub fn apply(self, ordering: cmp::Ordering) -> cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Result ordering: a primary column and an ascending identity tie-break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering<F> {
    pub column: F,
    pub direction: SortDirection,
    pub tie_break: F,
}

impl<F: Copy> Ordering<F> {
    /// Resolve a caller-supplied sort column and direction against the
    /// adapter's allow-list. A blank column selects the adapter default.
    pub fn resolve<A>(adapter: &A, sort_by: Option<&str>, order_by: Option<&str>) -> Result<Self, InvalidRequest>
    where
        A: SearchAdapter<Field = F>,
    {
        let sort_by = sort_by.map(str::trim).unwrap_or_default();
        let column = if sort_by.is_empty() {
            adapter.default_sort_column()
        } else {
            adapter
                .sort_column(sort_by)
                .ok_or_else(|| InvalidRequest::UnknownSortColumn {
                    entity: adapter.name(),
                    column: sort_by.to_string(),
                })?
        };

        Ok(Ordering {
            column,
            direction: SortDirection::parse(order_by)?,
            tie_break: adapter.identity_field(),
        })
    }
}

/// Offset/limit slice of an ordered result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    /// Convert a 1-based page number and page size into an offset/limit pair
    pub fn from_page(page: i64, per_page: i64) -> Result<Self, InvalidRequest> {
        if page < 1 {
            return Err(InvalidRequest::PageNumber(page));
        }
        if per_page < 1 {
            return Err(InvalidRequest::PageSize(per_page));
        }

        let page = usize::try_from(page - 1).unwrap_or(usize::MAX);
        let limit = usize::try_from(per_page).unwrap_or(usize::MAX);
        Ok(PageWindow {
            offset: page.saturating_mul(limit),
            limit,
        })
    }

    /// Slice `items` to this window
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}
