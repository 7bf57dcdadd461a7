use crate::entity::{start_of_day, SearchAdapter};
use crate::error::InvalidRequest;
use crate::query::predicate::{Literal, Predicate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attribute constraints applied independently of the query string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Seller business type (case-insensitive equality)
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Inclusive lower bound on closing time, from the start of this day
    #[serde(default)]
    pub earliest_closing_date: Option<NaiveDate>,
    /// Inclusive upper bound on closing time, at the start of this day
    #[serde(default)]
    pub latest_closing_date: Option<NaiveDate>,
}

/// Filter dimensions an adapter may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    BusinessType,
    Price,
    ClosingDate,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::BusinessType => "Business type",
            FilterField::Price => "Price",
            FilterField::ClosingDate => "Closing date",
        }
    }
}

impl FilterSpec {
    /// Check if any filter is set
    pub fn has_any(&self) -> bool {
        self.business_type.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.earliest_closing_date.is_some()
            || self.latest_closing_date.is_some()
    }

    /// Parse a `YYYY-MM-DD` date; blank input means no bound
    pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, InvalidRequest> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| InvalidRequest::InvalidDate(value.to_string()))
    }

    /// Reject inverted ranges and negative prices
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if let (Some(earliest), Some(latest)) = (self.earliest_closing_date, self.latest_closing_date) {
            if latest < earliest {
                return Err(InvalidRequest::ClosingDateRange);
            }
        }

        // NaN fails the comparison and is rejected with the negatives
        let non_negative = |price: Option<f64>| price.is_none_or(|p| p >= 0.0);
        if !non_negative(self.min_price) || !non_negative(self.max_price) {
            return Err(InvalidRequest::NegativePrice);
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if max < min {
                return Err(InvalidRequest::PriceRange);
            }
        }

        Ok(())
    }

    /// Filters that are set, in the order they are applied
    pub fn requested_fields(&self) -> Vec<FilterField> {
        let mut fields = Vec::new();
        if self.business_type.is_some() {
            fields.push(FilterField::BusinessType);
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            fields.push(FilterField::Price);
        }
        if self.earliest_closing_date.is_some() || self.latest_closing_date.is_some() {
            fields.push(FilterField::ClosingDate);
        }
        fields
    }

    /// Build the filter predicate for `adapter`.
    ///
    /// Starts from the adapter's standing filter and ANDs in one condition per
    /// present field. Fails if a present field has no attribute on this entity.
    pub fn compose<A: SearchAdapter>(&self, adapter: &A) -> Result<Predicate<A::Field>, InvalidRequest> {
        let attribute = |filter: FilterField| {
            adapter.filter_field(filter).ok_or(InvalidRequest::UnsupportedFilter {
                entity: adapter.name(),
                filter: filter.label(),
            })
        };

        let mut predicate = adapter.standing_filter();

        if let Some(business_type) = &self.business_type {
            let field = attribute(FilterField::BusinessType)?;
            predicate = predicate.and(Predicate::equals_ignore_case(field, business_type));
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let field = attribute(FilterField::Price)?;
            if let Some(min) = self.min_price {
                predicate = predicate.and(Predicate::AtLeast {
                    field,
                    value: Literal::Number(min),
                });
            }
            if let Some(max) = self.max_price {
                predicate = predicate.and(Predicate::AtMost {
                    field,
                    value: Literal::Number(max),
                });
            }
        }

        if self.earliest_closing_date.is_some() || self.latest_closing_date.is_some() {
            let field = attribute(FilterField::ClosingDate)?;
            if let Some(earliest) = self.earliest_closing_date {
                predicate = predicate.and(Predicate::AtLeast {
                    field,
                    value: Literal::Time(start_of_day(earliest)),
                });
            }
            if let Some(latest) = self.latest_closing_date {
                predicate = predicate.and(Predicate::AtMost {
                    field,
                    value: Literal::Time(start_of_day(latest)),
                });
            }
        }

        Ok(predicate)
    }
}
