//! Searchable entity kinds and their adapters.
//!
//! Each adapter tells the engine which attributes a token is matched against,
//! which columns may be sorted on, which filters apply, and how to reach an
//! attribute through related records.
//!
//! - [`user`] - people, matched by name and nickname
//! - [`business`] - businesses, matched by name
//! - [`listing`] - sale listings, matched by seller, product and location

pub mod business;
pub mod listing;
pub mod user;

pub use business::{Address, Business, BusinessSearch};
pub use listing::{InventoryItem, ListingSearch, Product, SaleListing};
pub use user::{User, UserSearch};

use crate::query::filter::FilterField;
use crate::query::predicate::{Predicate, Value};
use std::fmt::Debug;

/// Stable identity used to de-duplicate exact and partial results
pub trait Identifiable {
    fn id(&self) -> u64;
}

/// Per-entity search capability
pub trait SearchAdapter {
    type Record: Identifiable + Clone;
    type Field: Copy + Eq + Debug + 'static;

    /// Entity name used in messages and logs
    fn name(&self) -> &'static str;

    /// Attributes a token is matched against
    fn searchable_fields(&self) -> &'static [Self::Field];

    /// Token equals one of the searchable attributes, ignoring case
    fn exact_predicate(&self, term: &str) -> Predicate<Self::Field> {
        Predicate::any(
            self.searchable_fields()
                .iter()
                .map(|&field| Predicate::equals_ignore_case(field, term)),
        )
    }

    /// Token is a substring of one of the searchable attributes, ignoring case
    fn partial_predicate(&self, term: &str) -> Predicate<Self::Field> {
        Predicate::any(
            self.searchable_fields()
                .iter()
                .map(|&field| Predicate::contains_ignore_case(field, term)),
        )
    }

    /// Sort column names accepted from callers, with the attribute each sorts by
    fn sortable_columns(&self) -> &'static [(&'static str, Self::Field)];

    /// Resolve a caller-supplied sort column
    fn sort_column(&self, name: &str) -> Option<Self::Field> {
        self.sortable_columns()
            .iter()
            .find(|(column, _)| *column == name)
            .map(|&(_, field)| field)
    }

    /// Column used when the caller gives none
    fn default_sort_column(&self) -> Self::Field;

    /// Immutable identity column used as the ordering tie-break
    fn identity_field(&self) -> Self::Field;

    /// Attribute a filter constrains, if this entity supports it
    fn filter_field(&self, filter: FilterField) -> Option<Self::Field>;

    /// Condition applied to every search regardless of the request
    fn standing_filter(&self) -> Predicate<Self::Field> {
        Predicate::True
    }

    /// Read an attribute, following relations as needed
    fn value<'r>(&self, record: &'r Self::Record, field: Self::Field) -> Value<'r>;
}

/// Start-of-day timestamp for date-valued attributes
pub(crate) fn start_of_day(date: chrono::NaiveDate) -> chrono::NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}
