//! # marketsearch - Tokenized marketplace search
//!
//! Turns a free-text query into boolean match predicates, runs an exact and
//! a partial pass against a backing store, and merges the two so exact
//! matches always rank first.
//!
//! ## Architecture
//!
//! - [`query`] - Tokenizing, predicate building, filters, planning and execution
//! - [`entity`] - Users, businesses and sale listings with their search adapters
//! - [`store`] - The backing store interface and an in-memory implementation
//! - [`error`] - Validation and backend error types
//! - [`config`] - Persisted command line defaults
//!
//! ## Quick Start
//!
//! ```
//! use marketsearch::entity::{Address, Business, BusinessSearch};
//! use marketsearch::query::{SearchExecutor, SearchRequest};
//! use marketsearch::store::MemoryStore;
//! use chrono::NaiveDate;
//!
//! let business = |id, name: &str| Business {
//!     id,
//!     name: name.to_string(),
//!     description: None,
//!     business_type: "Retail Trade".to_string(),
//!     address: Address::default(),
//!     registration_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//! };
//! let store = MemoryStore::new(BusinessSearch, vec![business(1, "UC"), business(2, "UC Library")]);
//!
//! let executor = SearchExecutor::new(&BusinessSearch, &store);
//! let result = executor.execute(&SearchRequest::new("UC")).unwrap();
//!
//! assert_eq!(result.records[0].name, "UC");
//! assert_eq!(result.total_count, 2);
//! ```

pub mod config;
pub mod entity;
pub mod error;
#[cfg(feature = "cli")]
pub mod output;
pub mod query;
pub mod store;

pub use error::{InvalidRequest, Result, SearchError};
