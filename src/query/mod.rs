pub mod executor;
pub mod filter;
pub mod planner;
pub mod predicate;
pub mod sort;
pub mod tokenizer;

pub use executor::{merge_ranked, SearchExecutor, SearchResult};
pub use filter::{FilterField, FilterSpec};
pub use planner::{SearchPlan, SearchRequest};
pub use predicate::{build_match_predicate, Literal, MatchMode, Predicate, SortKey, Value};
pub use sort::{Ordering, PageWindow, SortDirection};
pub use tokenizer::{tokenize, Operator, SearchToken};
