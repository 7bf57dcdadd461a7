//! Boolean predicates over entity attributes.
//!
//! [`Predicate`] is the query-builder capability the engine needs from a
//! backing store: conjunction, disjunction, negation, case-insensitive
//! equality and substring tests, and inclusive range bounds. Any store that
//! can evaluate these nodes can serve a search.

use crate::entity::SearchAdapter;
use crate::query::tokenizer::{Operator, SearchToken};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// An attribute value read from a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(Option<&'a str>),
    Number(f64),
    Integer(i64),
    /// Record identity, kept unsigned so the full id range orders correctly
    Id(u64),
    Time(Option<NaiveDateTime>),
    Bool(bool),
}

impl<'a> Value<'a> {
    /// Total order used for sorting. Missing values sort first, text compares
    /// case-insensitively. Values of different kinds compare equal.
    pub fn sort_cmp(&self, other: &Value<'_>) -> Ordering {
        self.sort_key().compare(&other.sort_key())
    }

    /// Comparison form of this value with text lowercased once up front
    pub fn sort_key(self) -> SortKey<'a> {
        match self {
            Value::Text(text) => SortKey::Text(text.map(str::to_lowercase)),
            other => SortKey::Plain(other),
        }
    }

    /// Compare against a literal bound; `None` when the kinds differ or the
    /// value is missing.
    fn cmp_literal(&self, literal: &Literal) -> Option<Ordering> {
        match (self, literal) {
            (Value::Number(a), Literal::Number(b)) => a.partial_cmp(b),
            (Value::Integer(a), Literal::Number(b)) => (*a as f64).partial_cmp(b),
            (Value::Id(a), Literal::Number(b)) => (*a as f64).partial_cmp(b),
            (Value::Time(Some(a)), Literal::Time(b)) => Some(a.cmp(b)),
            (Value::Text(Some(a)), Literal::Text(b)) => Some(a.to_lowercase().cmp(&b.to_lowercase())),
            (Value::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Precomputed sort key for one attribute of one record
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey<'a> {
    Text(Option<String>),
    Plain(Value<'a>),
}

impl SortKey<'_> {
    pub fn compare(&self, other: &SortKey<'_>) -> Ordering {
        match (self, other) {
            (SortKey::Text(Some(a)), SortKey::Text(Some(b))) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.is_some().cmp(&b.is_some()),
            (SortKey::Plain(a), SortKey::Plain(b)) => match (a, b) {
                (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
                (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
                (Value::Id(a), Value::Id(b)) => a.cmp(b),
                (Value::Time(a), Value::Time(b)) => a.cmp(b),
                (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
                _ => Ordering::Equal,
            },
            _ => Ordering::Equal,
        }
    }
}

/// Owned comparand for range predicates
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Number(f64),
    Time(NaiveDateTime),
    Bool(bool),
}

/// Boolean condition over the attributes `F` of one entity kind
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<F> {
    /// Matches everything (conjunction identity)
    True,
    And(Box<Predicate<F>>, Box<Predicate<F>>),
    Or(Box<Predicate<F>>, Box<Predicate<F>>),
    Not(Box<Predicate<F>>),
    /// Full-string equality, ignoring case. `term` is stored lowercased.
    EqualsIgnoreCase { field: F, term: String },
    /// Substring containment, ignoring case. `term` is stored lowercased.
    ContainsIgnoreCase { field: F, term: String },
    /// `field >= value`
    AtLeast { field: F, value: Literal },
    /// `field <= value`
    AtMost { field: F, value: Literal },
    /// Boolean attribute is set
    IsTrue(F),
}

impl<F: Copy> Predicate<F> {
    pub fn equals_ignore_case(field: F, term: &str) -> Self {
        Predicate::EqualsIgnoreCase {
            field,
            term: term.to_lowercase(),
        }
    }

    pub fn contains_ignore_case(field: F, term: &str) -> Self {
        Predicate::ContainsIgnoreCase {
            field,
            term: term.to_lowercase(),
        }
    }

    /// Conjunction. `True` is dropped from either side.
    pub fn and(self, other: Predicate<F>) -> Self {
        match (self, other) {
            (Predicate::True, p) | (p, Predicate::True) => p,
            (a, b) => Predicate::And(Box::new(a), Box::new(b)),
        }
    }

    /// Disjunction. `True` on either side absorbs the other.
    pub fn or(self, other: Predicate<F>) -> Self {
        match (self, other) {
            (Predicate::True, _) | (_, Predicate::True) => Predicate::True,
            (a, b) => Predicate::Or(Box::new(a), Box::new(b)),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// OR together a list of predicates; an empty list yields `True`.
    pub fn any(predicates: impl IntoIterator<Item = Predicate<F>>) -> Self {
        let mut iter = predicates.into_iter();
        match iter.next() {
            Some(first) => iter.fold(first, Predicate::or),
            None => Predicate::True,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    /// Evaluate against a record whose attributes are read through `lookup`
    pub fn evaluate<'v>(&self, lookup: &impl Fn(F) -> Value<'v>) -> bool {
        match self {
            Predicate::True => true,
            Predicate::And(a, b) => a.evaluate(lookup) && b.evaluate(lookup),
            Predicate::Or(a, b) => a.evaluate(lookup) || b.evaluate(lookup),
            Predicate::Not(inner) => !inner.evaluate(lookup),
            Predicate::EqualsIgnoreCase { field, term } => match lookup(*field) {
                Value::Text(Some(text)) => text.to_lowercase() == *term,
                _ => false,
            },
            Predicate::ContainsIgnoreCase { field, term } => match lookup(*field) {
                Value::Text(Some(text)) => text.to_lowercase().contains(term.as_str()),
                _ => false,
            },
            Predicate::AtLeast { field, value } => matches!(
                lookup(*field).cmp_literal(value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Predicate::AtMost { field, value } => matches!(
                lookup(*field).cmp_literal(value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Predicate::IsTrue(field) => matches!(lookup(*field), Value::Bool(true)),
        }
    }
}

/// Whether bare tokens match whole attribute values or substrings of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Partial,
}

/// Build the match predicate for a token sequence.
///
/// A single left fold starting from `True`. Unquoted `and`/`or` tokens set
/// the operator used to join the next term and contribute nothing else; the
/// operator resets to AND after every term. A trailing operator is a no-op.
/// Quoted tokens always use the adapter's exact predicate.
pub fn build_match_predicate<A: SearchAdapter>(
    tokens: &[SearchToken],
    mode: MatchMode,
    adapter: &A,
) -> Predicate<A::Field> {
    let (predicate, _pending) = tokens.iter().fold(
        (Predicate::True, Operator::And),
        |(acc, pending), token| {
            if let Some(op) = token.operator() {
                return (acc, op);
            }

            let term = token.term.to_lowercase();
            let term_predicate = if mode == MatchMode::Exact || token.in_quotes {
                adapter.exact_predicate(&term)
            } else {
                adapter.partial_predicate(&term)
            };

            let joined = match pending {
                Operator::And => acc.and(term_predicate),
                Operator::Or => acc.or(term_predicate),
            };
            (joined, Operator::And)
        },
    );

    predicate
}
