use crate::entity::SearchAdapter;
use crate::error::BackendError;
use crate::query::predicate::Predicate;
use crate::store::{RecordQuery, SearchBackend};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// In-memory record store that evaluates predicates directly
#[derive(Debug, Clone)]
pub struct MemoryStore<A: SearchAdapter> {
    adapter: A,
    records: Vec<A::Record>,
}

impl<A: SearchAdapter> MemoryStore<A> {
    pub fn new(adapter: A, records: Vec<A::Record>) -> Self {
        Self { adapter, records }
    }

    /// Load records from a JSON file holding an array of records
    pub fn from_json_file(adapter: A, path: &Path) -> anyhow::Result<Self>
    where
        A::Record: DeserializeOwned,
    {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {}", path.display()))?;
        let records: Vec<A::Record> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} records from {}", adapter.name(), path.display()))?;
        Ok(Self::new(adapter, records))
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn records(&self) -> &[A::Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching<'s>(&'s self, predicate: &'s Predicate<A::Field>) -> impl Iterator<Item = &'s A::Record> + 's {
        self.records
            .iter()
            .filter(move |record| predicate.evaluate(&|field| self.adapter.value(record, field)))
    }
}

impl<A: SearchAdapter> SearchBackend<A> for MemoryStore<A> {
    fn fetch(&self, query: &RecordQuery<A::Field>) -> Result<Vec<A::Record>, BackendError> {
        let ordering = &query.ordering;
        let mut keyed: Vec<_> = self
            .matching(&query.predicate)
            .map(|record| {
                let primary = self.adapter.value(record, ordering.column).sort_key();
                let tie_break = self.adapter.value(record, ordering.tie_break).sort_key();
                (primary, tie_break, record)
            })
            .collect();

        keyed.sort_by(|(primary_a, tie_a, _), (primary_b, tie_b, _)| {
            ordering
                .direction
                .apply(primary_a.compare(primary_b))
                .then_with(|| tie_a.compare(tie_b))
        });

        Ok(query.window.apply(keyed.into_iter().map(|(_, _, record)| record.clone())))
    }

    fn count(&self, predicate: &Predicate<A::Field>) -> Result<u64, BackendError> {
        Ok(self.matching(predicate).count() as u64)
    }
}
