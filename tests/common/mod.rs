//! Record builders and instrumented backends shared by the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use marketsearch::entity::{
    Address, Business, InventoryItem, Product, SaleListing, SearchAdapter, User,
};
use marketsearch::error::BackendError;
use marketsearch::query::Predicate;
use marketsearch::store::{MemoryStore, RecordQuery, SearchBackend};
use std::cell::Cell;
use std::io;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, 0, 0).unwrap()
}

pub fn address(suburb: &str, city: &str, region: &str, country: &str) -> Address {
    Address {
        suburb: Some(suburb.to_string()),
        city: Some(city.to_string()),
        region: Some(region.to_string()),
        country: country.to_string(),
        ..Address::default()
    }
}

/// Business registered on day `id` of 2021 so the default ordering is by id descending
pub fn business(id: u64, name: &str) -> Business {
    Business {
        id,
        name: name.to_string(),
        description: None,
        business_type: "Retail Trade".to_string(),
        address: address("Ilam", "Christchurch", "Canterbury", "New Zealand"),
        registration_date: date(2021, 1, 1) + chrono::Days::new(id),
    }
}

pub fn businesses(names: &[&str]) -> Vec<Business> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| business(i as u64 + 1, name))
        .collect()
}

pub fn user(id: u64, first: &str, last: &str, nickname: Option<&str>) -> User {
    User {
        id,
        first_name: first.to_string(),
        middle_name: None,
        last_name: last.to_string(),
        nickname: nickname.map(str::to_string),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        role: "user".to_string(),
        created: date(2021, 6, 1) + chrono::Days::new(id),
    }
}

pub fn listing(id: u64, seller: &Business, product: &str, price: f64) -> SaleListing {
    SaleListing {
        id,
        inventory_item: InventoryItem {
            id,
            product: Product {
                id: product.to_uppercase().replace(' ', "-"),
                name: product.to_string(),
                manufacturer: None,
            },
            business: seller.clone(),
            quantity: 20,
            expires: date(2022, 12, 1),
        },
        quantity: 4,
        price,
        more_info: None,
        created: at(2022, 1, 1, 9) + chrono::Days::new(id),
        closes: None,
        sold: false,
    }
}

/// Counts every call that reaches the wrapped store
pub struct RecordingBackend<A: SearchAdapter> {
    inner: MemoryStore<A>,
    pub fetches: Cell<usize>,
    pub counts: Cell<usize>,
}

impl<A: SearchAdapter> RecordingBackend<A> {
    pub fn new(inner: MemoryStore<A>) -> Self {
        Self {
            inner,
            fetches: Cell::new(0),
            counts: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.fetches.get() + self.counts.get()
    }
}

impl<A: SearchAdapter> SearchBackend<A> for RecordingBackend<A> {
    fn fetch(&self, query: &RecordQuery<A::Field>) -> Result<Vec<A::Record>, BackendError> {
        self.fetches.set(self.fetches.get() + 1);
        self.inner.fetch(query)
    }

    fn count(&self, predicate: &Predicate<A::Field>) -> Result<u64, BackendError> {
        self.counts.set(self.counts.get() + 1);
        self.inner.count(predicate)
    }
}

/// Fails every call with a connection error
pub struct UnreachableBackend;

impl<A: SearchAdapter> SearchBackend<A> for UnreachableBackend {
    fn fetch(&self, _query: &RecordQuery<A::Field>) -> Result<Vec<A::Record>, BackendError> {
        Err(Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "database unreachable")))
    }

    fn count(&self, _predicate: &Predicate<A::Field>) -> Result<u64, BackendError> {
        Err(Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "database unreachable")))
    }
}
