//! Performance benchmarks for marketsearch
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use marketsearch::entity::{
    Address, Business, BusinessSearch, InventoryItem, ListingSearch, Product, SaleListing,
};
use marketsearch::query::{tokenize, FilterSpec, SearchExecutor, SearchRequest};
use marketsearch::store::MemoryStore;

const WORDS: [&str; 8] = ["Cafe", "Bar", "Books", "Mc", "Ronalds", "Hardware", "Deli", "Garden"];
const CITIES: [&str; 4] = ["Christchurch", "Auckland", "Wellington", "Dunedin"];

fn business(id: u64) -> Business {
    let i = id as usize;
    Business {
        id,
        name: format!("{} {} {}", WORDS[i % 8], WORDS[(i / 8) % 8], id),
        description: None,
        business_type: if i % 3 == 0 { "Retail Trade" } else { "Accommodation and Food Services" }.to_string(),
        address: Address {
            city: Some(CITIES[i % 4].to_string()),
            country: "New Zealand".to_string(),
            ..Address::default()
        },
        registration_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(id % 700),
    }
}

/// Create an in-memory data set of businesses and listings
fn create_benchmark_fixtures(count: u64) -> (Vec<Business>, Vec<SaleListing>) {
    let businesses: Vec<Business> = (1..=count).map(business).collect();
    let listings = businesses
        .iter()
        .map(|seller| SaleListing {
            id: seller.id,
            inventory_item: InventoryItem {
                id: seller.id,
                product: Product {
                    id: format!("P{}", seller.id),
                    name: format!("{} Special", WORDS[(seller.id as usize * 7) % 8]),
                    manufacturer: None,
                },
                business: seller.clone(),
                quantity: 10,
                expires: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            },
            quantity: 2,
            price: (seller.id % 200) as f64,
            more_info: None,
            created: NaiveDate::from_ymd_opt(2022, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + chrono::Days::new(seller.id % 300),
            closes: None,
            sold: seller.id % 10 == 0,
        })
        .collect();
    (businesses, listings)
}

fn bench_tokenize(c: &mut Criterion) {
    let queries = vec![
        "simple",
        "two words",
        "\"exact phrase\"",
        "cafe OR bar AND \"Mc Ronalds\"",
        "\"unterminated quote and several more words",
    ];

    let mut group = c.benchmark_group("tokenize");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &q| {
            b.iter(|| tokenize(black_box(q)))
        });
    }
    group.finish();
}

fn bench_business_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("business_search");

    for count in [1_000u64, 10_000] {
        let (businesses, _) = create_benchmark_fixtures(count);
        let store = MemoryStore::new(BusinessSearch, businesses);
        let executor = SearchExecutor::new(&BusinessSearch, &store);

        group.bench_with_input(BenchmarkId::new("single_word", count), &count, |b, _| {
            let request = SearchRequest::new("cafe");
            b.iter(|| executor.execute(black_box(&request)))
        });

        group.bench_with_input(BenchmarkId::new("or_query_sorted", count), &count, |b, _| {
            let request = SearchRequest::new("cafe OR deli").sort_by("name").order_by("asc");
            b.iter(|| executor.execute(black_box(&request)))
        });
    }

    group.finish();
}

fn bench_listing_search(c: &mut Criterion) {
    let (_, listings) = create_benchmark_fixtures(10_000);
    let store = MemoryStore::new(ListingSearch, listings);
    let executor = SearchExecutor::new(&ListingSearch, &store);

    let mut group = c.benchmark_group("listing_search");

    group.bench_function("location", |b| {
        let request = SearchRequest::new("christchurch special");
        b.iter(|| executor.execute(black_box(&request)))
    });

    group.bench_function("price_filter", |b| {
        let request = SearchRequest::new("garden")
            .filters(FilterSpec {
                min_price: Some(20.0),
                max_price: Some(80.0),
                business_type: Some("retail trade".to_string()),
                ..FilterSpec::default()
            })
            .sort_by("price");
        b.iter(|| executor.execute(black_box(&request)))
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_business_search, bench_listing_search);

criterion_main!(benches);
