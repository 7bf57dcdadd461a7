//! Sale listings and the adapter that searches them.
//!
//! A listing reaches its seller and location through its inventory item:
//! listing → inventory item → business → address. Products hang off the same
//! inventory item.

use crate::entity::{start_of_day, Business, Identifiable, SearchAdapter};
use crate::query::filter::FilterField;
use crate::query::predicate::{Predicate, Value};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalogue entry for something a business sells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// Stock of one product held by a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: u64,
    pub product: Product,
    pub business: Business,
    pub quantity: u32,
    pub expires: NaiveDate,
}

/// A quantity of an inventory item offered for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListing {
    pub id: u64,
    pub inventory_item: InventoryItem,
    pub quantity: u32,
    pub price: f64,
    #[serde(default)]
    pub more_info: Option<String>,
    pub created: NaiveDateTime,
    #[serde(default)]
    pub closes: Option<NaiveDateTime>,
    #[serde(default, rename = "isSold")]
    pub sold: bool,
}

impl SaleListing {
    pub fn business(&self) -> &Business {
        &self.inventory_item.business
    }

    pub fn product(&self) -> &Product {
        &self.inventory_item.product
    }
}

impl Identifiable for SaleListing {
    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for SaleListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} @ ${:.2} from {} ({})",
            self.product().name,
            self.quantity,
            self.price,
            self.business().name,
            self.business().address
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Id,
    BusinessName,
    BusinessType,
    ProductName,
    Suburb,
    City,
    Region,
    Country,
    Price,
    Quantity,
    Expires,
    Closes,
    Created,
    Sold,
}

/// Adapter for searching sale listings by seller, product and location
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingSearch;

impl SearchAdapter for ListingSearch {
    type Record = SaleListing;
    type Field = ListingField;

    fn name(&self) -> &'static str {
        "sale listing"
    }

    fn searchable_fields(&self) -> &'static [ListingField] {
        &[
            ListingField::BusinessName,
            ListingField::ProductName,
            ListingField::Suburb,
            ListingField::City,
            ListingField::Region,
            ListingField::Country,
        ]
    }

    fn sortable_columns(&self) -> &'static [(&'static str, ListingField)] {
        &[
            ("name", ListingField::ProductName),
            ("seller", ListingField::BusinessName),
            ("suburb", ListingField::Suburb),
            ("city", ListingField::City),
            ("country", ListingField::Country),
            ("price", ListingField::Price),
            ("quantity", ListingField::Quantity),
            ("expires", ListingField::Expires),
            ("created", ListingField::Created),
        ]
    }

    fn default_sort_column(&self) -> ListingField {
        ListingField::Created
    }

    fn identity_field(&self) -> ListingField {
        ListingField::Id
    }

    fn filter_field(&self, filter: FilterField) -> Option<ListingField> {
        Some(match filter {
            FilterField::BusinessType => ListingField::BusinessType,
            FilterField::Price => ListingField::Price,
            FilterField::ClosingDate => ListingField::Closes,
        })
    }

    /// Sold listings never appear in search results
    fn standing_filter(&self) -> Predicate<ListingField> {
        Predicate::IsTrue(ListingField::Sold).not()
    }

    fn value<'r>(&self, listing: &'r SaleListing, field: ListingField) -> Value<'r> {
        let business = listing.business();
        let address = &business.address;
        match field {
            ListingField::Id => Value::Id(listing.id),
            ListingField::BusinessName => Value::Text(Some(&business.name)),
            ListingField::BusinessType => Value::Text(Some(&business.business_type)),
            ListingField::ProductName => Value::Text(Some(&listing.product().name)),
            ListingField::Suburb => Value::Text(address.suburb.as_deref()),
            ListingField::City => Value::Text(address.city.as_deref()),
            ListingField::Region => Value::Text(address.region.as_deref()),
            ListingField::Country => Value::Text(Some(&address.country)),
            ListingField::Price => Value::Number(listing.price),
            ListingField::Quantity => Value::Integer(i64::from(listing.quantity)),
            ListingField::Expires => {
                Value::Time(Some(start_of_day(listing.inventory_item.expires)))
            }
            ListingField::Closes => Value::Time(listing.closes),
            ListingField::Created => Value::Time(Some(listing.created)),
            ListingField::Sold => Value::Bool(listing.sold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Address;

    fn listing(sold: bool) -> SaleListing {
        let business = Business {
            id: 3,
            name: "Mc Ronalds".to_string(),
            description: None,
            business_type: "Accommodation and Food Services".to_string(),
            address: Address {
                suburb: Some("Riccarton".to_string()),
                city: Some("Christchurch".to_string()),
                region: Some("Canterbury".to_string()),
                country: "New Zealand".to_string(),
                ..Address::default()
            },
            registration_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        };
        SaleListing {
            id: 11,
            inventory_item: InventoryItem {
                id: 5,
                product: Product {
                    id: "BURGER".to_string(),
                    name: "Cheese Burger".to_string(),
                    manufacturer: None,
                },
                business,
                quantity: 10,
                expires: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            },
            quantity: 2,
            price: 7.5,
            more_info: None,
            created: NaiveDate::from_ymd_opt(2022, 5, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            closes: None,
            sold,
        }
    }

    #[test]
    fn test_matches_through_relations() {
        let l = listing(false);
        let lookup = |field| ListingSearch.value(&l, field);
        assert!(ListingSearch.exact_predicate("canterbury").evaluate(&lookup));
        assert!(ListingSearch.exact_predicate("mc ronalds").evaluate(&lookup));
        assert!(ListingSearch.partial_predicate("cheese").evaluate(&lookup));
        assert!(!ListingSearch.partial_predicate("burger king").evaluate(&lookup));
    }

    #[test]
    fn test_standing_filter_excludes_sold() {
        let open = listing(false);
        let sold = listing(true);
        let filter = ListingSearch.standing_filter();
        assert!(filter.evaluate(&|field| ListingSearch.value(&open, field)));
        assert!(!filter.evaluate(&|field| ListingSearch.value(&sold, field)));
    }

    #[test]
    fn test_sort_aliases() {
        assert_eq!(ListingSearch.sort_column("seller"), Some(ListingField::BusinessName));
        assert_eq!(ListingSearch.sort_column("name"), Some(ListingField::ProductName));
        assert_eq!(ListingSearch.sort_column("region"), None);
    }

    #[test]
    fn test_deserialize_sold_flag() {
        let json = serde_json::to_string(&listing(true)).unwrap();
        assert!(json.contains("\"isSold\":true"));
        let back: SaleListing = serde_json::from_str(&json).unwrap();
        assert!(back.sold);
    }
}
