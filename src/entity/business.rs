use crate::entity::{start_of_day, Identifiable, SearchAdapter};
use crate::query::filter::FilterField;
use crate::query::predicate::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Postal address of a business
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub country: String,
    #[serde(default)]
    pub postcode: Option<String>,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [&self.suburb, &self.city, &self.region].into_iter().flatten() {
            write!(f, "{}, ", part)?;
        }
        write!(f, "{}", self.country)
    }
}

/// A business that owns inventory and sells listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub business_type: String,
    pub address: Address,
    pub registration_date: NaiveDate,
}

impl Identifiable for Business {
    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Business {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] - {}", self.name, self.business_type, self.address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessField {
    Id,
    Name,
    BusinessType,
    Created,
}

/// Adapter for searching businesses by name
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessSearch;

impl SearchAdapter for BusinessSearch {
    type Record = Business;
    type Field = BusinessField;

    fn name(&self) -> &'static str {
        "business"
    }

    fn searchable_fields(&self) -> &'static [BusinessField] {
        &[BusinessField::Name]
    }

    fn sortable_columns(&self) -> &'static [(&'static str, BusinessField)] {
        &[
            ("name", BusinessField::Name),
            ("businessType", BusinessField::BusinessType),
            ("created", BusinessField::Created),
        ]
    }

    fn default_sort_column(&self) -> BusinessField {
        BusinessField::Created
    }

    fn identity_field(&self) -> BusinessField {
        BusinessField::Id
    }

    fn filter_field(&self, filter: FilterField) -> Option<BusinessField> {
        match filter {
            FilterField::BusinessType => Some(BusinessField::BusinessType),
            FilterField::Price | FilterField::ClosingDate => None,
        }
    }

    fn value<'r>(&self, business: &'r Business, field: BusinessField) -> Value<'r> {
        match field {
            BusinessField::Id => Value::Id(business.id),
            BusinessField::Name => Value::Text(Some(&business.name)),
            BusinessField::BusinessType => Value::Text(Some(&business.business_type)),
            BusinessField::Created => Value::Time(Some(start_of_day(business.registration_date))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(name: &str) -> Business {
        Business {
            id: 1,
            name: name.to_string(),
            description: None,
            business_type: "Retail Trade".to_string(),
            address: Address {
                suburb: Some("Ilam".to_string()),
                city: Some("Christchurch".to_string()),
                country: "New Zealand".to_string(),
                ..Address::default()
            },
            registration_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_matches_name_only() {
        let b = business("UC Library");
        let lookup = |field| BusinessSearch.value(&b, field);
        assert!(BusinessSearch.partial_predicate("uc").evaluate(&lookup));
        assert!(!BusinessSearch.exact_predicate("uc").evaluate(&lookup));
        assert!(!BusinessSearch.partial_predicate("retail").evaluate(&lookup));
    }

    #[test]
    fn test_business_type_is_filterable() {
        assert_eq!(
            BusinessSearch.filter_field(FilterField::BusinessType),
            Some(BusinessField::BusinessType)
        );
        assert!(BusinessSearch.filter_field(FilterField::Price).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            business("UC").to_string(),
            "UC [Retail Trade] - Ilam, Christchurch, New Zealand"
        );
    }
}
