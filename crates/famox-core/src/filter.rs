//! List filters used by the catalogue page and the admin enquiry list.
//!
//! Filtering happens after a full `list` call; providers never paginate or
//! filter themselves.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::model::{CatalogueCategory, CatalogueItem, Condition, Enquiry, EnquiryStatus};

/// The value list pages send for "no filter" on a select box.
const ANY: &str = "all";

/// Read an optional filter value, where an empty value or `all` means unset.
fn any_or<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case(ANY) => Ok(None),
        Some(v) => v.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Admin enquiry list filter. `status: None` means all statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EnquiryFilter {
    #[serde(default, deserialize_with = "any_or")]
    pub status: Option<EnquiryStatus>,
}

impl EnquiryFilter {
    #[must_use]
    pub fn matches(&self, enquiry: &Enquiry) -> bool {
        self.status.is_none_or(|s| enquiry.status == s)
    }

    /// Keep matching enquiries, preserving order.
    #[must_use]
    pub fn apply(&self, enquiries: Vec<Enquiry>) -> Vec<Enquiry> {
        enquiries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Catalogue page filter. Every unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogueFilter {
    /// Case-insensitive substring of the title or brand.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "any_or")]
    pub category: Option<CatalogueCategory>,
    /// Brand slug, e.g. `famox-agrotech`. `all` matches every brand.
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "any_or")]
    pub condition: Option<Condition>,
}

impl CatalogueFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn matches(&self, item: &CatalogueItem) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .is_none_or(|q| {
                let q = q.to_lowercase();
                item.title.to_lowercase().contains(&q) || item.brand.to_lowercase().contains(&q)
            });
        let brand_ok = self
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty() && !b.eq_ignore_ascii_case(ANY))
            .is_none_or(|b| brand_slug(&item.brand) == b.to_lowercase());

        search_ok
            && brand_ok
            && self.category.is_none_or(|c| item.category == c)
            && self.condition.is_none_or(|c| item.condition == c)
    }

    /// Keep matching items, preserving order.
    #[must_use]
    pub fn apply(&self, items: Vec<CatalogueItem>) -> Vec<CatalogueItem> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}

/// Lowercase a brand name and join its words with `-`.
#[must_use]
pub fn brand_slug(brand: &str) -> String {
    brand
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Distinct brands in the catalogue as `(slug, name)`, sorted by name.
#[must_use]
pub fn brands(items: &[CatalogueItem]) -> Vec<(String, String)> {
    let mut names: Vec<&str> = items.iter().map(|i| i.brand.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
        .into_iter()
        .map(|name| (brand_slug(name), name.to_owned()))
        .collect()
}
