//! Data model for the Famox site.
//!
//! Two families of records live here:
//!
//! - mutable records owned by the demo store: [`SiteSettings`] (a singleton)
//!   and [`Enquiry`] (sales leads), together with their explicit patch and
//!   input types
//! - read-only content records seeded from fixtures: [`CatalogueItem`],
//!   [`Project`], [`MediaPost`], and [`Solution`], each looked up by slug
//!
//! JSON field names follow the persisted layout of the demo store (camelCase,
//! except the enquiry `created_at` timestamp).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProviderError;

// ── Site settings ────────────────────────────────────────────────────

/// Company identity and contact details. Exactly one instance exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub company_name: String,
    /// Digits only, including the country code.
    pub whatsapp: String,
    pub email: String,
    pub phone_primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_secondary: Option<String>,
    pub address_lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_review_url: Option<String>,
}

impl SiteSettings {
    /// Click-to-chat link for the configured WhatsApp number.
    #[must_use]
    pub fn whatsapp_url(&self) -> String {
        format!("https://wa.me/{}", self.whatsapp)
    }
}

/// A partial update to [`SiteSettings`].
///
/// `None` keeps the current value. For the optional fields
/// (`phone_secondary`, `google_review_url`) an empty string clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_review_url: Option<String>,
}

impl SiteSettingsPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject values that would leave the merged record incomplete or
    /// malformed.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if let Some(name) = &self.company_name {
            require_non_blank("companyName", name)?;
        }
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        if let Some(phone) = &self.phone_primary {
            require_non_blank("phonePrimary", phone)?;
        }
        if let Some(whatsapp) = &self.whatsapp {
            if whatsapp.is_empty() || !whatsapp.chars().all(|c| c.is_ascii_digit()) {
                return Err(ProviderError::invalid(
                    "whatsapp",
                    "must be digits only, including the country code",
                ));
            }
        }
        if let Some(lines) = &self.address_lines {
            if lines.iter().all(|l| l.trim().is_empty()) {
                return Err(ProviderError::invalid(
                    "addressLines",
                    "at least one non-empty line is required",
                ));
            }
        }
        if let Some(url) = self.google_review_url.as_deref().filter(|u| !u.is_empty()) {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ProviderError::invalid(
                    "googleReviewUrl",
                    "must be an http(s) URL",
                ));
            }
        }
        Ok(())
    }

    /// Shallow-merge this patch onto `base`.
    #[must_use]
    pub fn apply_to(&self, base: &SiteSettings) -> SiteSettings {
        let clearable = |patch: &Option<String>, current: &Option<String>| match patch {
            Some(v) if v.is_empty() => None,
            Some(v) => Some(v.clone()),
            None => current.clone(),
        };
        SiteSettings {
            company_name: self
                .company_name
                .clone()
                .unwrap_or_else(|| base.company_name.clone()),
            whatsapp: self.whatsapp.clone().unwrap_or_else(|| base.whatsapp.clone()),
            email: self.email.clone().unwrap_or_else(|| base.email.clone()),
            phone_primary: self
                .phone_primary
                .clone()
                .unwrap_or_else(|| base.phone_primary.clone()),
            phone_secondary: clearable(&self.phone_secondary, &base.phone_secondary),
            address_lines: self
                .address_lines
                .clone()
                .unwrap_or_else(|| base.address_lines.clone()),
            google_review_url: clearable(&self.google_review_url, &base.google_review_url),
        }
    }
}

impl From<&SiteSettings> for SiteSettingsPatch {
    /// A patch that reproduces `settings` exactly when applied to any base.
    /// Absent optional fields become empty strings so they stay cleared.
    fn from(settings: &SiteSettings) -> Self {
        Self {
            company_name: Some(settings.company_name.clone()),
            whatsapp: Some(settings.whatsapp.clone()),
            email: Some(settings.email.clone()),
            phone_primary: Some(settings.phone_primary.clone()),
            phone_secondary: Some(settings.phone_secondary.clone().unwrap_or_default()),
            address_lines: Some(settings.address_lines.clone()),
            google_review_url: Some(settings.google_review_url.clone().unwrap_or_default()),
        }
    }
}

// ── Enquiries ────────────────────────────────────────────────────────

/// Workflow status of an enquiry.
///
/// Any status may move to any other; there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum EnquiryStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Won,
    Lost,
}

impl EnquiryStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Contacted,
        Self::Quoted,
        Self::Won,
        Self::Lost,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Quoted => "Quoted",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ProviderError::invalid(
                    "status",
                    format!("'{s}' is not one of New, Contacted, Quoted, Won, Lost"),
                )
            })
    }
}

/// Accepts any letter case, so admin tools may send `won` as well as `Won`.
impl<'de> Deserialize<'de> for EnquiryStatus {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(de)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Category picked on the enquiry form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryType {
    #[default]
    General,
    QuoteRequest,
    CatalogueEnquiry,
    Training,
    FarmSetup,
    Partnership,
    Support,
}

impl EnquiryType {
    pub const ALL: [Self; 7] = [
        Self::General,
        Self::QuoteRequest,
        Self::CatalogueEnquiry,
        Self::Training,
        Self::FarmSetup,
        Self::Partnership,
        Self::Support,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::QuoteRequest => "quote_request",
            Self::CatalogueEnquiry => "catalogue_enquiry",
            Self::Training => "training",
            Self::FarmSetup => "farm_setup",
            Self::Partnership => "partnership",
            Self::Support => "support",
        }
    }

    /// Human-readable label shown on the enquiry form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General Enquiry",
            Self::QuoteRequest => "Request a Quote",
            Self::CatalogueEnquiry => "Catalogue Enquiry",
            Self::Training => "Training & Consultancy",
            Self::FarmSetup => "Farm Setup Services",
            Self::Partnership => "Partnership Opportunity",
            Self::Support => "After-Sales Support",
        }
    }
}

impl fmt::Display for EnquiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EnquiryType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ProviderError::invalid("enquiryType", format!("unknown type '{s}'")))
    }
}

/// A sales lead submitted through a public form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub enquiry_type: EnquiryType,
    pub message: String,
    /// Slug of the catalogue item the enquiry is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_slug: Option<String>,
    pub status: EnquiryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields a visitor supplies when submitting an enquiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryCreateInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub enquiry_type: EnquiryType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_slug: Option<String>,
}

impl EnquiryCreateInput {
    /// # Errors
    ///
    /// Returns [`ProviderError::Invalid`] when name, email, or message is
    /// blank, or the email has no `@`.
    pub fn validate(&self) -> Result<(), ProviderError> {
        require_non_blank("name", &self.name)?;
        require_email("email", &self.email)?;
        require_non_blank("message", &self.message)
    }
}

/// Admin-side update to an enquiry: status and/or internal notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnquiryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EnquiryPatch {
    /// # Errors
    ///
    /// Returns [`ProviderError::Invalid`] if the patch sets nothing.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.status.is_none() && self.notes.is_none() {
            return Err(ProviderError::invalid(
                "patch",
                "at least one of status or notes is required",
            ));
        }
        Ok(())
    }

    /// Merge onto an enquiry. Fields other than status and notes are never
    /// touched.
    pub fn apply_to(&self, enquiry: &mut Enquiry) {
        if let Some(status) = self.status {
            enquiry.status = status;
        }
        if let Some(notes) = &self.notes {
            enquiry.notes = Some(notes.clone());
        }
    }
}

// ── Content ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueCategory {
    Tractors,
    Harvesters,
    Processing,
    Implements,
    Facilities,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Used,
    Refurbished,
}

/// Case-insensitive parse of a `snake_case` variant name.
fn parse_variant<T: Copy>(
    field: &'static str,
    raw: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, ProviderError> {
    all.iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            let known: Vec<_> = all.iter().map(|v| name(*v)).collect();
            ProviderError::invalid(field, format!("'{raw}' is not one of {}", known.join(", ")))
        })
}

impl CatalogueCategory {
    pub const ALL: [Self; 6] = [
        Self::Tractors,
        Self::Harvesters,
        Self::Processing,
        Self::Implements,
        Self::Facilities,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tractors => "tractors",
            Self::Harvesters => "harvesters",
            Self::Processing => "processing",
            Self::Implements => "implements",
            Self::Facilities => "facilities",
            Self::Other => "other",
        }
    }
}

impl FromStr for CatalogueCategory {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("category", s, &Self::ALL, Self::as_str)
    }
}

impl Condition {
    pub const ALL: [Self; 3] = [Self::New, Self::Used, Self::Refurbished];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
            Self::Refurbished => "refurbished",
        }
    }
}

impl FromStr for Condition {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("condition", s, &Self::ALL, Self::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    AvailableSoon,
    ByRequest,
}

/// A piece of machinery or equipment listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub brand: String,
    pub category: CatalogueCategory,
    pub condition: Condition,
    pub availability: Availability,
    pub price_display: String,
    pub description: String,
    pub image: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// A case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub problem: String,
    pub solution: String,
    pub outcome: String,
    pub metrics: Vec<Metric>,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Article,
    Video,
    Press,
}

/// An article, video, or press mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub date: NaiveDate,
    pub excerpt: String,
    pub image: String,
}

/// A service line shown on the solutions page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub slug: String,
    pub title: String,
    pub blurb: String,
}

// ── Validation helpers ───────────────────────────────────────────────

fn require_non_blank(field: &'static str, value: &str) -> Result<(), ProviderError> {
    if value.trim().is_empty() {
        return Err(ProviderError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_email(field: &'static str, value: &str) -> Result<(), ProviderError> {
    require_non_blank(field, value)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ProviderError::invalid(field, format!("'{value}' is not an email address"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SiteSettings {
        SiteSettings {
            company_name: "Famox".to_owned(),
            whatsapp: "60125882911".to_owned(),
            email: "hello@famox.test".to_owned(),
            phone_primary: "012-588 2911".to_owned(),
            phone_secondary: Some("011-1111 2911".to_owned()),
            address_lines: vec!["Merbok, Kedah".to_owned()],
            google_review_url: None,
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("won".parse::<EnquiryStatus>().unwrap(), EnquiryStatus::Won);
        assert_eq!(" Lost ".parse::<EnquiryStatus>().unwrap(), EnquiryStatus::Lost);
        assert!("archived".parse::<EnquiryStatus>().is_err());
    }

    #[test]
    fn status_serializes_with_capitalized_names() {
        let json = serde_json::to_string(&EnquiryStatus::Contacted).unwrap();
        assert_eq!(json, "\"Contacted\"");
    }

    #[test]
    fn status_deserializes_in_any_case() {
        let patch: EnquiryPatch = serde_json::from_str(r#"{"status":"won"}"#).unwrap();
        assert_eq!(patch.status, Some(EnquiryStatus::Won));
        let stored: EnquiryStatus = serde_json::from_str("\"Quoted\"").unwrap();
        assert_eq!(stored, EnquiryStatus::Quoted);
        assert!(serde_json::from_str::<EnquiryStatus>("\"archived\"").is_err());
    }

    #[test]
    fn catalogue_enums_parse_their_serialized_names() {
        for category in CatalogueCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.as_str());
            let upper = category.as_str().to_uppercase();
            assert_eq!(upper.parse::<CatalogueCategory>().unwrap(), category);
        }
        for condition in Condition::ALL {
            assert_eq!(serde_json::to_value(condition).unwrap(), condition.as_str());
        }
        assert_eq!("Used".parse::<Condition>().unwrap(), Condition::Used);
        assert!("broken".parse::<Condition>().is_err());
    }

    #[test]
    fn enquiry_uses_persisted_field_names() {
        let json = serde_json::json!({
            "id": "e9",
            "created_at": "2024-05-01T10:00:00Z",
            "name": "Aiman",
            "email": "aiman@example.com",
            "phone": "+60 12",
            "enquiryType": "quote_request",
            "message": "Pricing please",
            "itemSlug": "grain-corn-desheller",
            "status": "Quoted"
        });
        let enquiry: Enquiry = serde_json::from_value(json).unwrap();
        assert_eq!(enquiry.enquiry_type, EnquiryType::QuoteRequest);
        assert_eq!(enquiry.item_slug.as_deref(), Some("grain-corn-desheller"));
        assert_eq!(enquiry.company, None);

        let back = serde_json::to_value(&enquiry).unwrap();
        assert!(back.get("created_at").is_some());
        assert!(back.get("enquiryType").is_some());
    }

    #[test]
    fn settings_patch_merges_only_set_fields() {
        let patch = SiteSettingsPatch {
            email: Some("sales@famox.test".to_owned()),
            ..Default::default()
        };
        let merged = patch.apply_to(&settings());
        assert_eq!(merged.email, "sales@famox.test");
        assert_eq!(merged.company_name, "Famox");
        assert_eq!(merged.phone_secondary.as_deref(), Some("011-1111 2911"));
    }

    #[test]
    fn settings_patch_empty_string_clears_optional_field() {
        let patch = SiteSettingsPatch {
            phone_secondary: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.apply_to(&settings()).phone_secondary, None);
    }

    #[test]
    fn settings_patch_validation() {
        let bad_whatsapp = SiteSettingsPatch {
            whatsapp: Some("+60 12".to_owned()),
            ..Default::default()
        };
        assert!(bad_whatsapp.validate().is_err());

        let blank_name = SiteSettingsPatch {
            company_name: Some("  ".to_owned()),
            ..Default::default()
        };
        assert!(blank_name.validate().is_err());

        let no_address = SiteSettingsPatch {
            address_lines: Some(vec![String::new()]),
            ..Default::default()
        };
        assert!(no_address.validate().is_err());

        let bad_url = SiteSettingsPatch {
            google_review_url: Some("maps.google.com".to_owned()),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());

        assert!(SiteSettingsPatch::default().validate().is_ok());
        assert!(SiteSettingsPatch::default().is_empty());
    }

    #[test]
    fn enquiry_input_requires_contact_fields() {
        let mut input = EnquiryCreateInput {
            name: "X".to_owned(),
            email: "x@x.com".to_owned(),
            message: "hi".to_owned(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.email = "not-an-email".to_owned();
        assert!(matches!(
            input.validate(),
            Err(ProviderError::Invalid { field: "email", .. })
        ));
    }

    #[test]
    fn empty_enquiry_patch_is_rejected() {
        assert!(EnquiryPatch::default().validate().is_err());
    }

    #[test]
    fn whatsapp_url_uses_digits() {
        assert_eq!(settings().whatsapp_url(), "https://wa.me/60125882911");
    }

    #[test]
    fn media_kind_serializes_as_type() {
        let post = MediaPost {
            id: "m1".to_owned(),
            title: "t".to_owned(),
            slug: "s".to_owned(),
            kind: MediaKind::Press,
            date: NaiveDate::from_ymd_opt(2021, 6, 26).unwrap(),
            excerpt: String::new(),
            image: String::new(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["type"], "press");
        assert_eq!(json["date"], "2021-06-26");
    }
}
