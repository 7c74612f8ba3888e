//! Static content and seed data for demo mode.
//!
//! Catalogue, project, media, and solution records are read-only and never
//! mutated. Default site settings and the three sample enquiries are only the
//! starting point: the demo store persists its own copies on first use.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{
    Availability, CatalogueCategory, CatalogueItem, Condition, Enquiry, EnquiryStatus,
    EnquiryType, MediaKind, MediaPost, Metric, Project, SiteSettings, Solution,
};

const HERO_IMAGE: &str = "/assets/hero-machinery.jpg";
const MACHINERY_IMAGE: &str = "/assets/machinery-parts.jpg";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn metrics(items: &[(&str, &str)]) -> Vec<Metric> {
    items
        .iter()
        .map(|(label, value)| Metric {
            label: (*label).to_owned(),
            value: (*value).to_owned(),
        })
        .collect()
}

/// Settings used when nothing has been saved yet.
#[must_use]
pub fn default_settings() -> SiteSettings {
    SiteSettings {
        company_name: "Famox Group of Companies".to_owned(),
        whatsapp: "60125882911".to_owned(),
        email: "famox.malaysia@gmail.com".to_owned(),
        phone_primary: "012-588 2911".to_owned(),
        phone_secondary: Some("011-1111 2911".to_owned()),
        address_lines: strings(&["Lot 1331, Kg. Sungai Batu,", "08100 Merbok, Kedah,", "Malaysia"]),
        google_review_url: Some(
            "https://www.google.com/search?q=Famox+Plantation+reviews".to_owned(),
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn catalogue_item(
    id: &str,
    title: &str,
    slug: &str,
    brand: &str,
    category: CatalogueCategory,
    availability: Availability,
    price_display: &str,
    description: &str,
    image: &str,
    highlights: &[&str],
) -> CatalogueItem {
    CatalogueItem {
        id: id.to_owned(),
        title: title.to_owned(),
        slug: slug.to_owned(),
        brand: brand.to_owned(),
        category,
        condition: Condition::New,
        availability,
        price_display: price_display.to_owned(),
        description: description.to_owned(),
        image: image.to_owned(),
        highlights: strings(highlights),
    }
}

static CATALOGUE: LazyLock<Vec<CatalogueItem>> = LazyLock::new(|| {
    vec![
        catalogue_item(
            "c1",
            "Famox Grain Corn Mobile Dryer",
            "famox-grain-corn-mobile-dryer",
            "Famox Agrotech",
            CatalogueCategory::Processing,
            Availability::ByRequest,
            "Request Quote",
            "Portable crop drying technology designed to dry harvest directly from the field.",
            MACHINERY_IMAGE,
            &["Portable field drying", "Designed for grain corn", "Lead-time by request"],
        ),
        catalogue_item(
            "c2",
            "Grain Corn Desheller",
            "grain-corn-desheller",
            "Famox",
            CatalogueCategory::Processing,
            Availability::ByRequest,
            "Request Quote",
            "Downstream processing equipment for efficient corn deshelling as part of a mechanized workflow.",
            MACHINERY_IMAGE,
            &["Downstream operations", "High throughput", "Support & setup available"],
        ),
        catalogue_item(
            "c3",
            "Land Preparation Implements Set",
            "land-preparation-implements",
            "Famox",
            CatalogueCategory::Implements,
            Availability::InStock,
            "From RM 12,000",
            "Implements for land preparation and soil conditioning for commercial-scale operations.",
            HERO_IMAGE,
            &["Upstream operations", "Soil prep", "Compatible with common tractors"],
        ),
        catalogue_item(
            "c4",
            "Precision Planter Package",
            "precision-planter-package",
            "Famox",
            CatalogueCategory::Implements,
            Availability::AvailableSoon,
            "Request Quote",
            "Planting machinery package aligned to mechanized crop production workflows.",
            HERO_IMAGE,
            &["Planting stage", "Improved uniformity", "Training available"],
        ),
        catalogue_item(
            "c5",
            "Harvest Monitoring & Field Ops Toolkit",
            "harvest-monitoring-field-ops",
            "Famox",
            CatalogueCategory::Other,
            Availability::ByRequest,
            "Request Quote",
            "Operational toolkit for crop growth monitoring and harvesting coordination.",
            HERO_IMAGE,
            &["Monitoring growth", "Harvest planning", "Ops support"],
        ),
    ]
});

static PROJECTS: LazyLock<Vec<Project>> = LazyLock::new(|| {
    vec![
        Project {
            id: "p1".to_owned(),
            title: "Grain Corn Plantation (Kedah)".to_owned(),
            slug: "grain-corn-plantation-kedah".to_owned(),
            summary: "Pioneer commercial grain corn production project in Malaysia with mechanized operations.".to_owned(),
            problem: "Malaysia relied heavily on imported grain corn; local commercial-scale production was limited.".to_owned(),
            solution: "Launched a mechanized grain corn plantation project with upstream-to-downstream workflow and modern machinery adoption.".to_owned(),
            outcome: "Recognized as a pioneer project and achieved strong yield performance per hectare with public-sector collaboration.".to_owned(),
            metrics: metrics(&[
                ("Launch", "2016"),
                ("Recorded yield", "8.1 tonnes/hectare"),
                ("Approach", "Mechanized"),
            ]),
            image: HERO_IMAGE.to_owned(),
        },
        Project {
            id: "p2".to_owned(),
            title: "Integrated Famox Dairy Valley (Kedah)".to_owned(),
            slug: "integrated-famox-dairy-valley-kedah".to_owned(),
            summary: "Portfolio diversification project focused on developing an integrated dairy ecosystem in Kedah.".to_owned(),
            problem: "Need to diversify agricultural portfolio and develop integrated dairy capability locally.".to_owned(),
            solution: "Established a dedicated entity to build an integrated dairy valley and supporting operations.".to_owned(),
            outcome: "Set the foundation for a diversified, integrated agriculture portfolio beyond plantation production.".to_owned(),
            metrics: metrics(&[
                ("Entity established", "2020"),
                ("Focus", "Integrated dairy"),
                ("Region", "Kedah"),
            ]),
            image: MACHINERY_IMAGE.to_owned(),
        },
    ]
});

static MEDIA: LazyLock<Vec<MediaPost>> = LazyLock::new(|| {
    vec![
        MediaPost {
            id: "m1".to_owned(),
            title: "Pengering Mudah Alih (Mobile Dryer)".to_owned(),
            slug: "pengering-mudah-alih".to_owned(),
            kind: MediaKind::Article,
            date: NaiveDate::from_ymd_opt(2017, 8, 1).unwrap_or_default(),
            excerpt: "Famox introduced a portable crop dryer technology designed to dry harvest directly from the field.".to_owned(),
            image: MACHINERY_IMAGE.to_owned(),
        },
        MediaPost {
            id: "m2".to_owned(),
            title: "Young 'Agropreneur' Says Agriculture Where The Money Is".to_owned(),
            slug: "young-agropreneur-says-agriculture-where-the-money-is".to_owned(),
            kind: MediaKind::Press,
            date: NaiveDate::from_ymd_opt(2021, 6, 26).unwrap_or_default(),
            excerpt: "Highlights Famox Agropreneur Incubation & Training Hub (FAITH) and youth-focused agriculture programs.".to_owned(),
            image: HERO_IMAGE.to_owned(),
        },
    ]
});

static SOLUTIONS: LazyLock<Vec<Solution>> = LazyLock::new(|| {
    [
        (
            "machinery-equipment",
            "Sales of Agricultural Equipment / Machineries",
            "Adopting technology to enhance productivity and reduce cost across upstream and downstream operations.",
        ),
        (
            "training-consultancy",
            "Training & Consultancy",
            "HRD Corp certified training provider; practical programs designed for modern agriculture operations.",
        ),
        (
            "farm-setup",
            "Setting up Farm / Poultry / Dairy Projects",
            "End-to-end assistance to set up plantation, poultry, and dairy projects with periodic progress updates.",
        ),
        (
            "incubation-programs",
            "Famox Agropreneur Incubation & Training Hub (FAITH)",
            "Creating opportunities and avenues for youth to take up agriculture as a career and entrepreneurship path.",
        ),
    ]
    .into_iter()
    .map(|(slug, title, blurb)| Solution {
        slug: slug.to_owned(),
        title: title.to_owned(),
        blurb: blurb.to_owned(),
    })
    .collect()
});

#[must_use]
pub fn catalogue() -> &'static [CatalogueItem] {
    &CATALOGUE
}

#[must_use]
pub fn projects() -> &'static [Project] {
    &PROJECTS
}

#[must_use]
pub fn media() -> &'static [MediaPost] {
    &MEDIA
}

#[must_use]
pub fn solutions() -> &'static [Solution] {
    &SOLUTIONS
}

/// The three sample enquiries written on first use, newest first.
///
/// Timestamps are relative to `now` so a fresh demo always looks recent.
#[must_use]
pub fn seed_enquiries(now: DateTime<Utc>) -> Vec<Enquiry> {
    vec![
        Enquiry {
            id: "e1".to_owned(),
            created_at: now - Duration::hours(5),
            name: "Aiman Hakim".to_owned(),
            email: "aiman@example.com".to_owned(),
            phone: "+60 12-345 6789".to_owned(),
            company: Some("Kedah Agro Ventures".to_owned()),
            enquiry_type: EnquiryType::QuoteRequest,
            message: "Interested in the Famox Grain Corn Mobile Dryer. Please advise pricing, lead time, and installation/support.".to_owned(),
            item_slug: Some("famox-grain-corn-mobile-dryer".to_owned()),
            status: EnquiryStatus::New,
            notes: None,
        },
        Enquiry {
            id: "e2".to_owned(),
            created_at: now - Duration::hours(30),
            name: "Siti Nur".to_owned(),
            email: "siti.nur@example.com".to_owned(),
            phone: "+60 11-2222 3333".to_owned(),
            company: Some("Northern Poultry Farm".to_owned()),
            enquiry_type: EnquiryType::FarmSetup,
            message: "We want guidance to set up a small-to-medium poultry project. Can you share scope and timeline?".to_owned(),
            item_slug: None,
            status: EnquiryStatus::Contacted,
            notes: Some("Call scheduled for tomorrow 10am.".to_owned()),
        },
        Enquiry {
            id: "e3".to_owned(),
            created_at: now - Duration::hours(80),
            name: "Tan Wei".to_owned(),
            email: "tan.wei@example.com".to_owned(),
            phone: "+60 19-888 9999".to_owned(),
            company: Some("AgroTech Procurement".to_owned()),
            enquiry_type: EnquiryType::General,
            message: "Do you provide training for mechanized farming operations? Looking for HRD Corp claimable programs.".to_owned(),
            item_slug: None,
            status: EnquiryStatus::Quoted,
            notes: Some("Sent brochure and preliminary quote.".to_owned()),
        },
    ]
}
