//! Admin dashboard counters.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CatalogueItem, Enquiry, EnquiryStatus, MediaPost, Project};

/// Headline numbers for the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Enquiries created on the same UTC calendar day as `now`.
    pub enquiries_today: usize,
    /// Enquiries created in the 7 days up to `now`.
    pub enquiries_this_week: usize,
    /// Enquiries still in status `New`.
    pub new_enquiries: usize,
    pub catalogue_items: usize,
    pub published_media: usize,
    pub projects: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(
        enquiries: &[Enquiry],
        catalogue: &[CatalogueItem],
        media: &[MediaPost],
        projects: &[Project],
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();
        let week_start = now - Duration::days(7);

        Self {
            enquiries_today: enquiries
                .iter()
                .filter(|e| e.created_at.date_naive() == today)
                .count(),
            enquiries_this_week: enquiries
                .iter()
                .filter(|e| e.created_at > week_start && e.created_at <= now)
                .count(),
            new_enquiries: enquiries
                .iter()
                .filter(|e| e.status == EnquiryStatus::New)
                .count(),
            catalogue_items: catalogue.len(),
            published_media: media.len(),
            projects: projects.len(),
        }
    }
}
