//! Work-history timeline entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ExperienceId, OwnerId};
use crate::derived::{duration_in_months, format_duration};

/// A work or education entry on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    /// Unique entry identifier.
    pub id: ExperienceId,
    /// Owning account.
    pub owner_id: OwnerId,
    /// Company or institution name.
    pub company: String,
    /// Role or title held.
    pub role: String,
    /// Location, if any.
    pub location: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Start of the engagement.
    pub start_date: NaiveDate,
    /// End of the engagement. `None` means ongoing.
    pub end_date: Option<NaiveDate>,
    /// Explicitly flagged as a current position.
    pub current: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Experience {
    /// Create a new timeline entry.
    pub fn new(
        owner_id: OwnerId,
        company: &str,
        role: &str,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExperienceId::generate(),
            owner_id,
            company: company.to_string(),
            role: role.to_string(),
            location: None,
            description: None,
            start_date,
            end_date,
            current: false,
            created_at: now,
        }
    }

    /// Whether this is a current position (flagged or open-ended).
    pub fn is_current(&self) -> bool {
        self.current || self.end_date.is_none()
    }

    /// Whole months elapsed, resolving an open end date to `as_of`.
    pub fn duration_months(&self, as_of: NaiveDate) -> u32 {
        duration_in_months(self.start_date, self.end_date, as_of)
    }

    /// Human-readable duration, e.g. `"2 years, 3 months"`.
    pub fn duration_text(&self, as_of: NaiveDate) -> String {
        format_duration(self.duration_months(as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_ended_is_current() {
        let e = Experience::new(
            OwnerId::generate(),
            "Acme",
            "Engineer",
            date(2020, 1, 1),
            None,
            Utc::now(),
        );
        assert!(e.is_current());
    }

    #[test]
    fn test_closed_entry_not_current() {
        let e = Experience::new(
            OwnerId::generate(),
            "Acme",
            "Engineer",
            date(2020, 1, 1),
            Some(date(2021, 1, 1)),
            Utc::now(),
        );
        assert!(!e.is_current());
    }

    #[test]
    fn test_duration_resolves_open_end_to_as_of() {
        let e = Experience::new(
            OwnerId::generate(),
            "Acme",
            "Engineer",
            date(2020, 1, 15),
            None,
            Utc::now(),
        );
        assert_eq!(e.duration_months(date(2021, 7, 1)), 18);
        assert_eq!(e.duration_text(date(2021, 7, 1)), "1 year, 6 months");
    }
}
