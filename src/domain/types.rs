// ==========================================
// Quarry Ops Import - Domain Types
// ==========================================
// Shared value types used across the import pipeline.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// Import Domain
// ==========================================
// One variant per monthly data-entry screen. The slug is the path
// segment the backend uses in its /input/* routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportDomain {
    Sales,
    Ledger,
    OtherIncome,
    OtherExpense,
    ClosingStock,
    VsiHours,
    InwardConsumptionSlurry,
}

impl ImportDomain {
    /// Backend route segment for this domain.
    pub fn slug(&self) -> &'static str {
        match self {
            ImportDomain::Sales => "sales",
            ImportDomain::Ledger => "ledger",
            ImportDomain::OtherIncome => "other-income",
            ImportDomain::OtherExpense => "other-expense",
            ImportDomain::ClosingStock => "closing-stock",
            ImportDomain::VsiHours => "vsi-hours",
            ImportDomain::InwardConsumptionSlurry => "inward-consumption-slurry",
        }
    }

    /// Parse a route segment back into a domain (used by the CLI).
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "sales" => Some(ImportDomain::Sales),
            "ledger" => Some(ImportDomain::Ledger),
            "other-income" => Some(ImportDomain::OtherIncome),
            "other-expense" => Some(ImportDomain::OtherExpense),
            "closing-stock" => Some(ImportDomain::ClosingStock),
            "vsi-hours" => Some(ImportDomain::VsiHours),
            "inward-consumption-slurry" => Some(ImportDomain::InwardConsumptionSlurry),
            _ => None,
        }
    }
}

impl fmt::Display for ImportDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

// ==========================================
// Reporting Period
// ==========================================
// A (month, year) pair identifying the reporting window a batch of
// rows belongs to. Each domain accepts at most one committed batch
// per period; the backend enforces this at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    month: u32,
    year: i32,
}

/// Period construction errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("month out of range: {0} (expected 1-12)")]
    MonthOutOfRange(u32),

    #[error("year out of range: {0} (expected a four-digit year)")]
    YearOutOfRange(i32),
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        if !(1000..=9999).contains(&year) {
            return Err(PeriodError::YearOutOfRange(year));
        }
        Ok(Self { month, year })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-padded two-digit month, the wire format the backend expects.
    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Four-digit year as a string, the wire format the backend expects.
    pub fn year_str(&self) -> String {
        self.year.to_string()
    }

    /// The reporting period an operator most commonly imports: the
    /// calendar month before `today`.
    pub fn preceding(today: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        let (month, year) = if today.month() == 1 {
            (12, today.year() - 1)
        } else {
            (today.month() - 1, today.year())
        };
        Self { month, year }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month_str(), self.year_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_valid() {
        let period = Period::new(7, 2024).unwrap();
        assert_eq!(period.month_str(), "07");
        assert_eq!(period.year_str(), "2024");
        assert_eq!(period.to_string(), "07/2024");
    }

    #[test]
    fn test_period_month_out_of_range() {
        assert_eq!(Period::new(0, 2024), Err(PeriodError::MonthOutOfRange(0)));
        assert_eq!(Period::new(13, 2024), Err(PeriodError::MonthOutOfRange(13)));
    }

    #[test]
    fn test_period_year_out_of_range() {
        assert_eq!(Period::new(7, 24), Err(PeriodError::YearOutOfRange(24)));
    }

    #[test]
    fn test_preceding_period() {
        let mid_year = chrono::NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        assert_eq!(Period::preceding(mid_year), Period::new(7, 2024).unwrap());

        let january = chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(Period::preceding(january), Period::new(12, 2023).unwrap());
    }

    #[test]
    fn test_domain_slug_round_trip() {
        let domains = [
            ImportDomain::Sales,
            ImportDomain::Ledger,
            ImportDomain::OtherIncome,
            ImportDomain::OtherExpense,
            ImportDomain::ClosingStock,
            ImportDomain::VsiHours,
            ImportDomain::InwardConsumptionSlurry,
        ];
        for domain in domains {
            assert_eq!(ImportDomain::from_slug(domain.slug()), Some(domain));
        }
        assert_eq!(ImportDomain::from_slug("unknown"), None);
    }
}
