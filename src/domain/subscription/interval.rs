//! Billing interval (recurrence cadence).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// How often a record bills. One-time orders are `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Single,
    Daily,
    Weekly,
    Monthly,
    Annually,
}

impl BillingInterval {
    /// Maps a provider period unit to an interval.
    ///
    /// Accepts the unit vocabularies of every supported provider
    /// (`DAY`, `day`, `daily`, `month`, `MONTH`, `year`, `annually`, ...).
    pub fn from_unit(unit: &str) -> Option<Self> {
        match unit.trim().to_ascii_lowercase().as_str() {
            "single" | "once" | "one_time" => Some(BillingInterval::Single),
            "day" | "days" | "daily" => Some(BillingInterval::Daily),
            "week" | "weeks" | "weekly" => Some(BillingInterval::Weekly),
            "month" | "months" | "monthly" => Some(BillingInterval::Monthly),
            "year" | "years" | "yearly" | "annual" | "annually" => {
                Some(BillingInterval::Annually)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Single => "single",
            BillingInterval::Daily => "daily",
            BillingInterval::Weekly => "weekly",
            BillingInterval::Monthly => "monthly",
            BillingInterval::Annually => "annually",
        }
    }

    /// Returns `from` moved forward by one billing unit. `Single` adds nothing.
    pub fn extend(&self, from: Timestamp) -> Timestamp {
        match self {
            BillingInterval::Single => from,
            BillingInterval::Daily => from.add_days(1),
            BillingInterval::Weekly => from.add_days(7),
            BillingInterval::Monthly => from.add_months(1),
            BillingInterval::Annually => from.add_years(1),
        }
    }

    /// Length of `count` units in whole days, used for declared trial lengths.
    pub fn days_for(&self, count: u32) -> i64 {
        let count = i64::from(count);
        match self {
            BillingInterval::Single => 0,
            BillingInterval::Daily => count,
            BillingInterval::Weekly => count * 7,
            BillingInterval::Monthly => count * 30,
            BillingInterval::Annually => count * 365,
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
