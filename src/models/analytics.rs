use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsResult {
    pub total_income: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub profit_margin: f64,
    pub expense_ratio: f64,
    pub record_count: usize,
}

/// Chart payload: `income_data[i]` and `expense_data[i]` belong to `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResult {
    pub labels: Vec<String>,
    pub income_data: Vec<f64>,
    pub expense_data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Monthly,
    Yearly,
    AllTime,
}

impl Granularity {
    /// Anything other than "monthly" or "yearly" means all-time.
    pub fn from_filter(filter: Option<&str>) -> Self {
        match filter {
            Some("monthly") => Granularity::Monthly,
            Some("yearly") => Granularity::Yearly,
            _ => Granularity::AllTime,
        }
    }

    /// Lower bound used by the coarse record filter.
    pub fn window_start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Monthly => today.with_day(1),
            Granularity::Yearly => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Granularity::AllTime => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>, // "monthly", "yearly", anything else = all time
}

impl FilterQuery {
    pub fn granularity(&self) -> Granularity {
        Granularity::from_filter(self.filter.as_deref())
    }
}
