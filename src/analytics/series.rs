use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::analytics::{Granularity, SeriesResult};
use crate::models::record::{FinanceRecord, RecordType};

use super::{parse_record_date, round2, AnalyticsError};

pub const MONTH_LABELS: [&str; 12] = [
    "Січ", "Лют", "Бер", "Кві", "Тра", "Чер", "Лип", "Сер", "Вер", "Жов", "Лис", "Гру",
];

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    income: f64,
    expense: f64,
}

impl Bucket {
    fn add(&mut self, record: &FinanceRecord) {
        match record.record_type {
            RecordType::Income => self.income += record.amount,
            RecordType::Expense => self.expense += record.amount,
        }
    }
}

/// Bucket records into a chart series for the given granularity.
///
/// The window (current month, current year, or everything) is derived from
/// `reference`. Every record's date is parsed, in or out of the window, and a
/// single malformed date fails the whole call.
pub fn compute_series(
    records: &[FinanceRecord],
    granularity: Granularity,
    reference: NaiveDate,
) -> Result<SeriesResult, AnalyticsError> {
    if records.is_empty() {
        return Ok(SeriesResult::default());
    }

    let dated = records
        .iter()
        .map(|record| parse_record_date(&record.date).map(|date| (date, record)))
        .collect::<Result<Vec<_>, _>>()?;

    let series = match granularity {
        Granularity::Monthly => {
            let days = days_in_month(reference.year(), reference.month());
            let mut buckets = vec![Bucket::default(); days as usize];
            for (date, record) in &dated {
                if date.year() == reference.year() && date.month() == reference.month() {
                    buckets[date.day0() as usize].add(record);
                }
            }
            collect_series((1..=days).map(|day| day.to_string()).zip(buckets))
        }
        Granularity::Yearly => {
            let mut buckets = [Bucket::default(); 12];
            for (date, record) in &dated {
                if date.year() == reference.year() {
                    buckets[date.month0() as usize].add(record);
                }
            }
            collect_series(MONTH_LABELS.iter().map(|label| label.to_string()).zip(buckets))
        }
        Granularity::AllTime => {
            let mut by_year: BTreeMap<i32, Bucket> = BTreeMap::new();
            for (date, record) in &dated {
                by_year.entry(date.year()).or_default().add(record);
            }
            collect_series(
                by_year
                    .into_iter()
                    .map(|(year, bucket)| (year.to_string(), bucket)),
            )
        }
    };

    Ok(series)
}

fn collect_series(buckets: impl Iterator<Item = (String, Bucket)>) -> SeriesResult {
    let mut series = SeriesResult::default();
    for (label, bucket) in buckets {
        series.labels.push(label);
        series.income_data.push(round2(bucket.income));
        series.expense_data.push(round2(bucket.expense));
    }
    series
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
