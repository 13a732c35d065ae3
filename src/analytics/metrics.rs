use crate::models::analytics::MetricsResult;
use crate::models::record::{FinanceRecord, RecordType};

use super::round2;

/// Summarize records into totals and ratios.
///
/// Ratios are relative to total income and are `0` when there is no income.
/// Rounding happens once, on the way out.
pub fn compute_metrics(records: &[FinanceRecord]) -> MetricsResult {
    if records.is_empty() {
        return MetricsResult::default();
    }

    let (total_income, total_expenses) =
        records
            .iter()
            .fold((0.0, 0.0), |(income, expenses), record| match record.record_type {
                RecordType::Income => (income + record.amount, expenses),
                RecordType::Expense => (income, expenses + record.amount),
            });

    let profit = total_income - total_expenses;
    let (profit_margin, expense_ratio) = if total_income > 0.0 {
        (
            profit / total_income * 100.0,
            total_expenses / total_income * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    MetricsResult {
        total_income: round2(total_income),
        total_expenses: round2(total_expenses),
        profit: round2(profit),
        profit_margin: round2(profit_margin),
        expense_ratio: round2(expense_ratio),
        record_count: records.len(),
    }
}
