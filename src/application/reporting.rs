use serde::{Deserialize, Serialize};

use crate::domain::{CategoryKind, Cents, DateRange, Entry};

use super::AppError;

// Helper struct for repository aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAggregate {
    pub name: String,
    pub kind: CategoryKind,
    pub total: Cents,
}

impl CategoryAggregate {
    pub fn entry(&self) -> Entry {
        Entry::new(self.kind, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLine {
    pub category: String,
    pub total: Cents,
}

/// Income and expense totals of one user over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// `None` for an all-time report
    pub range: Option<DateRange>,
    pub income: Vec<CategoryLine>,
    pub expense: Vec<CategoryLine>,
    pub income_total: Cents,
    pub expense_total: Cents,
    pub balance: Cents,
    pub transaction_count: i64,
}

impl PeriodReport {
    /// Fold per-category sums into a report. Returns `None` when there is
    /// nothing to report, which callers must keep apart from a zero balance.
    ///
    /// Lines keep the order of `groups`. Totals that do not fit in `Cents`
    /// fail with [`AppError::TotalOverflow`].
    pub fn aggregate(
        range: Option<DateRange>,
        groups: Vec<CategoryAggregate>,
        transaction_count: i64,
    ) -> Result<Option<Self>, AppError> {
        if groups.is_empty() {
            return Ok(None);
        }

        let mut report = PeriodReport {
            range,
            income: Vec::new(),
            expense: Vec::new(),
            income_total: 0,
            expense_total: 0,
            balance: 0,
            transaction_count,
        };

        for group in groups {
            let entry = group.entry();
            report.balance = checked_sum(report.balance, entry.signed())?;

            let line = CategoryLine {
                category: group.name,
                total: entry.amount(),
            };
            match entry {
                Entry::Income(amount) => {
                    report.income_total = checked_sum(report.income_total, amount)?;
                    report.income.push(line);
                }
                Entry::Expense(amount) => {
                    report.expense_total = checked_sum(report.expense_total, amount)?;
                    report.expense.push(line);
                }
            }
        }

        Ok(Some(report))
    }
}

fn checked_sum(total: Cents, amount: Cents) -> Result<Cents, AppError> {
    total.checked_add(amount).ok_or(AppError::TotalOverflow)
}
