use crate::application::{CategoryLine, PeriodReport};
use crate::domain::DateRange;

use super::texts::rubles;

const TITLE_DATE_FORMAT: &str = "%d.%m.%Y";

pub fn period_title(range: Option<&DateRange>) -> String {
    match range {
        Some(range) => format!(
            "📊 Отчёт за период с {} по {}",
            range.start.format(TITLE_DATE_FORMAT),
            range.last_day().format(TITLE_DATE_FORMAT)
        ),
        None => "📊 Отчёт за всё время".to_string(),
    }
}

/// Render a report as chat text.
///
/// The income and expense sections disappear when they have no lines; balance
/// and transaction count are always printed.
pub fn render_report(report: &PeriodReport) -> String {
    let mut lines = vec![period_title(report.range.as_ref())];

    push_section(&mut lines, "💰 Доходы:", "Итого доходы", &report.income, report.income_total);
    push_section(
        &mut lines,
        "💸 Расходы:",
        "Итого расходы",
        &report.expense,
        report.expense_total,
    );

    lines.push(format!("\n📈 Баланс: {}", rubles(report.balance)));
    lines.push(format!("Всего транзакций: {}", report.transaction_count));

    lines.join("\n")
}

fn push_section(
    lines: &mut Vec<String>,
    heading: &str,
    total_label: &str,
    items: &[CategoryLine],
    total: i64,
) {
    if items.is_empty() {
        return;
    }

    lines.push(format!("\n{heading}"));
    for item in items {
        lines.push(format!("  - {}: {}", item.category, rubles(item.total)));
    }
    lines.push(format!("  {total_label}: {}", rubles(total)));
}
