use serde::{Deserialize, Serialize};

/// Button captions. Incoming text is matched against these case-insensitively.
pub mod labels {
    pub const ADD_EXPENSE: &str = "Добавить трату";
    pub const ADD_INCOME: &str = "Добавить доход";
    pub const REPORT: &str = "Отчёт";
    pub const ADD_CATEGORY: &str = "Добавить категорию";
    pub const HELP: &str = "Помощь";

    pub const CUSTOM_PERIOD: &str = "Произвольный период";
    pub const TODAY: &str = "Текущий день";
    pub const THIS_WEEK: &str = "Текущая неделя";
    pub const THIS_MONTH: &str = "Текущий месяц";
    pub const THIS_YEAR: &str = "Текущий год";
    pub const ALL_TIME: &str = "Все время";
    pub const BACK: &str = "Назад";
}

const ROW_WIDTH: usize = 2;

/// Quick-reply labels shown under a reply, laid out in rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    pub fn from_labels(labels: &[&str]) -> Self {
        Self {
            rows: labels
                .chunks(ROW_WIDTH)
                .map(|row| row.iter().map(|label| label.to_string()).collect())
                .collect(),
        }
    }

    pub fn main_menu() -> Self {
        Self::from_labels(&[
            labels::ADD_EXPENSE,
            labels::ADD_INCOME,
            labels::REPORT,
            labels::ADD_CATEGORY,
            labels::HELP,
        ])
    }

    /// Five presets, the custom range, and a way back.
    pub fn period_menu() -> Self {
        Self::from_labels(&[
            labels::CUSTOM_PERIOD,
            labels::TODAY,
            labels::THIS_WEEK,
            labels::THIS_MONTH,
            labels::THIS_YEAR,
            labels::ALL_TIME,
            labels::BACK,
        ])
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}
