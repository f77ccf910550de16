//! Text grammar of the bot.
//!
//! All matching happens on the trimmed, lowercased message, so "Отчёт" and
//! "отчёт" are the same command. Category names come out lowercased as well.

use thiserror::Error;

use crate::domain::{parse_cents, CategoryKind, Cents, Preset};

use super::keyboard::labels;

pub const EXPENSE_WORD: &str = "трата";
pub const INCOME_WORD: &str = "доход";

/// Commands that are recognised regardless of the dialogue step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// Ask for a `<type> <name>` line describing a new category
    AddCategory,
    /// Menu button asking how to log an expense or income
    TransactionPrompt(CategoryKind),
    LogTransaction {
        kind: CategoryKind,
        amount: Cents,
        category: String,
    },
    Report,
}

/// An answer to the period menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodChoice {
    Preset(Preset),
    Custom,
    Cancel,
}

/// A `<type> <name>` line creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub kind: CategoryKind,
    pub name: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("expected `<type> <amount> <category>`")]
    TransactionFormat,

    #[error("invalid amount: {0}")]
    Amount(String),

    #[error("expected `<type> <name>`")]
    CategoryFormat,

    #[error("unknown category type: {0}")]
    CategoryType(String),
}

impl Command {
    /// Parse a global command. `Ok(None)` means the text is not one, and may
    /// still be an answer to the current dialogue step.
    pub fn parse(text: &str) -> Result<Option<Command>, CommandError> {
        let normalized = text.trim().to_lowercase();

        let command = match normalized.as_str() {
            "/start" => Command::Start,
            "/help" | "помощь" => Command::Help,
            "/add_category" | "добавить категорию" => Command::AddCategory,
            "/report" | "отчёт" => Command::Report,
            "добавить трату" => Command::TransactionPrompt(CategoryKind::Expense),
            "добавить доход" => Command::TransactionPrompt(CategoryKind::Income),
            _ => {
                let parts: Vec<&str> = normalized.split_whitespace().collect();
                match parts.first().copied().and_then(kind_from_word) {
                    Some(kind) => parse_transaction(kind, &parts)?,
                    None => return Ok(None),
                }
            }
        };

        Ok(Some(command))
    }
}

impl PeriodChoice {
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        [
            (labels::CUSTOM_PERIOD, PeriodChoice::Custom),
            (labels::TODAY, PeriodChoice::Preset(Preset::Today)),
            (labels::THIS_WEEK, PeriodChoice::Preset(Preset::ThisWeek)),
            (labels::THIS_MONTH, PeriodChoice::Preset(Preset::ThisMonth)),
            (labels::THIS_YEAR, PeriodChoice::Preset(Preset::ThisYear)),
            (labels::ALL_TIME, PeriodChoice::Preset(Preset::AllTime)),
            (labels::BACK, PeriodChoice::Cancel),
        ]
        .into_iter()
        .find(|(label, _)| label.to_lowercase() == normalized)
        .map(|(_, choice)| choice)
    }
}

impl NewCategory {
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let normalized = text.trim().to_lowercase();
        let parts: Vec<&str> = normalized.split_whitespace().collect();
        let [type_word, name] = parts.as_slice() else {
            return Err(CommandError::CategoryFormat);
        };

        let kind = kind_from_word(type_word)
            .ok_or_else(|| CommandError::CategoryType(type_word.to_string()))?;
        Ok(NewCategory {
            kind,
            name: name.to_string(),
        })
    }
}

fn kind_from_word(word: &str) -> Option<CategoryKind> {
    match word {
        EXPENSE_WORD => Some(CategoryKind::Expense),
        INCOME_WORD => Some(CategoryKind::Income),
        _ => None,
    }
}

// Words after the category are ignored.
fn parse_transaction(kind: CategoryKind, parts: &[&str]) -> Result<Command, CommandError> {
    let [_, raw_amount, category, ..] = parts else {
        return Err(CommandError::TransactionFormat);
    };

    let amount = match parse_cents(raw_amount) {
        Ok(amount) if amount > 0 => amount,
        _ => return Err(CommandError::Amount(raw_amount.to_string())),
    };

    Ok(Command::LogTransaction {
        kind,
        amount,
        category: category.to_string(),
    })
}
