//! User-facing strings.

use crate::domain::{format_cents, CategoryKind, Cents};

pub const WELCOME: &str = "✅ Регистрация прошла успешно! Теперь ты можешь добавлять категории и транзакции.\n\n💡 Для справки используй /help";

pub const HELP: &str = "💡 Справка по боту\n\n\
💸 Добавить трату:\n\
трата <сумма> <категория>\n\
Пример: трата 300 продукты\n\n\
💰 Добавить доход:\n\
доход <сумма> <категория>\n\
Пример: доход 50000 зарплата\n\n\
📊 Показать отчёт: нажми кнопку 'Отчёт' или отправь /report\n\
📁 Добавить категорию: нажми кнопку 'Добавить категорию' или отправь /add_category\n\n\
Используй кнопки ниже для быстрого доступа 👇";

pub const NOT_REGISTERED: &str = "⚠️ Сначала нужно зарегистрироваться командой /start";

pub const ADD_CATEGORY_PROMPT: &str = "Напиши новую категорию в формате:\n\nтип название\n\nПримеры:\nтрата аптека\nдоход фриланс";
pub const CATEGORY_FORMAT: &str = "❌ Неверный формат. Попробуй ещё раз.";
pub const CATEGORY_TYPE: &str = "❌ Тип должен быть 'трата' или 'доход'.";

pub const TRANSACTION_FORMAT: &str = "❌ Неверный формат. Пример: трата 300 кафе";
pub const AMOUNT_FORMAT: &str = "❌ Неверный формат суммы. Пример: трата 300 кафе";

pub const SELECT_PERIOD: &str = "📆 Выбери тип периода для отчёта:";
pub const BACK_TO_MENU: &str = "Возвращаемся в главное меню";
pub const UNKNOWN_PERIOD: &str = "❌ Неизвестный тип периода. Попробуй еще раз.";
pub const START_DATE_PROMPT: &str = "📅 Введи начальную дату в формате ГГГГ-ММ-ДД (например, 2025-07-01):";
pub const END_DATE_PROMPT: &str = "📅 Введи конечную дату в формате ГГГГ-ММ-ДД (например, 2025-07-15):";
pub const INVALID_DATE: &str = "❌ Неверный формат даты. Используй формат ГГГГ-ММ-ДД (например, 2025-07-15)";
pub const NO_DATA: &str = "📭 Нет данных за выбранный период";

pub const UNKNOWN_COMMAND: &str = "❌ Неизвестная команда. Используй /help для списка команд.";
pub const NOT_UNDERSTOOD: &str = "Я тебя не понимаю 😢\nИспользуй кнопки или команду /help";

pub const REGISTRATION_FAILED: &str = "❌ Произошла ошибка при регистрации. Попробуй снова.";
pub const ADD_CATEGORY_FAILED: &str = "❌ Произошла ошибка при добавлении категории. Попробуй снова.";
pub const TRANSACTION_FAILED: &str = "❌ Произошла ошибка при сохранении транзакции. Попробуй снова.";
pub const REPORT_FAILED: &str = "❌ Произошла ошибка при формировании отчёта. Попробуй позже.";
pub const GENERIC_FAILURE: &str = "❌ Произошла ошибка. Попробуй позже.";

/// Amount with two decimals and the rouble sign.
pub fn rubles(cents: Cents) -> String {
    format!("{}₽", format_cents(cents))
}

pub fn transaction_prompt(kind: CategoryKind) -> String {
    let example = match kind {
        CategoryKind::Expense => "трата 300 продукты",
        CategoryKind::Income => "доход 50000 зарплата",
    };
    format!("Введи данные в формате:\n{example}")
}

pub fn transaction_saved(kind: CategoryKind, amount: Cents, category: &str) -> String {
    let (emoji, noun) = match kind {
        CategoryKind::Expense => ("💸", "Трата"),
        CategoryKind::Income => ("💰", "Доход"),
    };
    format!(
        "{emoji} {noun} {} по категории '{category}' сохранена.",
        rubles(amount)
    )
}

pub fn category_added(name: &str) -> String {
    format!("✅ Категория '{name}' добавлена!")
}

pub fn category_exists(name: &str) -> String {
    format!("ℹ️ Категория '{name}' уже существует.")
}

pub fn category_not_found(name: &str) -> String {
    format!("❌ Категория '{name}' не найдена. Добавь её через /add_category")
}
