mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{register_with_categories, say, test_handler, test_handler_at, ALICE, BOB};
use kopeck::bot::{texts, DialogueState, Keyboard, ReportStep};

const NOW: &str = "2025-07-09 12:00";

fn report_state(step: ReportStep) -> Option<DialogueState> {
    Some(DialogueState::Report(step))
}

#[tokio::test]
async fn test_start_then_help() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;

    let reply = say(&mut handler, ALICE, "/start").await;
    assert_eq!(reply.text, texts::WELCOME);
    assert_eq!(reply.keyboard, Some(Keyboard::main_menu()));

    let reply = say(&mut handler, ALICE, "/start").await;
    assert_eq!(reply.text, texts::HELP);

    Ok(())
}

#[tokio::test]
async fn test_preset_report_flow() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;

    let reply = say(&mut handler, ALICE, "Добавить категорию").await;
    assert_eq!(reply.text, texts::ADD_CATEGORY_PROMPT);
    assert_eq!(handler.dialogue(ALICE), Some(DialogueState::AwaitingCategory));

    let reply = say(&mut handler, ALICE, "трата Продукты").await;
    assert_eq!(reply.text, texts::category_added("продукты"));
    assert_eq!(handler.dialogue(ALICE), None);

    let reply = say(&mut handler, ALICE, "трата 300 продукты").await;
    assert_eq!(reply.text, "💸 Трата 300.00₽ по категории 'продукты' сохранена.");

    let reply = say(&mut handler, ALICE, "Отчёт").await;
    assert_eq!(reply.text, texts::SELECT_PERIOD);
    assert_eq!(reply.keyboard, Some(Keyboard::period_menu()));
    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectPeriodType));

    let reply = say(&mut handler, ALICE, "Текущий месяц").await;
    assert!(reply
        .text
        .starts_with("📊 Отчёт за период с 01.07.2025 по 31.07.2025"));
    assert!(reply.text.contains("  - продукты: 300.00₽"));
    assert!(reply.text.contains("📈 Баланс: -300.00₽"));
    assert_eq!(reply.keyboard, Some(Keyboard::main_menu()));
    assert_eq!(handler.dialogue(ALICE), None);

    Ok(())
}

#[tokio::test]
async fn test_custom_range_retries_invalid_dates() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    register_with_categories(handler.service(), ALICE).await?;
    say(&mut handler, ALICE, "доход 50000 зарплата").await;

    say(&mut handler, ALICE, "/report").await;
    let reply = say(&mut handler, ALICE, "Произвольный период").await;
    assert_eq!(reply.text, texts::START_DATE_PROMPT);
    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectStartDate));

    for bad in ["2025-7-1", "01.07.2025", "2025-02-30", "вчера"] {
        let reply = say(&mut handler, ALICE, bad).await;
        assert_eq!(reply.text, texts::INVALID_DATE);
        assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectStartDate));
    }

    let reply = say(&mut handler, ALICE, "2025-07-01").await;
    assert_eq!(reply.text, texts::END_DATE_PROMPT);
    let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    assert_eq!(
        handler.dialogue(ALICE),
        report_state(ReportStep::SelectEndDate { start })
    );

    let reply = say(&mut handler, ALICE, "15/07/2025").await;
    assert_eq!(reply.text, texts::INVALID_DATE);
    assert_eq!(
        handler.dialogue(ALICE),
        report_state(ReportStep::SelectEndDate { start })
    );

    let reply = say(&mut handler, ALICE, "2025-07-15").await;
    assert!(reply
        .text
        .starts_with("📊 Отчёт за период с 01.07.2025 по 15.07.2025"));
    assert!(reply.text.contains("Итого доходы: 50000.00₽"));
    assert!(reply.text.ends_with("Всего транзакций: 1"));
    assert_eq!(handler.dialogue(ALICE), None);

    Ok(())
}

#[tokio::test]
async fn test_cancel_and_unknown_period() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;
    say(&mut handler, ALICE, "Отчёт").await;

    let reply = say(&mut handler, ALICE, "прошлый год").await;
    assert_eq!(reply.text, texts::UNKNOWN_PERIOD);
    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectPeriodType));

    let reply = say(&mut handler, ALICE, "Назад").await;
    assert_eq!(reply.text, texts::BACK_TO_MENU);
    assert_eq!(reply.keyboard, Some(Keyboard::main_menu()));
    assert_eq!(handler.dialogue(ALICE), None);

    Ok(())
}

#[tokio::test]
async fn test_empty_period_reports_no_data() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;
    say(&mut handler, ALICE, "Отчёт").await;

    let reply = say(&mut handler, ALICE, "Все время").await;
    assert_eq!(reply.text, texts::NO_DATA);
    assert_eq!(handler.dialogue(ALICE), None);

    Ok(())
}

#[tokio::test]
async fn test_unregistered_user_leaves_the_flow() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;

    say(&mut handler, ALICE, "Отчёт").await;
    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectPeriodType));

    let reply = say(&mut handler, ALICE, "Текущий день").await;
    assert_eq!(reply.text, texts::NOT_REGISTERED);
    assert_eq!(handler.dialogue(ALICE), None);

    let reply = say(&mut handler, ALICE, "трата 300 кафе").await;
    assert_eq!(reply.text, texts::NOT_REGISTERED);

    let reply = say(&mut handler, ALICE, "трата много кафе").await;
    assert_eq!(reply.text, texts::NOT_REGISTERED);

    Ok(())
}

#[tokio::test]
async fn test_users_have_separate_dialogues() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;
    say(&mut handler, BOB, "/start").await;

    say(&mut handler, ALICE, "Отчёт").await;
    say(&mut handler, ALICE, "Произвольный период").await;
    say(&mut handler, BOB, "Отчёт").await;

    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectStartDate));
    assert_eq!(handler.dialogue(BOB), report_state(ReportStep::SelectPeriodType));

    let reply = say(&mut handler, BOB, "Назад").await;
    assert_eq!(reply.text, texts::BACK_TO_MENU);
    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectStartDate));

    Ok(())
}

#[tokio::test]
async fn test_new_flow_replaces_the_old_one() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;

    say(&mut handler, ALICE, "/report").await;
    say(&mut handler, ALICE, "Произвольный период").await;
    say(&mut handler, ALICE, "2025-07-01").await;

    say(&mut handler, ALICE, "/report").await;
    assert_eq!(handler.dialogue(ALICE), report_state(ReportStep::SelectPeriodType));

    say(&mut handler, ALICE, "/add_category").await;
    assert_eq!(handler.dialogue(ALICE), Some(DialogueState::AwaitingCategory));

    Ok(())
}

#[tokio::test]
async fn test_category_dialogue_errors() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;

    say(&mut handler, ALICE, "/add_category").await;
    let reply = say(&mut handler, ALICE, "расход аптека").await;
    assert_eq!(reply.text, texts::CATEGORY_TYPE);
    assert_eq!(handler.dialogue(ALICE), None);

    say(&mut handler, ALICE, "/add_category").await;
    let reply = say(&mut handler, ALICE, "аптека").await;
    assert_eq!(reply.text, texts::CATEGORY_FORMAT);

    say(&mut handler, ALICE, "/add_category").await;
    say(&mut handler, ALICE, "трата аптека").await;
    say(&mut handler, ALICE, "/add_category").await;
    let reply = say(&mut handler, ALICE, "трата аптека").await;
    assert_eq!(reply.text, texts::category_exists("аптека"));

    Ok(())
}

#[tokio::test]
async fn test_transaction_replies() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    register_with_categories(handler.service(), ALICE).await?;

    let reply = say(&mut handler, ALICE, "Добавить доход").await;
    assert_eq!(reply.text, texts::transaction_prompt(kopeck::CategoryKind::Income));

    let reply = say(&mut handler, ALICE, "доход 50000 зарплата").await;
    assert_eq!(reply.text, "💰 Доход 50000.00₽ по категории 'зарплата' сохранена.");

    let reply = say(&mut handler, ALICE, "трата 300 кафе").await;
    assert_eq!(reply.text, texts::category_not_found("кафе"));

    let reply = say(&mut handler, ALICE, "трата 3,50 продукты").await;
    assert_eq!(reply.text, texts::AMOUNT_FORMAT);

    let reply = say(&mut handler, ALICE, "трата 300").await;
    assert_eq!(reply.text, texts::TRANSACTION_FORMAT);

    let report = handler.service().generate_report(ALICE, None).await?.unwrap();
    assert_eq!(report.transaction_count, 1);

    Ok(())
}

#[tokio::test]
async fn test_fallback_replies() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;

    let reply = say(&mut handler, ALICE, "/unknown").await;
    assert_eq!(reply.text, texts::UNKNOWN_COMMAND);

    let reply = say(&mut handler, ALICE, "привет").await;
    assert_eq!(reply.text, texts::NOT_UNDERSTOOD);
    assert_eq!(reply.keyboard, Some(Keyboard::main_menu()));

    Ok(())
}

#[tokio::test]
async fn test_failed_report_clears_the_flow() -> Result<()> {
    // The day after the last representable date cannot be computed
    let now = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
    let (mut handler, _temp) = test_handler_at(now).await?;
    say(&mut handler, ALICE, "/start").await;
    say(&mut handler, ALICE, "Отчёт").await;

    let reply = say(&mut handler, ALICE, "Текущий день").await;
    assert_eq!(reply.text, texts::REPORT_FAILED);
    assert_eq!(reply.keyboard, Some(Keyboard::main_menu()));
    assert_eq!(handler.dialogue(ALICE), None);

    Ok(())
}

#[tokio::test]
async fn test_overflowing_report_clears_the_flow() -> Result<()> {
    let (mut handler, _temp) = test_handler(NOW).await?;
    say(&mut handler, ALICE, "/start").await;
    for name in ["а", "б"] {
        say(&mut handler, ALICE, "/add_category").await;
        say(&mut handler, ALICE, &format!("доход {name}")).await;
        let reply = say(&mut handler, ALICE, &format!("доход 92233720368547758 {name}")).await;
        assert!(reply.text.starts_with("💰 Доход"));
    }

    say(&mut handler, ALICE, "/report").await;
    let reply = say(&mut handler, ALICE, "Все время").await;
    assert_eq!(reply.text, texts::REPORT_FAILED);
    assert_eq!(handler.dialogue(ALICE), None);

    Ok(())
}
