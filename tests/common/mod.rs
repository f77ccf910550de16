// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;
use kopeck::application::{FinanceService, FixedClock};
use kopeck::bot::{ChatHandler, IncomingMessage, InMemoryDialogueStore, Reply, Sender};
use kopeck::domain::{CategoryKind, Profile, TelegramId};
use tempfile::TempDir;

pub const ALICE: TelegramId = 1001;
pub const BOB: TelegramId = 2002;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(FinanceService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = FinanceService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse "YYYY-MM-DD HH:MM" into a naive timestamp
pub fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// A handler over a fresh database whose clock is frozen at `now`
pub async fn test_handler(now: &str) -> Result<(ChatHandler, TempDir)> {
    test_handler_at(parse_datetime(now)).await
}

pub async fn test_handler_at(now: NaiveDateTime) -> Result<(ChatHandler, TempDir)> {
    let (service, temp_dir) = test_service().await?;
    let clock = Arc::new(FixedClock(now));
    Ok((
        ChatHandler::new(service, InMemoryDialogueStore::new(), clock),
        temp_dir,
    ))
}

pub async fn say(handler: &mut ChatHandler, user: TelegramId, text: &str) -> Reply {
    handler
        .handle(&IncomingMessage::new(Sender::new(user), text))
        .await
}

/// Register a user with one income and one expense category
pub async fn register_with_categories(service: &FinanceService, user: TelegramId) -> Result<()> {
    service.register_user(user, Profile::default()).await?;
    service
        .add_category(user, "зарплата", CategoryKind::Income)
        .await?;
    service
        .add_category(user, "продукты", CategoryKind::Expense)
        .await?;
    Ok(())
}
