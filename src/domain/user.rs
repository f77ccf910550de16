use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// Numeric user id assigned by the messaging platform.
pub type TelegramId = i64;

/// Profile fields the messaging platform reports for a sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub telegram_id: TelegramId,
    pub profile: Profile,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn new(telegram_id: TelegramId, profile: Profile) -> Self {
        Self {
            id: Uuid::new_v4(),
            telegram_id,
            profile,
            created_at: Utc::now().naive_utc(),
        }
    }
}
