use crate::domain::{Profile, TelegramId};

use super::Keyboard;

/// Who sent a message, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub telegram_id: TelegramId,
    pub profile: Profile,
}

impl Sender {
    pub fn new(telegram_id: TelegramId) -> Self {
        Self {
            telegram_id,
            profile: Profile::default(),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: Sender,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}

/// Text sent back to the user. Without a keyboard the transport leaves
/// whatever buttons the user already has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_main_menu(text: impl Into<String>) -> Self {
        Self::text(text).with_keyboard(Keyboard::main_menu())
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}
