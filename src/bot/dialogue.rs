use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::TelegramId;

/// Where a user is inside the report flow.
///
/// Generating the report is not a resting step: it happens within the message
/// that completes the flow, and the state is dropped right after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStep {
    SelectPeriodType,
    SelectStartDate,
    SelectEndDate { start: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    /// The next message describes a new category
    AwaitingCategory,
    Report(ReportStep),
}

/// Per-user dialogue state, keyed by the platform user id.
///
/// Starting a flow overwrites whatever the user was doing before.
pub trait DialogueStore: Send {
    fn get(&self, user: TelegramId) -> Option<DialogueState>;

    fn set(&mut self, user: TelegramId, state: DialogueState);

    fn clear(&mut self, user: TelegramId) -> Option<DialogueState>;
}

/// Process-local store. Everything in it is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryDialogueStore {
    states: HashMap<TelegramId, DialogueState>,
}

impl InMemoryDialogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl DialogueStore for InMemoryDialogueStore {
    fn get(&self, user: TelegramId) -> Option<DialogueState> {
        self.states.get(&user).copied()
    }

    fn set(&mut self, user: TelegramId, state: DialogueState) {
        self.states.insert(user, state);
    }

    fn clear(&mut self, user: TelegramId) -> Option<DialogueState> {
        self.states.remove(&user)
    }
}
