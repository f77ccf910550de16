use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CategoryId, CategoryKind, Cents, UserId};

pub type TransactionId = Uuid;

/// An amount tagged with its direction.
///
/// Storage keeps every amount positive; the sign only exists here, so a balance
/// is the plain sum of `signed()` values and never negates twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum Entry {
    Income(Cents),
    Expense(Cents),
}

impl Entry {
    pub fn new(kind: CategoryKind, amount: Cents) -> Self {
        match kind {
            CategoryKind::Income => Entry::Income(amount),
            CategoryKind::Expense => Entry::Expense(amount),
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Entry::Income(_) => CategoryKind::Income,
            Entry::Expense(_) => CategoryKind::Expense,
        }
    }

    /// The unsigned amount as stored.
    pub fn amount(&self) -> Cents {
        match self {
            Entry::Income(amount) | Entry::Expense(amount) => *amount,
        }
    }

    /// Contribution to the balance: positive for income, negative for expense.
    pub fn signed(&self) -> Cents {
        match self {
            Entry::Income(amount) => *amount,
            Entry::Expense(amount) => -*amount,
        }
    }
}

/// A single recorded amount against one of the user's categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    /// Amount in kopecks (always positive)
    pub amount_cents: Cents,
    /// When the money moved, in local time
    pub occurred_at: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        amount_cents: Cents,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            amount_cents,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_sign_follows_kind() {
        let income = Entry::new(CategoryKind::Income, 5000000);
        let expense = Entry::new(CategoryKind::Expense, 30000);

        assert_eq!(income.signed(), 5000000);
        assert_eq!(expense.signed(), -30000);
        assert_eq!(expense.amount(), 30000);
        assert_eq!(expense.kind(), CategoryKind::Expense);
        assert_eq!(income.signed() + expense.signed(), 4970000);
    }
}
