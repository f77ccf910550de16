use chrono::NaiveDateTime;
use tracing::info;

use crate::domain::{
    Category, CategoryKind, Cents, DateRange, Profile, TelegramId, Transaction, User,
};
use crate::storage::Repository;

use super::{AppError, PeriodReport};

/// Application service providing the bot's use cases.
/// Every transport (console, Telegram) goes through this type.
pub struct FinanceService {
    repo: Repository,
}

/// Result of `/start`
pub enum Registration {
    Created(User),
    Existing(User),
}

/// Result of logging a transaction
pub struct LoggedTransaction {
    pub transaction: Transaction,
    pub category: Category,
}

impl FinanceService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a database at the given path, creating it if needed.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // User operations
    // ========================

    /// Register a user, or return the existing record.
    pub async fn register_user(
        &self,
        telegram_id: TelegramId,
        profile: Profile,
    ) -> Result<Registration, AppError> {
        if let Some(user) = self.repo.get_user_by_telegram_id(telegram_id).await? {
            info!(telegram_id, "user already registered");
            return Ok(Registration::Existing(user));
        }

        let user = User::new(telegram_id, profile);
        self.repo.save_user(&user).await?;
        info!(telegram_id, user_id = %user.id, "registered new user");
        Ok(Registration::Created(user))
    }

    /// Get a registered user.
    pub async fn get_user(&self, telegram_id: TelegramId) -> Result<User, AppError> {
        self.repo
            .get_user_by_telegram_id(telegram_id)
            .await?
            .ok_or(AppError::UserNotRegistered(telegram_id))
    }

    /// Delete a user with all of their categories and transactions.
    pub async fn delete_user(&self, telegram_id: TelegramId) -> Result<User, AppError> {
        let user = self.get_user(telegram_id).await?;
        self.repo.delete_user(user.id).await?;
        info!(telegram_id, "deleted user");
        Ok(user)
    }

    // ========================
    // Category operations
    // ========================

    pub async fn add_category(
        &self,
        telegram_id: TelegramId,
        name: &str,
        kind: CategoryKind,
    ) -> Result<Category, AppError> {
        let user = self.get_user(telegram_id).await?;

        if self.repo.get_category(user.id, name, kind).await?.is_some() {
            return Err(AppError::CategoryAlreadyExists {
                name: name.to_string(),
                kind,
            });
        }

        let category = Category::new(user.id, name, kind);
        self.repo.save_category(&category).await?;
        info!(telegram_id, category = %category.name, %kind, "added category");
        Ok(category)
    }

    pub async fn list_categories(&self, telegram_id: TelegramId) -> Result<Vec<Category>, AppError> {
        let user = self.get_user(telegram_id).await?;
        Ok(self.repo.list_categories(user.id).await?)
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record an amount against one of the user's existing categories.
    pub async fn log_transaction(
        &self,
        telegram_id: TelegramId,
        kind: CategoryKind,
        amount_cents: Cents,
        category_name: &str,
        occurred_at: NaiveDateTime,
    ) -> Result<LoggedTransaction, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let user = self.get_user(telegram_id).await?;
        let category = self
            .repo
            .get_category(user.id, category_name, kind)
            .await?
            .ok_or_else(|| AppError::CategoryNotFound {
                name: category_name.to_string(),
                kind,
            })?;

        let transaction = Transaction::new(user.id, category.id, amount_cents, occurred_at);
        self.repo.save_transaction(&transaction).await?;
        info!(
            telegram_id,
            amount_cents,
            category = %category.name,
            "logged transaction"
        );

        Ok(LoggedTransaction {
            transaction,
            category,
        })
    }

    // ========================
    // Reporting
    // ========================

    /// Build the user's report for a range (`None` for all time).
    /// `Ok(None)` means the range holds no transactions.
    pub async fn generate_report(
        &self,
        telegram_id: TelegramId,
        range: Option<DateRange>,
    ) -> Result<Option<PeriodReport>, AppError> {
        let user = self.get_user(telegram_id).await?;
        let groups = self.repo.sum_by_category(user.id, range).await?;
        if groups.is_empty() {
            return Ok(None);
        }

        let count = self.repo.count_transactions(user.id, range).await?;
        PeriodReport::aggregate(range, groups, count)
    }
}
