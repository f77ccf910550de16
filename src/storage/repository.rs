use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::application::CategoryAggregate;
use crate::domain::{
    Category, CategoryKind, DateRange, Profile, TelegramId, Transaction, User, UserId,
};

use super::{MAX_STORED_YEAR, MIGRATION_001_INITIAL, TIMESTAMP_FORMAT};

/// Repository for persisting and querying users, categories and transactions.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // User operations
    // ========================

    pub async fn save_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, telegram_id, username, first_name, last_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(user.telegram_id)
        .bind(&user.profile.username)
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(user.created_at.format(TIMESTAMP_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .context("Failed to save user")?;
        Ok(())
    }

    /// Get a user by the id the messaging platform assigned.
    pub async fn get_user_by_telegram_id(&self, telegram_id: TelegramId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, telegram_id, username, first_name, last_name, created_at
            FROM users
            WHERE telegram_id = ?
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Delete a user together with their categories and transactions.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;
        Ok(())
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(User {
            id: Uuid::parse_str(&id_str).context("Invalid user ID")?,
            telegram_id: row.get("telegram_id"),
            profile: Profile {
                username: row.get("username"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
            },
            created_at: parse_timestamp(&created_at_str).context("Invalid created_at")?,
        })
    }

    // ========================
    // Category operations
    // ========================

    pub async fn save_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, user_id, name, kind)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(category.id.to_string())
        .bind(category.user_id.to_string())
        .bind(&category.name)
        .bind(category.kind.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to save category")?;
        Ok(())
    }

    /// Get one of the user's categories by name and kind.
    pub async fn get_category(
        &self,
        user_id: UserId,
        name: &str,
        kind: CategoryKind,
    ) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, kind
            FROM categories
            WHERE user_id = ? AND name = ? AND kind = ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(name)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch category")?;

        row.as_ref().map(Self::row_to_category).transpose()
    }

    /// List a user's categories ordered by kind, then name.
    pub async fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, kind
            FROM categories
            WHERE user_id = ?
            ORDER BY kind, name
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        rows.iter().map(Self::row_to_category).collect()
    }

    fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
        let id_str: String = row.get("id");
        let user_id_str: String = row.get("user_id");
        let kind_str: String = row.get("kind");

        Ok(Category {
            id: Uuid::parse_str(&id_str).context("Invalid category ID")?,
            user_id: Uuid::parse_str(&user_id_str).context("Invalid user ID")?,
            name: row.get("name"),
            kind: CategoryKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid category kind: {}", kind_str))?,
        })
    }

    // ========================
    // Transaction operations
    // ========================

    /// Save a transaction. The insert only matches a category owned by the
    /// transaction's user, so a cross-user reference is rejected here too.
    pub async fn save_transaction(&self, transaction: &Transaction) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, category_id, amount_cents, occurred_at)
            SELECT ?, c.user_id, c.id, ?, ?
            FROM categories c
            WHERE c.id = ? AND c.user_id = ?
            "#,
        )
        .bind(transaction.id.to_string())
        .bind(transaction.amount_cents)
        .bind(transaction.occurred_at.format(TIMESTAMP_FORMAT).to_string())
        .bind(transaction.category_id.to_string())
        .bind(transaction.user_id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to save transaction")?;

        if result.rows_affected() != 1 {
            anyhow::bail!(
                "Category {} does not belong to user {}",
                transaction.category_id,
                transaction.user_id
            );
        }
        Ok(())
    }

    /// Sum a user's transactions per (category name, kind), optionally within a range.
    /// Groups come back ordered by name, then kind.
    pub async fn sum_by_category(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> Result<Vec<CategoryAggregate>> {
        let mut query = String::from(
            r#"
            SELECT c.name AS name, c.kind AS kind, SUM(t.amount_cents) AS total
            FROM transactions t
            JOIN categories c ON c.id = t.category_id
            WHERE t.user_id = ?
            "#,
        );

        // Collect bindings first so they live long enough
        let bounds = range.map(format_bounds).unwrap_or_default();
        push_range_filter(&mut query, "t.occurred_at", &bounds);
        query.push_str(" GROUP BY c.name, c.kind ORDER BY c.name, c.kind");

        let mut sql_query = sqlx::query(&query).bind(user_id.to_string());
        for bound in &bounds {
            sql_query = sql_query.bind(bound);
        }

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .context("Failed to sum transactions by category")?;

        rows.iter()
            .map(|row| {
                let kind_str: String = row.get("kind");
                Ok(CategoryAggregate {
                    name: row.get("name"),
                    kind: CategoryKind::from_str(&kind_str)
                        .ok_or_else(|| anyhow::anyhow!("Invalid category kind: {}", kind_str))?,
                    total: row.get("total"),
                })
            })
            .collect()
    }

    /// Count a user's transactions, optionally within a range.
    pub async fn count_transactions(
        &self,
        user_id: UserId,
        range: Option<DateRange>,
    ) -> Result<i64> {
        let mut query = String::from("SELECT COUNT(*) AS count FROM transactions WHERE user_id = ?");

        let bounds = range.map(format_bounds).unwrap_or_default();
        push_range_filter(&mut query, "occurred_at", &bounds);

        let mut sql_query = sqlx::query(&query).bind(user_id.to_string());
        for bound in &bounds {
            sql_query = sql_query.bind(bound);
        }

        let row = sql_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count transactions")?;

        Ok(row.get("count"))
    }
}

/// Lower bound, then the upper bound when it is representable.
///
/// Stored timestamps have four-digit years. An end on Jan 1 of year 10000 would
/// be written as `+10000-...`, which sorts below every stored value, so it is
/// left out: nothing stored can reach it anyway.
fn format_bounds(range: DateRange) -> Vec<String> {
    let mut bounds = vec![range.start_bound().format(TIMESTAMP_FORMAT).to_string()];
    if range.end.year() <= MAX_STORED_YEAR {
        bounds.push(range.end_bound().format(TIMESTAMP_FORMAT).to_string());
    }
    bounds
}

fn push_range_filter(query: &mut String, column: &str, bounds: &[String]) {
    if !bounds.is_empty() {
        query.push_str(&format!(" AND {column} >= ?"));
    }
    if bounds.len() > 1 {
        query.push_str(&format!(" AND {column} < ?"));
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .with_context(|| format!("Invalid timestamp: {}", s))
}
