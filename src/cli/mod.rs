use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::application::{Clock, FinanceService, PeriodReport, SystemClock};
use crate::bot::{format, ChatHandler, IncomingMessage, InMemoryDialogueStore, Reply, Sender};
use crate::domain::{
    format_cents, parse_date, DateRange, PeriodError, Preset, Profile, TelegramId,
};

/// Kopeck - personal finance tracking bot
#[derive(Parser)]
#[command(name = "kopeck")]
#[command(about = "Track income and expenses by category and report over a period")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "KOPECK_DATABASE", default_value = "kopeck.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Talk to the bot from the terminal, one message per line
    Chat {
        /// Platform user id to act as
        #[arg(short, long)]
        user: TelegramId,

        /// Username recorded on /start
        #[arg(long)]
        username: Option<String>,
    },

    /// Print a user's report without going through the dialogue
    Report {
        /// Platform user id
        #[arg(short, long)]
        user: TelegramId,

        /// today, this-week, this-month, this-year, all-time or custom
        #[arg(short, long, default_value = "this-month")]
        period: String,

        /// First day of a custom period (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day of a custom period, included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output format: text, json, csv
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List a user's categories
    Categories {
        /// Platform user id
        #[arg(short, long)]
        user: TelegramId,
    },

    /// Delete a user together with their categories and transactions
    Forget {
        /// Platform user id
        #[arg(short, long)]
        user: TelegramId,
    },

    /// Run the Telegram bot
    #[cfg(feature = "telegram")]
    Bot {
        /// Bot API token
        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        token: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                FinanceService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Chat { user, username } => {
                let service = FinanceService::init(&self.database).await?;
                let sender = Sender::new(user).with_profile(Profile {
                    username,
                    ..Profile::default()
                });
                run_chat(service, sender).await?;
            }

            Commands::Report {
                user,
                period,
                from,
                to,
                format,
            } => {
                let service = FinanceService::connect(&self.database).await?;
                let range = resolve_period(&period, from, to, &SystemClock)?;
                let report = service.generate_report(user, range).await?;
                print_report(report, &format)?;
            }

            Commands::Categories { user } => {
                let service = FinanceService::connect(&self.database).await?;
                let categories = service.list_categories(user).await?;
                if categories.is_empty() {
                    println!("No categories found.");
                } else {
                    println!("{:<10} {}", "TYPE", "NAME");
                    println!("{}", "-".repeat(30));
                    for category in categories {
                        println!("{:<10} {}", category.kind, category.name);
                    }
                }
            }

            Commands::Forget { user } => {
                let service = FinanceService::connect(&self.database).await?;
                let deleted = service.delete_user(user).await?;
                println!("Deleted user {} and all of their data", deleted.telegram_id);
            }

            #[cfg(feature = "telegram")]
            Commands::Bot { token } => {
                let service = FinanceService::init(&self.database).await?;
                let handler =
                    ChatHandler::new(service, InMemoryDialogueStore::new(), Arc::new(SystemClock));
                crate::telegram::run_polling(token, handler).await?;
            }
        }

        Ok(())
    }
}

/// Console transport: every stdin line is a message from `sender`.
async fn run_chat(service: FinanceService, sender: Sender) -> Result<()> {
    let mut handler = ChatHandler::new(service, InMemoryDialogueStore::new(), Arc::new(SystemClock));
    info!(user = sender.telegram_id, "console chat started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = handler
            .handle(&IncomingMessage::new(sender.clone(), line))
            .await;
        print_reply(&reply);
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.text);
    if let Some(keyboard) = &reply.keyboard {
        for row in &keyboard.rows {
            let buttons: Vec<String> = row.iter().map(|label| format!("[{label}]")).collect();
            println!("  {}", buttons.join(" "));
        }
    }
    println!();
}

fn resolve_period(
    period: &str,
    from: Option<String>,
    to: Option<String>,
    clock: &dyn Clock,
) -> Result<Option<DateRange>> {
    if period.eq_ignore_ascii_case("custom") {
        let from = from.context("--from is required for a custom period")?;
        let to = to.context("--to is required for a custom period")?;
        let range = DateRange::inclusive(parse_date(&from)?, parse_date(&to)?)?;
        return Ok(Some(range));
    }

    let preset =
        Preset::from_str(period).ok_or_else(|| PeriodError::UnknownPeriod(period.to_string()))?;
    Ok(preset.resolve(clock.today())?)
}

fn print_report(report: Option<PeriodReport>, output_format: &str) -> Result<()> {
    let Some(report) = report else {
        eprintln!("No transactions in the selected period.");
        return Ok(());
    };

    match output_format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["type", "category", "amount"])?;
            for line in &report.income {
                writer.write_record(["income", &line.category, &format_cents(line.total)])?;
            }
            for line in &report.expense {
                writer.write_record(["expense", &line.category, &format_cents(line.total)])?;
            }
            writer.write_record(["total", "income", &format_cents(report.income_total)])?;
            writer.write_record(["total", "expense", &format_cents(report.expense_total)])?;
            writer.write_record(["total", "balance", &format_cents(report.balance)])?;
            writer.write_record(["total", "transactions", &report.transaction_count.to_string()])?;
            writer.flush()?;
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", format::render_report(&report))?;
        }
    }

    Ok(())
}
