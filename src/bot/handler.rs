use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::application::{AppError, Clock, FinanceService, Registration};
use crate::domain::{parse_date, CategoryKind, Cents, DateRange, TelegramId};

use super::command::{Command, CommandError, NewCategory, PeriodChoice};
use super::dialogue::{DialogueState, DialogueStore, InMemoryDialogueStore, ReportStep};
use super::format::render_report;
use super::message::{IncomingMessage, Reply, Sender};
use super::{texts, Keyboard};

/// What the user was trying to do, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Register,
    AddCategory,
    LogTransaction,
    Report,
    Other,
}

impl Action {
    fn failure_text(self) -> &'static str {
        match self {
            Action::Register => texts::REGISTRATION_FAILED,
            Action::AddCategory => texts::ADD_CATEGORY_FAILED,
            Action::LogTransaction => texts::TRANSACTION_FAILED,
            Action::Report => texts::REPORT_FAILED,
            Action::Other => texts::GENERIC_FAILURE,
        }
    }
}

/// Turns incoming chat text into replies.
///
/// Owns the per-user dialogue store; messages must be handed in one at a time.
pub struct ChatHandler<S = InMemoryDialogueStore> {
    service: FinanceService,
    dialogues: S,
    clock: Arc<dyn Clock>,
}

impl<S: DialogueStore> ChatHandler<S> {
    pub fn new(service: FinanceService, dialogues: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            dialogues,
            clock,
        }
    }

    pub fn service(&self) -> &FinanceService {
        &self.service
    }

    /// Current dialogue state of a user, if they are inside a flow.
    pub fn dialogue(&self, user: TelegramId) -> Option<DialogueState> {
        self.dialogues.get(user)
    }

    /// Handle one message to completion.
    pub async fn handle(&mut self, message: &IncomingMessage) -> Reply {
        let user = message.sender.telegram_id;
        let (action, result) = self.route(&message.sender, message.text.trim()).await;
        match result {
            Ok(reply) => reply,
            Err(err) => self.recover(user, action, err),
        }
    }

    async fn route(&mut self, sender: &Sender, text: &str) -> (Action, Result<Reply, AppError>) {
        let user = sender.telegram_id;

        // A pending add-category prompt takes the next message whatever it says.
        if let Some(DialogueState::AwaitingCategory) = self.dialogues.get(user) {
            self.dialogues.clear(user);
            return (Action::AddCategory, self.save_category(user, text).await);
        }

        match Command::parse(text) {
            Ok(Some(command)) => return self.run_command(sender, command).await,
            Ok(None) => {}
            Err(err) => {
                return (
                    Action::LogTransaction,
                    self.reject_transaction(user, err).await,
                );
            }
        }

        match self.dialogues.get(user) {
            Some(DialogueState::Report(step)) => {
                (Action::Report, self.continue_report(user, step, text).await)
            }
            _ if text.starts_with('/') => (
                Action::Other,
                Ok(Reply::with_main_menu(texts::UNKNOWN_COMMAND)),
            ),
            _ => (
                Action::Other,
                Ok(Reply::with_main_menu(texts::NOT_UNDERSTOOD)),
            ),
        }
    }

    async fn run_command(
        &mut self,
        sender: &Sender,
        command: Command,
    ) -> (Action, Result<Reply, AppError>) {
        let user = sender.telegram_id;
        match command {
            Command::Start => (Action::Register, self.register(sender).await),
            Command::Help => (Action::Other, Ok(Reply::with_main_menu(texts::HELP))),
            Command::AddCategory => {
                self.dialogues.set(user, DialogueState::AwaitingCategory);
                (Action::AddCategory, Ok(Reply::text(texts::ADD_CATEGORY_PROMPT)))
            }
            Command::TransactionPrompt(kind) => {
                let result = self
                    .service
                    .get_user(user)
                    .await
                    .map(|_| Reply::text(texts::transaction_prompt(kind)));
                (Action::LogTransaction, result)
            }
            Command::LogTransaction {
                kind,
                amount,
                category,
            } => (
                Action::LogTransaction,
                self.log_transaction(user, kind, amount, &category).await,
            ),
            Command::Report => {
                self.dialogues
                    .set(user, DialogueState::Report(ReportStep::SelectPeriodType));
                let reply = Reply::text(texts::SELECT_PERIOD).with_keyboard(Keyboard::period_menu());
                (Action::Report, Ok(reply))
            }
        }
    }

    async fn register(&self, sender: &Sender) -> Result<Reply, AppError> {
        let registration = self
            .service
            .register_user(sender.telegram_id, sender.profile.clone())
            .await?;

        Ok(match registration {
            Registration::Created(_) => Reply::with_main_menu(texts::WELCOME),
            Registration::Existing(_) => Reply::with_main_menu(texts::HELP),
        })
    }

    async fn save_category(&self, user: TelegramId, text: &str) -> Result<Reply, AppError> {
        self.service.get_user(user).await?;

        let new_category = match NewCategory::parse(text) {
            Ok(new_category) => new_category,
            Err(CommandError::CategoryType(_)) => {
                return Ok(Reply::with_main_menu(texts::CATEGORY_TYPE));
            }
            Err(_) => return Ok(Reply::with_main_menu(texts::CATEGORY_FORMAT)),
        };

        let category = self
            .service
            .add_category(user, &new_category.name, new_category.kind)
            .await?;
        Ok(Reply::with_main_menu(texts::category_added(&category.name)))
    }

    async fn log_transaction(
        &self,
        user: TelegramId,
        kind: CategoryKind,
        amount: Cents,
        category: &str,
    ) -> Result<Reply, AppError> {
        let logged = self
            .service
            .log_transaction(user, kind, amount, category, self.clock.now())
            .await?;

        Ok(Reply::with_main_menu(texts::transaction_saved(
            logged.category.kind,
            logged.transaction.amount_cents,
            &logged.category.name,
        )))
    }

    async fn reject_transaction(
        &self,
        user: TelegramId,
        err: CommandError,
    ) -> Result<Reply, AppError> {
        // Unregistered users hear about that before any format problem.
        self.service.get_user(user).await?;
        debug!(user, %err, "malformed transaction");

        let text = match err {
            CommandError::Amount(_) => texts::AMOUNT_FORMAT,
            _ => texts::TRANSACTION_FORMAT,
        };
        Ok(Reply::with_main_menu(text))
    }

    async fn continue_report(
        &mut self,
        user: TelegramId,
        step: ReportStep,
        text: &str,
    ) -> Result<Reply, AppError> {
        match step {
            ReportStep::SelectPeriodType => match PeriodChoice::parse(text) {
                Some(PeriodChoice::Cancel) => {
                    self.dialogues.clear(user);
                    Ok(Reply::with_main_menu(texts::BACK_TO_MENU))
                }
                Some(PeriodChoice::Custom) => {
                    self.dialogues
                        .set(user, DialogueState::Report(ReportStep::SelectStartDate));
                    Ok(Reply::text(texts::START_DATE_PROMPT))
                }
                Some(PeriodChoice::Preset(preset)) => {
                    let range = preset.resolve(self.clock.today());
                    self.generate_report(user, range.map_err(AppError::from)).await
                }
                None => Ok(Reply::text(texts::UNKNOWN_PERIOD)),
            },

            ReportStep::SelectStartDate => match parse_date(text) {
                Ok(start) => {
                    self.dialogues
                        .set(user, DialogueState::Report(ReportStep::SelectEndDate { start }));
                    Ok(Reply::text(texts::END_DATE_PROMPT))
                }
                Err(_) => Ok(Reply::text(texts::INVALID_DATE)),
            },

            ReportStep::SelectEndDate { start } => match parse_date(text) {
                Ok(last_day) => {
                    let range = DateRange::inclusive(start, last_day).map(Some);
                    self.generate_report(user, range.map_err(AppError::from)).await
                }
                Err(_) => Ok(Reply::text(texts::INVALID_DATE)),
            },
        }
    }

    /// Aggregate and render. The user's report state is gone afterwards,
    /// whether or not this succeeded.
    async fn generate_report(
        &mut self,
        user: TelegramId,
        range: Result<Option<DateRange>, AppError>,
    ) -> Result<Reply, AppError> {
        let result = match range {
            Ok(range) => self.service.generate_report(user, range).await,
            Err(err) => Err(err),
        };
        self.dialogues.clear(user);

        Ok(match result? {
            Some(report) => Reply::with_main_menu(render_report(&report)),
            None => Reply::with_main_menu(texts::NO_DATA),
        })
    }

    /// Turn a failed action into a reply. Expected failures get a specific
    /// message; anything else is logged and drops the user's dialogue.
    fn recover(&mut self, user: TelegramId, action: Action, err: AppError) -> Reply {
        match err {
            AppError::UserNotRegistered(_) => {
                self.dialogues.clear(user);
                Reply::with_main_menu(texts::NOT_REGISTERED)
            }
            AppError::CategoryNotFound { name, .. } => {
                Reply::with_main_menu(texts::category_not_found(&name))
            }
            AppError::CategoryAlreadyExists { name, .. } => {
                Reply::with_main_menu(texts::category_exists(&name))
            }
            AppError::InvalidAmount(reason) => {
                warn!(user, %reason, "rejected amount");
                Reply::with_main_menu(texts::AMOUNT_FORMAT)
            }
            err @ (AppError::TotalOverflow | AppError::Period(_) | AppError::Database(_)) => {
                error!(user, ?action, error = %err, "failed to handle message");
                self.dialogues.clear(user);
                Reply::with_main_menu(action.failure_text())
            }
        }
    }
}
