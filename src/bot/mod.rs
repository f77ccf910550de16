//! Conversation layer: command grammar, per-user dialogue state and the
//! message handler that ties them to the application service.
//!
//! Nothing here knows about a concrete transport. A transport turns its
//! updates into [`IncomingMessage`]s and sends back the [`Reply`].

pub mod command;
pub mod dialogue;
pub mod format;
pub mod handler;
pub mod keyboard;
pub mod message;
pub mod texts;

pub use command::{Command, CommandError, NewCategory, PeriodChoice};
pub use dialogue::{DialogueState, DialogueStore, InMemoryDialogueStore, ReportStep};
pub use handler::ChatHandler;
pub use keyboard::Keyboard;
pub use message::{IncomingMessage, Reply, Sender};
