pub mod application;
pub mod bot;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod storage;
#[cfg(feature = "telegram")]
pub mod telegram;

pub use domain::*;
pub use storage::Repository;
