// Application layer - use cases shared by every transport.

pub mod clock;
pub mod error;
pub mod reporting;
pub mod service;

pub use clock::*;
pub use error::*;
pub use reporting::*;
pub use service::*;
