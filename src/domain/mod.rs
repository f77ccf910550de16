mod category;
mod money;
mod period;
mod transaction;
mod user;

pub use category::*;
pub use money::*;
pub use period::*;
pub use transaction::*;
pub use user::*;
