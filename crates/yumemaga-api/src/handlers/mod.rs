//! API request handlers.

pub mod health;
pub mod scopes;
pub mod units;

pub use health::*;
pub use scopes::*;
pub use units::*;
