//! Request handlers.

pub mod generate;
pub mod health;
pub mod page;

pub use generate::*;
pub use health::*;
pub use page::*;
