//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Goal management and navigation commands
pub mod goal;

/// General utility commands
pub mod general;

/// Reminder commands
pub mod reminder;

/// Deposit and withdrawal commands
pub mod transaction;

// Export commands
pub use general::*;
pub use goal::*;
pub use reminder::*;
pub use transaction::*;
