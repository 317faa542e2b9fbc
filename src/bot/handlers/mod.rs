//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions that are not commands
//! themselves, such as parameter autocomplete.

/// Autocomplete handlers for goal parameters
pub mod autocomplete;
