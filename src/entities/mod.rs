//! Entity module - `SeaORM` entity definitions for the database.
//! The tracker keeps its state in a single key-value table, so only one
//! entity is defined here.

pub mod system_state;

pub use system_state::{Entity as SystemState, Model as SystemStateModel};
