//! System state entity - Key-value blobs owned by the tracker.
//!
//! The whole savings collection lives in a single row of this table, stored as
//! a JSON array under a fixed key (see [`crate::core::persistence`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// System state database model - one key-value pair per row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"celenganku_data"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Stored value, serialized by the caller
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this value was last written
    pub updated_at: DateTime,
}

/// `SystemState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
