use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stove_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub temperature: f64,
    pub relay: bool,
    pub manual_mode: bool,
    pub cooking: bool,
    pub time_left: i64,
    pub timestamp: DateTimeWithTimeZone,
    /// Command this record optimistically reflects (absent for device reports)
    pub command_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::commands::Entity",
        from = "Column::CommandId",
        to = "super::commands::Column::Id"
    )]
    Command,
}

impl Related<super::commands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Command.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
