use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Control intents the device understands
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    #[sea_orm(string_value = "start")]
    Start,
    #[sea_orm(string_value = "stop")]
    Stop,
    #[sea_orm(string_value = "manual_on")]
    ManualOn,
    #[sea_orm(string_value = "manual_off")]
    ManualOff,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub command: CommandKind,
    pub seconds: i64,
    pub timestamp: DateTimeWithTimeZone,
    pub processed: bool,
    pub processed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stove_data::Entity")]
    StoveData,
}

impl Related<super::stove_data::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoveData.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
