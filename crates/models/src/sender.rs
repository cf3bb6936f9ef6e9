use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::package;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sender")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Package }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Package => Entity::has_many(package::Entity).into(),
        }
    }
}

impl Related<package::Entity> for Entity {
    fn to() -> RelationDef { Relation::Package.def() }
}

impl ActiveModelBehavior for ActiveModel {}
