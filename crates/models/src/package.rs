use sea_orm::entity::prelude::*;
use sea_orm::sea_query::ForeignKeyAction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{customer, sender, shipment};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "package")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub customer_id: Uuid,
    pub weight: f64,
    pub package_type: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub shipping_cost: Decimal,
    pub receipt_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Sender, Customer, Shipment }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Sender => Entity::belongs_to(sender::Entity)
                .from(Column::SenderId)
                .to(sender::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Shipment => Entity::has_one(shipment::Entity).into(),
        }
    }
}

impl Related<sender::Entity> for Entity {
    fn to() -> RelationDef { Relation::Sender.def() }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<shipment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Shipment.def() }
}

impl ActiveModelBehavior for ActiveModel {}
