use sea_orm::entity::prelude::*;
use sea_orm::sea_query::ForeignKeyAction;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{courier, package, vendor};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub package_id: Uuid,
    pub vendor_id: Uuid,
    pub courier_id: Uuid,
    #[sea_orm(unique)]
    pub tracking_number: String,
    pub delivery_date: Option<Date>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Package, Vendor, Courier }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Package => Entity::belongs_to(package::Entity)
                .from(Column::PackageId)
                .to(package::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Vendor => Entity::belongs_to(vendor::Entity)
                .from(Column::VendorId)
                .to(vendor::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
            Relation::Courier => Entity::belongs_to(courier::Entity)
                .from(Column::CourierId)
                .to(courier::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
        }
    }
}

impl Related<package::Entity> for Entity {
    fn to() -> RelationDef { Relation::Package.def() }
}

impl Related<vendor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vendor.def() }
}

impl Related<courier::Entity> for Entity {
    fn to() -> RelationDef { Relation::Courier.def() }
}

impl ActiveModelBehavior for ActiveModel {}
