use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{EntityTrait, LoaderTrait, ModelTrait, SqlErr};
use uuid::Uuid;

use super::*;
use crate::{package, sender, shipment, vendor};

#[tokio::test]
async fn migrations_round_trip() -> Result<()> {
    let db = setup_test_db().await?;
    migration::Migrator::down(&db, None).await?;
    migration::Migrator::up(&db, None).await?;
    assert!(sender::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn tracking_number_is_unique_in_store() -> Result<()> {
    let db = setup_test_db().await?;
    let g = insert_graph(&db).await?;
    let other = insert_package(&db, g.sender.id, g.customer.id).await?;

    let err = insert_shipment(&db, other.id, g.vendor.id, g.courier.id, &g.shipment.tracking_number)
        .await
        .unwrap_err();
    let db_err = err.downcast_ref::<sea_orm::DbErr>().expect("db error");
    assert!(matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))), "{db_err:?}");
    Ok(())
}

#[tokio::test]
async fn a_package_holds_at_most_one_shipment() -> Result<()> {
    let db = setup_test_db().await?;
    let g = insert_graph(&db).await?;

    let second = insert_shipment(&db, g.package.id, g.vendor.id, g.courier.id, "TRK-SECOND").await;
    assert!(second.is_err());
    Ok(())
}

#[tokio::test]
async fn customer_email_is_unique_in_store() -> Result<()> {
    let db = setup_test_db().await?;
    insert_customer(&db, "jane@example.com").await?;
    assert!(insert_customer(&db, "jane@example.com").await.is_err());
    Ok(())
}

#[tokio::test]
async fn absent_sender_emails_never_collide() -> Result<()> {
    let db = setup_test_db().await?;
    insert_sender(&db, None).await?;
    insert_sender(&db, None).await?;
    insert_sender(&db, Some("ops@example.com")).await?;
    assert!(insert_sender(&db, Some("ops@example.com")).await.is_err());
    assert_eq!(sender::Entity::find().all(&db).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn package_requires_existing_parents_in_store() -> Result<()> {
    let db = setup_test_db().await?;
    let s = insert_sender(&db, None).await?;
    let err = insert_package(&db, s.id, Uuid::new_v4()).await.unwrap_err();
    let db_err = err.downcast_ref::<sea_orm::DbErr>().expect("db error");
    assert!(matches!(db_err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))), "{db_err:?}");
    Ok(())
}

#[tokio::test]
async fn relations_load_both_directions() -> Result<()> {
    let db = setup_test_db().await?;
    let g = insert_graph(&db).await?;

    let packages = package::Entity::find().all(&db).await?;
    let senders = packages.load_one(sender::Entity, &db).await?;
    assert_eq!(senders.len(), 1);
    assert_eq!(senders[0].as_ref().map(|s| s.id), Some(g.sender.id));

    let shipments = g.vendor.find_related(shipment::Entity).all(&db).await?;
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0].id, g.shipment.id);

    let (found, owner) = shipment::Entity::find_by_id(g.shipment.id)
        .find_also_related(vendor::Entity)
        .one(&db)
        .await?
        .expect("shipment");
    assert_eq!(found.package_id, g.package.id);
    assert_eq!(owner.map(|v| v.id), Some(g.vendor.id));
    Ok(())
}

#[tokio::test]
async fn timestamps_and_dates_read_back_unchanged() -> Result<()> {
    let db = setup_test_db().await?;
    let g = insert_graph(&db).await?;
    let reread = package::Entity::find_by_id(g.package.id).one(&db).await?.expect("package");
    assert_eq!(reread, g.package);
    Ok(())
}
