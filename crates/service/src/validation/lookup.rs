//! Store queries behind the `unique` and `exists` rules.
use std::str::FromStr;

use models::{courier, customer, package, sender, shipment, vendor, EntityKind};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Value};
use uuid::Uuid;

/// Count rows of `entity` whose `column` equals `value`, skipping the row
/// with id `except`.
pub(crate) async fn count_matching<C: ConnectionTrait>(
    conn: &C,
    entity: EntityKind,
    column: &str,
    value: Value,
    except: Option<Uuid>,
) -> Result<u64, DbErr> {
    match entity {
        EntityKind::Sender => count_in::<sender::Entity, C>(conn, column, value, except).await,
        EntityKind::Customer => count_in::<customer::Entity, C>(conn, column, value, except).await,
        EntityKind::Vendor => count_in::<vendor::Entity, C>(conn, column, value, except).await,
        EntityKind::Courier => count_in::<courier::Entity, C>(conn, column, value, except).await,
        EntityKind::Package => count_in::<package::Entity, C>(conn, column, value, except).await,
        EntityKind::Shipment => count_in::<shipment::Entity, C>(conn, column, value, except).await,
    }
}

pub(crate) async fn id_exists<C: ConnectionTrait>(conn: &C, entity: EntityKind, id: Uuid) -> Result<bool, DbErr> {
    Ok(count_matching(conn, entity, "id", Value::from(id), None).await? > 0)
}

async fn count_in<E, C>(conn: &C, column: &str, value: Value, except: Option<Uuid>) -> Result<u64, DbErr>
where
    E: EntityTrait,
    E::Column: FromStr,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let col = resolve::<E>(column)?;
    let mut select = E::find().filter(col.eq(value));
    if let Some(id) = except {
        select = select.filter(resolve::<E>("id")?.ne(id));
    }
    select.count(conn).await
}

fn resolve<E>(column: &str) -> Result<E::Column, DbErr>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    E::Column::from_str(column)
        .map_err(|_| DbErr::Custom(format!("unknown column `{column}` on `{}`", E::default().table_name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn unknown_columns_name_the_table() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = count_matching(&db, EntityKind::Sender, "nickname", Value::from("x"), None).await.unwrap_err();
        assert!(matches!(err, DbErr::Custom(ref msg) if msg == "unknown column `nickname` on `sender`"));
        assert!(!id_exists(&db, EntityKind::Courier, Uuid::new_v4()).await?);
        Ok(())
    }
}
