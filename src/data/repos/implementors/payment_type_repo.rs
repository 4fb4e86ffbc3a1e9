use crate::data::database::{Database, DbConnection};
use crate::data::models::payment_type::{NewPaymentType, PaymentType, UpdatePaymentType};
use crate::data::repos::traits::repository::{Repository, VersionedUpdate};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

/// Payment profiles are private to their owner, so every domain query is
/// scoped by user id; the raw Repository impl is the unscoped base.
pub struct PaymentTypeRepo {}

impl PaymentTypeRepo {
    pub fn new() -> Self {
        PaymentTypeRepo {}
    }

    pub async fn get_by_user_id(
        &self,
        user_id_query: i32,
    ) -> Result<Option<Vec<PaymentType>>, result::Error> {
        use crate::data::models::schema::payment_types::dsl::{payment_types, user_id};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match payment_types
            .filter(user_id.eq(user_id_query))
            .load::<PaymentType>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_scoped(
        &self,
        id: i32,
        owner: i32,
    ) -> Result<Option<PaymentType>, result::Error> {
        use crate::data::models::schema::payment_types::dsl::{
            payment_type_id, payment_types, user_id,
        };

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match payment_types
            .filter(payment_type_id.eq(id))
            .filter(user_id.eq(owner))
            .first::<PaymentType>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn add_returning_id(&self, item: NewPaymentType<'_>) -> Result<i32, result::Error> {
        use crate::data::models::schema::payment_types::dsl::payment_types;

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<i32, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(payment_types)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "last_insert_rowid()",
                ))
                .get_result(connection)
                .await?;

                Ok(new_id)
            }
            .scope_boxed()
        })
        .await
    }

    /// Compare-and-swap edit scoped to the owning user. A version miss on a
    /// row that still exists is a conflict; a row the owner cannot see is
    /// missing.
    pub async fn update_versioned(
        &self,
        id: i32,
        owner: i32,
        expected_version: i32,
        item: UpdatePaymentType<'_>,
    ) -> Result<VersionedUpdate, result::Error> {
        use crate::data::models::schema::payment_types::dsl::{
            payment_type_id, payment_types, user_id, version,
        };

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<VersionedUpdate, result::Error, _>(|connection| {
            async move {
                let rows = diesel::update(
                    payment_types
                        .filter(payment_type_id.eq(id))
                        .filter(user_id.eq(owner))
                        .filter(version.eq(expected_version)),
                )
                .set((&item, version.eq(expected_version + 1)))
                .execute(connection)
                .await?;

                if rows == 1 {
                    return Ok(VersionedUpdate::Updated);
                }

                let exists = payment_types
                    .filter(payment_type_id.eq(id))
                    .filter(user_id.eq(owner))
                    .count()
                    .get_result::<i64>(connection)
                    .await?;

                if exists > 0 {
                    Ok(VersionedUpdate::Conflict)
                } else {
                    Ok(VersionedUpdate::Missing)
                }
            }
            .scope_boxed()
        })
        .await
    }

    /// Deletes the record if it belongs to the owner; reports whether a row
    /// was actually removed.
    pub async fn delete_scoped(&self, id: i32, owner: i32) -> Result<bool, result::Error> {
        use crate::data::models::schema::payment_types::dsl::{
            payment_type_id, payment_types, user_id,
        };

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<bool, result::Error, _>(|connection| {
            async move {
                let rows = diesel::delete(
                    payment_types
                        .filter(payment_type_id.eq(id))
                        .filter(user_id.eq(owner)),
                )
                .execute(connection)
                .await?;

                Ok(rows > 0)
            }
            .scope_boxed()
        })
        .await
    }
}

#[async_trait]
impl Repository for PaymentTypeRepo {
    type Id = i32;
    type Item = PaymentType;
    type NewItem<'a> = NewPaymentType<'a>;
    type UpdateForm<'a> = UpdatePaymentType<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::payment_types::dsl::payment_types;

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match payment_types.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::payment_types::dsl::{payment_type_id, payment_types};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match payment_types
            .filter(payment_type_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        self.add_returning_id(item).await.map(|_| ())
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::payment_types::dsl::{payment_type_id, payment_types};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::update(payment_types.filter(payment_type_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::payment_types::dsl::{payment_type_id, payment_types};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(payment_types.filter(payment_type_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for PaymentTypeRepo {
    fn default() -> Self {
        Self::new()
    }
}
