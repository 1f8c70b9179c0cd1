//! PostgreSQL-backed `FaqRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{FaqRepository, FaqRepositoryError};
use crate::domain::{Faq, FaqDraft, FaqPatch};

use super::models::{FaqChangeset, FaqRow, NewFaqRow};
use super::pool::{DbPool, PoolError};
use super::schema::faqs;

/// Diesel-backed implementation of the FAQ repository port.
#[derive(Clone)]
pub struct DieselFaqRepository {
    pool: DbPool,
}

impl DieselFaqRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FaqRepositoryError {
    FaqRepositoryError::connection(error.message())
}

fn map_diesel_error(error: DieselError) -> FaqRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FaqRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => FaqRepositoryError::query("database query error"),
        _ => FaqRepositoryError::query("database error"),
    }
}

#[async_trait]
impl FaqRepository for DieselFaqRepository {
    async fn list(&self) -> Result<Vec<Faq>, FaqRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FaqRow> = faqs::table
            .order(faqs::created_at.asc())
            .select(FaqRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Faq::from).collect())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Faq>, FaqRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = faqs::table
            .find(id)
            .select(FaqRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Faq::from))
    }

    async fn create(&self, draft: &FaqDraft) -> Result<Faq, FaqRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewFaqRow {
            id: Uuid::new_v4(),
            question: draft.question(),
            answer: draft.answer(),
        };

        let row = diesel::insert_into(faqs::table)
            .values(&new_row)
            .returning(FaqRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &FaqPatch,
    ) -> Result<Option<Faq>, FaqRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = FaqChangeset {
            question: patch.question(),
            answer: patch.answer(),
            updated_at: Utc::now(),
        };

        let row = diesel::update(faqs::table.find(id))
            .set(&changeset)
            .returning(FaqRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Faq::from))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, FaqRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(faqs::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
