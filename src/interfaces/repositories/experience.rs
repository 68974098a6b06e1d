use async_trait::async_trait;
use sqlx::{self, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::experience::{Experience, ExperienceInsert, UpdateExperienceRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Inserts a new work-history entry
    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Uuid, AppError>;

    /// Retrieves a live entry by id
    async fn get_experience_by_id(&self, id: &Uuid) -> Result<Experience, AppError>;

    /// Lists all live entries, newest first
    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError>;

    /// Counts live entries
    async fn count_experiences(&self) -> Result<i64, AppError>;

    /// Applies a partial update; untouched columns keep their values
    async fn update_experience(
        &self,
        id: &Uuid,
        update: &UpdateExperienceRequest,
    ) -> Result<Experience, AppError>;

    /// Soft delete (recommended for most cases)
    async fn soft_delete_experience(&self, id: &Uuid) -> Result<(), AppError>;

    /// Hard delete (for compliance/admin use only)
    async fn hard_delete_experience(&self, id: &Uuid) -> Result<(), AppError>;

    /// Permanently removes soft-deleted rows
    async fn purge_soft_deleted_experiences(&self) -> Result<u64, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO experiences (role, company, start_date, end_date, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&experience.role)
        .bind(&experience.company)
        .bind(&experience.start_date)
        .bind(&experience.end_date)
        .bind(&experience.description)
        .bind(experience.created_at)
        .bind(experience.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_experience_by_id(&self, id: &Uuid) -> Result<Experience, AppError> {
        let experience = sqlx::query_as::<_, Experience>(
            r#"SELECT * FROM experiences WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(experience)
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let experiences = sqlx::query_as::<_, Experience>(
            r#"SELECT * FROM experiences WHERE deleted_at IS NULL ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    async fn count_experiences(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM experiences WHERE deleted_at IS NULL"#)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn update_experience(
        &self,
        id: &Uuid,
        update: &UpdateExperienceRequest,
    ) -> Result<Experience, AppError> {
        if update.is_noop() {
            return self.get_experience_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE experiences SET updated_at = NOW()");

        if let Some(role) = update.role.flatten_ref() {
            builder.push(", role = ").push_bind(role.clone());
        }
        if let Some(company) = update.company.flatten_ref() {
            builder.push(", company = ").push_bind(company.clone());
        }
        if let Some(start_date) = update.start_date.flatten_ref() {
            builder.push(", start_date = ").push_bind(start_date.clone());
        }
        // end_date is tri-state: untouched, cleared back to NULL, or replaced
        match update.end_date.as_ref_option() {
            None => {}
            Some(None) => {
                builder.push(", end_date = NULL");
            }
            Some(Some(end_date)) => {
                builder.push(", end_date = ").push_bind(end_date.clone());
            }
        }
        if let Some(description) = update.description.flatten_ref() {
            builder.push(", description = ").push_bind(description.clone());
        }

        builder.push(" WHERE id = ").push_bind(*id);
        builder.push(" AND deleted_at IS NULL RETURNING *");

        let updated = builder
            .build_query_as::<Experience>()
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn soft_delete_experience(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE experiences SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }

    async fn hard_delete_experience(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM experiences WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }

    async fn purge_soft_deleted_experiences(&self) -> Result<u64, AppError> {
        let result = sqlx::query(r#"DELETE FROM experiences WHERE deleted_at IS NOT NULL"#)
            .execute(&self.pool)
            .await?;

        let purged = result.rows_affected();
        if purged > 0 {
            tracing::info!("Purged {} soft-deleted experiences", purged);
        }

        Ok(purged)
    }
}
