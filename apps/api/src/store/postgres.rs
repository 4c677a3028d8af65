use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{Resume, ResumeRow, StoredResume};
use crate::models::user::{Account, NewAccount};
use crate::resume::schema;
use crate::store::{ResumeStore, StoreError};

const RESUME_COLUMNS: &str = "id, owner_id, document, created_at, updated_at";

/// Postgres-backed store. Each resume is one JSONB document row.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let result = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_owner(&self, owner_id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn append_resume(
        &self,
        owner_id: Uuid,
        resume: &Resume,
    ) -> Result<StoredResume, StoreError> {
        schema::check(resume)?;
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            "INSERT INTO resumes (id, owner_id, document) VALUES ($1, $2, $3) RETURNING {RESUME_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(Json(resume))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn replace_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
        resume: &Resume,
    ) -> Result<Option<StoredResume>, StoreError> {
        schema::check(resume)?;
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            UPDATE resumes SET document = $1, updated_at = now()
            WHERE id = $2 AND owner_id = $3
            RETURNING {RESUME_COLUMNS}
            "#
        ))
        .bind(Json(resume))
        .bind(resume_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn remove_resume(&self, owner_id: Uuid, resume_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND owner_id = $2")
            .bind(resume_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_resumes(&self, owner_id: Uuid) -> Result<Vec<StoredResume>, StoreError> {
        let rows = sqlx::query_as::<_, ResumeRow>(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes WHERE owner_id = $1 ORDER BY seq"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<StoredResume>, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes WHERE id = $1 AND owner_id = $2"
        ))
        .bind(resume_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }
}
