//! Storage collaborator.
//!
//! Accounts and their resumes live behind [`ResumeStore`]. Each resume
//! belongs to exactly one account for its whole life. Every write runs the
//! schema gate (`resume::schema::check`) before touching storage.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{Resume, StoredResume};
use crate::models::user::{Account, NewAccount};
use crate::resume::schema::SchemaViolation;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("schema violation at {}: {}", .0.path, .0.message)]
    Schema(#[from] SchemaViolation),

    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_owner(&self, owner_id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Appends a new resume to the owner's collection.
    async fn append_resume(
        &self,
        owner_id: Uuid,
        resume: &Resume,
    ) -> Result<StoredResume, StoreError>;

    /// Replaces a whole document. `None` when the owner has no such resume.
    async fn replace_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
        resume: &Resume,
    ) -> Result<Option<StoredResume>, StoreError>;

    /// Permanently removes a resume. `false` when the owner has no such resume.
    async fn remove_resume(&self, owner_id: Uuid, resume_id: Uuid) -> Result<bool, StoreError>;

    /// All of the owner's resumes, in creation order.
    async fn list_resumes(&self, owner_id: Uuid) -> Result<Vec<StoredResume>, StoreError>;

    async fn get_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<StoredResume>, StoreError>;
}
