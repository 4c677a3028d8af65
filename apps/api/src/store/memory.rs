use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::{Resume, StoredResume};
use crate::models::user::{Account, NewAccount};
use crate::resume::schema;
use crate::store::{ResumeStore, StoreError};

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    /// Per owner, in creation order.
    resumes: HashMap<Uuid, Vec<StoredResume>>,
}

/// In-process store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(StoreError::DuplicateEmail);
        }
        let created = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        inner.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_owner(&self, owner_id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.inner.read().await.accounts.get(&owner_id).cloned())
    }

    async fn append_resume(
        &self,
        owner_id: Uuid,
        resume: &Resume,
    ) -> Result<StoredResume, StoreError> {
        schema::check(resume)?;
        let now = Utc::now();
        let stored = StoredResume {
            id: Uuid::new_v4(),
            owner_id,
            created_at: now,
            updated_at: now,
            resume: resume.clone(),
        };
        self.inner
            .write()
            .await
            .resumes
            .entry(owner_id)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn replace_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
        resume: &Resume,
    ) -> Result<Option<StoredResume>, StoreError> {
        schema::check(resume)?;
        let mut inner = self.inner.write().await;
        let Some(existing) = inner
            .resumes
            .get_mut(&owner_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == resume_id))
        else {
            return Ok(None);
        };
        existing.resume = resume.clone();
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn remove_resume(&self, owner_id: Uuid, resume_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(list) = inner.resumes.get_mut(&owner_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|r| r.id != resume_id);
        Ok(list.len() != before)
    }

    async fn list_resumes(&self, owner_id: Uuid) -> Result<Vec<StoredResume>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.resumes.get(&owner_id).cloned().unwrap_or_default())
    }

    async fn get_resume(
        &self,
        owner_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<StoredResume>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .resumes
            .get(&owner_id)
            .and_then(|list| list.iter().find(|r| r.id == resume_id))
            .cloned())
    }
}
