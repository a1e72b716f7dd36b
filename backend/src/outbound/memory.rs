//! Process-local store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. It enforces the same constraints as the PostgreSQL schema: unique
//! domain names, unique slugs per domain, and owner/domain foreign keys.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    DomainRepository, DomainRepositoryError, PageRepository, PageRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Domain, DomainId, DomainName, DomainSummary, NewDomain, NewPage, Page, PageId, PageListing,
    PageSlug, User, UserId,
};

const POISONED: &str = "memory store lock poisoned";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    domains: Vec<Domain>,
    pages: Vec<Page>,
}

impl Tables {
    fn owns(&self, domain_id: &DomainId, owner: &UserId) -> bool {
        self.domains
            .iter()
            .any(|d| d.id == *domain_id && d.user_id == *owner)
    }

    fn summary(&self, domain_id: &DomainId) -> Option<DomainSummary> {
        self.domains
            .iter()
            .find(|d| d.id == *domain_id)
            .map(|d| DomainSummary {
                id: d.id,
                name: d.name.clone(),
            })
    }
}

/// Shared in-memory tables. Clones share state.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store whose `created_at` stamps come from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, &'static str> {
        self.tables.lock().map_err(|_| POISONED)
    }
}

/// Newest first; later inserts win ties on identical timestamps.
fn newest_first<T>(rows: impl DoubleEndedIterator<Item = T>, key: impl Fn(&T) -> i64) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by_key(|row| std::cmp::Reverse(key(row)));
    rows
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn upsert(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if let Some(existing) = tables.users.iter().find(|u| u.id() == user.id()) {
            return Ok(existing.clone());
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.iter().find(|u| u.id() == id).cloned())
    }
}

#[async_trait]
impl DomainRepository for MemoryStore {
    async fn create(&self, domain: &NewDomain) -> Result<Domain, DomainRepositoryError> {
        let created_at = self.clock.utc();
        let mut tables = self.lock().map_err(DomainRepositoryError::query)?;
        if !tables.users.iter().any(|u| *u.id() == domain.user_id) {
            return Err(DomainRepositoryError::OwnerMissing);
        }
        if tables.domains.iter().any(|d| d.name == domain.name) {
            return Err(DomainRepositoryError::duplicate_name(domain.name.as_ref()));
        }
        let created = Domain {
            id: domain.id,
            name: domain.name.clone(),
            user_id: domain.user_id,
            verified: false,
            created_at,
        };
        tables.domains.push(created.clone());
        Ok(created)
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Domain>, DomainRepositoryError> {
        let tables = self.lock().map_err(DomainRepositoryError::query)?;
        let owned = tables
            .domains
            .iter()
            .filter(|d| d.user_id == *owner)
            .cloned();
        Ok(newest_first(owned, |d| {
            d.created_at.timestamp_nanos_opt().unwrap_or(i64::MAX)
        }))
    }

    async fn find_owned(
        &self,
        id: &DomainId,
        owner: &UserId,
    ) -> Result<Option<Domain>, DomainRepositoryError> {
        let tables = self.lock().map_err(DomainRepositoryError::query)?;
        Ok(tables
            .domains
            .iter()
            .find(|d| d.id == *id && d.user_id == *owner)
            .cloned())
    }
}

#[async_trait]
impl PageRepository for MemoryStore {
    async fn create(&self, page: &NewPage) -> Result<Page, PageRepositoryError> {
        let created_at = self.clock.utc();
        let mut tables = self.lock().map_err(PageRepositoryError::query)?;
        if !tables.domains.iter().any(|d| d.id == page.domain_id) {
            return Err(PageRepositoryError::DomainMissing);
        }
        if tables
            .pages
            .iter()
            .any(|p| p.domain_id == page.domain_id && p.slug == page.slug)
        {
            return Err(PageRepositoryError::duplicate_slug(page.slug.as_ref()));
        }
        let created = Page {
            id: page.id,
            title: page.title.clone(),
            slug: page.slug.clone(),
            content: page.content.clone(),
            published: false,
            domain_id: page.domain_id,
            created_at,
        };
        tables.pages.push(created.clone());
        Ok(created)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<PageListing>, PageRepositoryError> {
        let tables = self.lock().map_err(PageRepositoryError::query)?;
        let listings: Vec<PageListing> = tables
            .pages
            .iter()
            .filter(|p| tables.owns(&p.domain_id, owner))
            .filter_map(|p| {
                tables.summary(&p.domain_id).map(|domain| PageListing {
                    page: p.clone(),
                    domain,
                })
            })
            .collect();
        Ok(newest_first(listings.into_iter(), |l| {
            l.page.created_at.timestamp_nanos_opt().unwrap_or(i64::MAX)
        }))
    }

    async fn toggle_published(
        &self,
        id: &PageId,
        owner: &UserId,
    ) -> Result<Option<Page>, PageRepositoryError> {
        let mut tables = self.lock().map_err(PageRepositoryError::query)?;
        let Some(domain_id) = tables.pages.iter().find(|p| p.id == *id).map(|p| p.domain_id)
        else {
            return Ok(None);
        };
        if !tables.owns(&domain_id, owner) {
            return Ok(None);
        }
        Ok(tables.pages.iter_mut().find(|p| p.id == *id).map(|page| {
            page.published = !page.published;
            page.clone()
        }))
    }

    async fn find_published(
        &self,
        domain: &DomainName,
        slug: &PageSlug,
    ) -> Result<Option<Page>, PageRepositoryError> {
        let tables = self.lock().map_err(PageRepositoryError::query)?;
        let Some(domain_id) = tables
            .domains
            .iter()
            .find(|d| d.name == *domain)
            .map(|d| d.id)
        else {
            return Ok(None);
        };
        Ok(tables
            .pages
            .iter()
            .find(|p| p.domain_id == domain_id && p.slug == *slug && p.published)
            .cloned())
    }
}
