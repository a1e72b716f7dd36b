//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-validate stored strings so a corrupted row surfaces as a query
//! error instead of an invalid entity.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Domain, DomainId, DomainName, DomainSummary, Email, Page, PageId, PageSlug, PageTitle, User,
    UserId,
};

use super::schema::{domains, pages, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
}

/// Insertable struct for mirroring a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email)
            .map_err(|err| format!("stored email for user {} is invalid: {err}", row.id))?;
        Ok(Self::new(UserId::from_uuid(row.id), email))
    }
}

/// Row struct for reading from the domains table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domains)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainRow {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating domains. `verified` uses its column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = domains)]
pub(crate) struct NewDomainRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub user_id: Uuid,
}

impl TryFrom<DomainRow> for Domain {
    type Error = String;

    fn try_from(row: DomainRow) -> Result<Self, Self::Error> {
        let name = DomainName::new(&row.name)
            .map_err(|err| format!("stored name for domain {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: DomainId::from_uuid(row.id),
            name,
            user_id: UserId::from_uuid(row.user_id),
            verified: row.verified,
            created_at: row.created_at,
        })
    }
}

/// Row struct for reading from the pages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PageRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub domain_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating pages. `published` uses its column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pages)]
pub(crate) struct NewPageRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub domain_id: Uuid,
}

impl TryFrom<PageRow> for Page {
    type Error = String;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        let title = PageTitle::new(&row.title)
            .map_err(|err| format!("stored title for page {} is invalid: {err}", row.id))?;
        let slug = PageSlug::new(&row.slug)
            .map_err(|err| format!("stored slug for page {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: PageId::from_uuid(row.id),
            title,
            slug,
            content: row.content,
            published: row.published,
            domain_id: DomainId::from_uuid(row.domain_id),
            created_at: row.created_at,
        })
    }
}

/// Domain columns embedded in page listings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domains)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainSummaryRow {
    pub id: Uuid,
    pub name: String,
}

impl TryFrom<DomainSummaryRow> for DomainSummary {
    type Error = String;

    fn try_from(row: DomainSummaryRow) -> Result<Self, Self::Error> {
        let name = DomainName::new(&row.name)
            .map_err(|err| format!("stored name for domain {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: DomainId::from_uuid(row.id),
            name,
        })
    }
}
