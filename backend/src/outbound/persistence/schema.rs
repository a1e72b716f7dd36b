//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Local mirror of identity provider users.
    users (id) {
        /// Identity provider user id.
        id -> Uuid,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Custom domains. `name` is unique and stored lowercase.
    domains (id) {
        id -> Uuid,
        name -> Varchar,
        /// Owning user (FK to `users.id`).
        user_id -> Uuid,
        verified -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Markdown pages. `(domain_id, slug)` is unique.
    pages (id) {
        id -> Uuid,
        title -> Varchar,
        slug -> Varchar,
        content -> Text,
        published -> Bool,
        /// Owning domain (FK to `domains.id`).
        domain_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(domains -> users (user_id));
diesel::joinable!(pages -> domains (domain_id));

diesel::allow_tables_to_appear_in_same_query!(users, domains, pages);
