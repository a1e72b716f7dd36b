//! Cache-control policies shared by handlers.

/// Owner-scoped listings must be revalidated on every use.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for owner-scoped JSON responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Rendered public pages may be cached briefly by shared caches.
pub const PUBLIC_PAGE_MAX_AGE: &str = "public, max-age=60";
