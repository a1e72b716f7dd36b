//! Diesel adapters against embedded PostgreSQL.
//!
//! Each test gets its own cluster and a freshly migrated database. The
//! services are driven over the Diesel repositories so the constraint to
//! HTTP error mapping is exercised end to end.

use std::sync::Arc;

use inkpress::domain::ports::{
    DomainRepository, DomainRepositoryError, DomainsCommand, DomainsQuery, PageRepository,
    PageRepositoryError, PagesCommand, PagesQuery, PublishedPageQuery, UserRepository,
};
use inkpress::domain::{
    DomainId, DomainName, DomainService, Email, ErrorCode, Identity, NewDomain, NewPage,
    PageDraft, PageId, PageService, PageSlug, PageTitle, User, UserId,
};
use inkpress::outbound::persistence::{
    DbPool, DieselDomainRepository, DieselPageRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{fresh_database, handle_cluster_setup_failure, test_cluster};

type Domains = DomainService<DieselDomainRepository, DieselUserRepository>;
type Pages = PageService<DieselDomainRepository, DieselPageRepository>;

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    users: Arc<DieselUserRepository>,
    domain_repo: Arc<DieselDomainRepository>,
    page_repo: Arc<DieselPageRepository>,
    domains: Domains,
    pages: Pages,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = fresh_database(&cluster)?;

    let applied = runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    if applied == 0 {
        return Err("no migrations were applied".to_owned());
    }

    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(&database_url).with_max_size(2)))
        .map_err(|err| err.to_string())?;
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let domain_repo = Arc::new(DieselDomainRepository::new(pool.clone()));
    let page_repo = Arc::new(DieselPageRepository::new(pool));

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        domains: DomainService::new(domain_repo.clone(), users.clone()),
        pages: PageService::new(domain_repo.clone(), page_repo.clone()),
        users,
        domain_repo,
        page_repo,
    })
}

#[fixture]
fn db() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn identity(email: &str) -> Identity {
    Identity {
        id: UserId::random(),
        email: Email::new(email).expect("valid email"),
    }
}

fn name(raw: &str) -> DomainName {
    DomainName::new(raw).expect("valid domain name")
}

fn slug(raw: &str) -> PageSlug {
    PageSlug::new(raw).expect("valid slug")
}

fn draft(domain_id: DomainId, raw_slug: &str) -> PageDraft {
    PageDraft {
        title: PageTitle::new("About").expect("valid title"),
        slug: slug(raw_slug),
        content: "# About us".to_owned(),
        domain_id,
    }
}

#[rstest]
fn user_upsert_keeps_the_first_row(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: user_upsert_keeps_the_first_row skipped");
        return;
    };
    let id = UserId::random();
    let first = User::new(id, Email::new("ada@example.com").expect("email"));
    let second = User::new(id, Email::new("lovelace@example.com").expect("email"));

    let stored = ctx.block_on(ctx.users.upsert(&first)).expect("insert user");
    let again = ctx.block_on(ctx.users.upsert(&second)).expect("upsert user");
    let found = ctx
        .block_on(ctx.users.find_by_id(&id))
        .expect("find user")
        .expect("user exists");

    assert_eq!(stored, first);
    assert_eq!(again, first);
    assert_eq!(found.email().as_ref(), "ada@example.com");
    assert!(
        ctx.block_on(ctx.users.find_by_id(&UserId::random()))
            .expect("find user")
            .is_none()
    );
}

#[rstest]
fn duplicate_domain_names_conflict_across_owners(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_domain_names_conflict_across_owners skipped");
        return;
    };
    let ada = identity("ada@example.com");
    let grace = identity("grace@example.com");

    let created = ctx
        .block_on(ctx.domains.create_domain(&ada, name("blog.example.com")))
        .expect("create domain");
    assert!(!created.verified);
    assert_eq!(created.user_id, ada.id);

    for caller in [&ada, &grace] {
        let err = ctx
            .block_on(ctx.domains.create_domain(caller, name("Blog.Example.com")))
            .expect_err("duplicate name");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    let repo_err = ctx
        .block_on(ctx.domain_repo.create(&NewDomain::new(name("blog.example.com"), ada.id)))
        .expect_err("duplicate name");
    assert!(matches!(repo_err, DomainRepositoryError::DuplicateName { .. }));

    assert!(
        ctx.block_on(ctx.domains.list_domains(&grace))
            .expect("list domains")
            .is_empty()
    );
}

#[rstest]
fn domains_need_an_existing_owner(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: domains_need_an_existing_owner skipped");
        return;
    };
    let err = ctx
        .block_on(
            ctx.domain_repo
                .create(&NewDomain::new(name("orphan.example.com"), UserId::random())),
        )
        .expect_err("owner missing");
    assert_eq!(err, DomainRepositoryError::OwnerMissing);
}

#[rstest]
fn domain_listing_is_owner_scoped_and_newest_first(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: domain_listing_is_owner_scoped_and_newest_first skipped");
        return;
    };
    let ada = identity("ada@example.com");
    let grace = identity("grace@example.com");
    for raw in ["one.example.com", "two.example.com"] {
        ctx.block_on(ctx.domains.create_domain(&ada, name(raw)))
            .expect("create domain");
    }
    let foreign = ctx
        .block_on(ctx.domains.create_domain(&grace, name("grace.example.com")))
        .expect("create domain");

    let listed = ctx
        .block_on(ctx.domains.list_domains(&ada))
        .expect("list domains");
    let names: Vec<_> = listed.iter().map(|d| d.name.as_ref()).collect();
    assert_eq!(names, ["two.example.com", "one.example.com"]);

    assert!(
        ctx.block_on(ctx.domain_repo.find_owned(&foreign.id, &ada.id))
            .expect("find owned")
            .is_none()
    );
    assert!(
        ctx.block_on(ctx.domain_repo.find_owned(&foreign.id, &grace.id))
            .expect("find owned")
            .is_some()
    );
}

#[rstest]
fn slugs_are_unique_per_domain(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: slugs_are_unique_per_domain skipped");
        return;
    };
    let ada = identity("ada@example.com");
    let first = ctx
        .block_on(ctx.domains.create_domain(&ada, name("one.example.com")))
        .expect("create domain");
    let second = ctx
        .block_on(ctx.domains.create_domain(&ada, name("two.example.com")))
        .expect("create domain");

    let page = ctx
        .block_on(ctx.pages.create_page(&ada, draft(first.id, "about")))
        .expect("create page");
    assert!(!page.published);
    assert_eq!(page.content, "# About us");

    let err = ctx
        .block_on(ctx.pages.create_page(&ada, draft(first.id, "about")))
        .expect_err("duplicate slug");
    assert_eq!(err.code(), ErrorCode::Conflict);

    ctx.block_on(ctx.pages.create_page(&ada, draft(second.id, "about")))
        .expect("same slug under another domain");

    let listed = ctx
        .block_on(ctx.pages.list_pages(&ada))
        .expect("list pages");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].domain.name.as_ref(), "two.example.com");
    assert_eq!(listed[1].domain.name.as_ref(), "one.example.com");
}

#[rstest]
fn pages_need_an_existing_domain(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: pages_need_an_existing_domain skipped");
        return;
    };
    let orphan = NewPage::from(draft(DomainId::random(), "about"));
    let err = ctx
        .block_on(ctx.page_repo.create(&orphan))
        .expect_err("domain missing");
    assert_eq!(err, PageRepositoryError::DomainMissing);
}

#[rstest]
fn toggle_flips_visibility_for_the_owner_only(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: toggle_flips_visibility_for_the_owner_only skipped");
        return;
    };
    let ada = identity("ada@example.com");
    let grace = identity("grace@example.com");
    let domain = ctx
        .block_on(ctx.domains.create_domain(&ada, name("blog.example.com")))
        .expect("create domain");
    let page = ctx
        .block_on(ctx.pages.create_page(&ada, draft(domain.id, "about")))
        .expect("create page");
    let lookup = || {
        ctx.block_on(
            ctx.pages
                .find_published(&name("blog.example.com"), &slug("about")),
        )
        .expect("find published")
    };

    assert!(lookup().is_none());

    let err = ctx
        .block_on(ctx.pages.toggle_published(&grace, &page.id))
        .expect_err("foreign toggle");
    assert_eq!(err.code(), ErrorCode::NotFound);

    let on = ctx
        .block_on(ctx.pages.toggle_published(&ada, &page.id))
        .expect("publish");
    assert!(on.published);
    let public = lookup().expect("published page");
    assert_eq!(public.id, page.id);

    let off = ctx
        .block_on(ctx.pages.toggle_published(&ada, &page.id))
        .expect("unpublish");
    assert!(!off.published);
    assert!(lookup().is_none());

    let missing = ctx
        .block_on(ctx.page_repo.toggle_published(&PageId::random(), &ada.id))
        .expect("toggle missing page");
    assert!(missing.is_none());
}
