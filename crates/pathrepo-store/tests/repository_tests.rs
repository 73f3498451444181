//! End-to-end tests for the repository surface.
//!
//! These tests drive `Repository` only through its public API and check the
//! observable properties: lookups after insertion, selector resolution order,
//! removal counts, virtual directories, overrides and cross-repository copies.

use std::sync::Arc;

use pathrepo_store::{
    AddValue, DirectoryResource, FileResource, RepoError, Repository, RepositoryConfig, Resource,
};
use rstest::{fixture, rstest};

fn file(name: &str, body: &str) -> Box<dyn Resource> {
    Box::new(FileResource::new(name, body))
}

/// A small template tree used by most tests.
#[fixture]
fn site() -> Repository {
    let mut repo = Repository::new();
    repo.add(
        "/app/views",
        DirectoryResource::new("views")
            .with_entry(FileResource::new("index.twig", "index"))
            .with_entry(FileResource::new("layout.twig", "layout"))
            .with_entry(
                DirectoryResource::new("admin").with_entry(FileResource::new("users.twig", "users")),
            ),
    )
    .expect("add views");
    repo.add("/app/app.css", FileResource::new("app.css", "body {}"))
        .expect("add css");
    repo.add("/app-legacy/old.twig", FileResource::new("old.twig", "old"))
        .expect("add legacy");
    repo
}

fn names(resources: &[&dyn Resource]) -> Vec<String> {
    resources.iter().map(|r| r.name().to_string()).collect()
}

fn paths_of(resources: &[&dyn Resource]) -> Vec<String> {
    resources
        .iter()
        .map(|r| r.path().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Lookup
// ============================================================================

#[rstest]
fn get_returns_added_resource(site: Repository) {
    let index = site.get("/app/views/index.twig").expect("stored");
    assert_eq!(index.name(), "index.twig");
    assert_eq!(index.content(), Some(&b"index"[..]));
    assert_eq!(index.path(), Some("/app/views/index.twig"));
    assert_eq!(index.repository(), Some(site.id()));
}

#[rstest]
#[case::missing("/app/views/missing.twig")]
#[case::sibling_prefix("/app-leg")]
#[case::below_leaf("/app/app.css/x")]
fn get_missing_is_not_found(site: Repository, #[case] path: &str) {
    assert_eq!(site.get(path).unwrap_err(), RepoError::NotFound(path.to_string()));
}

#[rstest]
#[case::dot_segments("/app/./views/../views/index.twig")]
#[case::double_slash("//app//views/index.twig")]
#[case::trailing_slash("/app/views/index.twig/")]
fn get_canonicalizes_path(site: Repository, #[case] path: &str) {
    assert_eq!(site.get(path).unwrap().name(), "index.twig");
}

// ============================================================================
// Selectors
// ============================================================================

#[rstest]
#[case::exact("/app/app.css", &["/app/app.css"])]
#[case::star("/app/views/*", &["/app/views/admin", "/app/views/index.twig", "/app/views/layout.twig"])]
#[case::star_suffix("/app/views/*.twig", &["/app/views/index.twig", "/app/views/layout.twig"])]
#[case::globstar(
    "/app/**/*.twig",
    &["/app/views/admin/users.twig", "/app/views/index.twig", "/app/views/layout.twig"]
)]
#[case::sibling_prefix_excluded("/app*/*.twig", &["/app-legacy/old.twig"])]
#[case::braces("/app/{app.css,views/layout.twig}", &["/app/app.css", "/app/views/layout.twig"])]
#[case::no_match("/lib/**", &[])]
fn find_returns_matches_in_path_order(
    site: Repository,
    #[case] selector: &str,
    #[case] expected: &[&str],
) {
    let found = site.find(selector).unwrap();
    assert_eq!(paths_of(&found), expected);
}

#[rstest]
fn find_agrees_with_brute_force(site: Repository) {
    let selector = pathrepo_store::Selector::new("/app/**/*.twig", *site.options()).unwrap();
    let brute: Vec<&str> = site.paths().filter(|p| selector.matches(p)).collect();
    let found = site.find("/app/**/*.twig").unwrap();
    assert_eq!(paths_of(&found), brute);
}

#[rstest]
#[case::exact("/app/app.css", true)]
#[case::pattern("/app/views/*.twig", true)]
#[case::missing("/app/*.js", false)]
fn contains_reports_any_match(site: Repository, #[case] selector: &str, #[case] expected: bool) {
    assert_eq!(site.contains(selector).unwrap(), expected);
}

#[test]
fn escaped_braces_select_the_literal_name() {
    let mut repo = Repository::new();
    repo.add("/x/{a,b}", FileResource::new("{a,b}", "braces")).unwrap();
    repo.add("/x/a", FileResource::new("a", "a")).unwrap();

    assert_eq!(paths_of(&repo.find("/x/\\{a,b}").unwrap()), vec!["/x/{a,b}"]);
    assert_eq!(paths_of(&repo.find("/x/{a,b}").unwrap()), vec!["/x/a"]);

    assert_eq!(repo.remove("/x/\\{a,b}").unwrap(), 1);
    assert!(repo.get("/x/a").is_ok());
}

#[test]
fn escaped_wildcards_select_the_literal_name() {
    let mut repo = Repository::new();
    for name in ["draft*", "drafts", "draft?"] {
        repo.add(&format!("/notes/{name}"), FileResource::new(name, "")).unwrap();
    }

    assert_eq!(paths_of(&repo.find("/notes/draft\\*").unwrap()), vec!["/notes/draft*"]);
    assert!(repo.contains("/notes/draft\\?").unwrap());
    assert_eq!(repo.remove("/notes/draft\\*").unwrap(), 1);
    assert_eq!(
        names(&repo.list_directory("/notes").unwrap()),
        vec!["draft?", "drafts"]
    );
}

#[test]
fn brace_explosion_is_rejected_up_front() {
    let mut repo = Repository::new();
    let selector = format!("/{}", "{a,b}".repeat(22));
    assert!(matches!(repo.find(&selector), Err(RepoError::InvalidArgument(_))));
    assert!(matches!(repo.remove(&selector), Err(RepoError::InvalidArgument(_))));

    let config = RepositoryConfig {
        max_alternatives: 4,
        ..RepositoryConfig::default()
    };
    let repo = Repository::with_config(&config);
    assert!(repo.find("/{a,b}/{c,d}").unwrap().is_empty());
    assert!(matches!(repo.find("/{a,b}/{c,d,e}"), Err(RepoError::InvalidArgument(_))));
}

#[test]
fn stacked_globstars_over_deep_paths_terminate() {
    let mut repo = Repository::new();
    let deep = format!("{}/f", "/d".repeat(40));
    repo.add(&deep, FileResource::new("f", "")).unwrap();

    let miss = format!("{}/nomatch", "/**/d".repeat(8));
    assert!(repo.find(&miss).unwrap().is_empty());
    assert_eq!(paths_of(&repo.find("/**/d/**/f").unwrap()), vec![deep]);
}

// ============================================================================
// Directories
// ============================================================================

#[test]
fn ancestors_materialize_as_virtual_directories() {
    let mut repo = Repository::new();
    repo.add("/x/y/z", FileResource::new("z", "")).unwrap();

    for path in ["/x", "/x/y"] {
        let dir = repo.get(path).unwrap();
        assert!(dir.as_directory().is_some_and(|d| d.is_virtual()), "{path}");
    }
    assert_eq!(names(&repo.list_directory("/x").unwrap()), vec!["y"]);
    assert_eq!(names(&repo.list_directory("/").unwrap()), vec!["x"]);
}

#[rstest]
fn list_directory_is_one_level_deep(site: Repository) {
    let listing = site.list_directory("/app/views").unwrap();
    assert_eq!(names(&listing), vec!["admin", "index.twig", "layout.twig"]);
    assert_eq!(names(&site.list_directory("/app").unwrap()), vec!["app.css", "views"]);
}

#[rstest]
fn list_directory_errors(site: Repository) {
    assert_eq!(
        site.list_directory("/app/app.css").unwrap_err(),
        RepoError::NoDirectory("/app/app.css".into())
    );
    assert_eq!(
        site.list_directory("/nope").unwrap_err(),
        RepoError::NotFound("/nope".into())
    );
}

#[rstest]
fn add_below_leaf_is_rejected(mut site: Repository) {
    let before = site.len();
    assert_eq!(
        site.add("/app/app.css/extra", file("extra", "")),
        Err(RepoError::NoDirectory("/app/app.css".into()))
    );
    assert_eq!(site.len(), before);
}

// ============================================================================
// Override
// ============================================================================

#[rstest]
fn override_replaces_in_place(mut site: Repository) {
    let before = site.len();
    site.add("/app/app.css", FileResource::new("app.css", "v2")).unwrap();

    assert_eq!(site.len(), before);
    let css = site.get("/app/app.css").unwrap();
    assert_eq!(css.content(), Some(&b"v2"[..]));
    assert_eq!(css.revision(), 1);
    assert_eq!(site.find("/app/app.css").unwrap().len(), 1);
}

#[rstest]
fn virtual_directory_is_replaced_by_real_one(mut site: Repository) {
    assert!(site.get("/app").unwrap().as_directory().is_some_and(|d| d.is_virtual()));
    site.add("/app", DirectoryResource::new("app")).unwrap();

    let app = site.get("/app").unwrap();
    assert!(app.as_directory().is_some_and(|d| !d.is_virtual()));
    assert!(site.get("/app/views/index.twig").is_ok());
}

#[rstest]
fn leaf_cannot_replace_populated_directory(mut site: Repository) {
    assert_eq!(
        site.add("/app/views", file("views", "")),
        Err(RepoError::NoDirectory("/app/views".into()))
    );
    assert!(site.get("/app/views").unwrap().is_directory());
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn remove_counts_descendants() {
    let mut repo = Repository::new();
    repo.add("/a/b/c", FileResource::new("c", "")).unwrap();

    assert_eq!(repo.remove("/a").unwrap(), 3);
    assert_eq!(repo.paths().collect::<Vec<_>>(), vec!["/"]);
}

#[rstest]
fn remove_by_selector(mut site: Repository) {
    assert_eq!(site.remove("/app/views/*.twig").unwrap(), 2);
    assert!(!site.contains("/app/views/*.twig").unwrap());
    assert!(site.get("/app/views/admin/users.twig").is_ok());
}

#[rstest]
fn overlapping_matches_are_counted_once(mut site: Repository) {
    // /app/views and its descendants all match
    assert_eq!(site.remove("/app/views/**").unwrap(), 5);
    assert!(site.get("/app/views").is_err());
}

#[rstest]
fn remove_without_match_is_zero(mut site: Repository) {
    assert_eq!(site.remove("/nope/*").unwrap(), 0);
    assert_eq!(site.remove("/nope").unwrap(), 0);
}

#[rstest]
#[case::root("/")]
#[case::dotted("/app/..")]
fn root_removal_is_rejected(mut site: Repository, #[case] selector: &str) {
    assert_eq!(site.remove(selector), Err(RepoError::RootRemoval));
}

#[rstest]
fn add_after_remove_starts_fresh(mut site: Repository) {
    site.remove("/app/app.css").unwrap();
    site.add("/app/app.css", FileResource::new("app.css", "new")).unwrap();
    assert_eq!(site.get("/app/app.css").unwrap().revision(), 0);
}

// ============================================================================
// Collections and references
// ============================================================================

#[test]
fn collection_members_land_under_target() {
    let mut repo = Repository::new();
    repo.add("/assets", vec![file("a.js", "a"), file("b.js", "b")]).unwrap();

    assert_eq!(names(&repo.list_directory("/assets").unwrap()), vec!["a.js", "b.js"]);
}

#[test]
fn nested_collections_are_unsupported() {
    let mut repo = Repository::new();
    let value = AddValue::Collection(vec![
        AddValue::Resource(file("ok.js", "")),
        AddValue::Collection(Vec::new()),
    ]);
    assert!(matches!(
        repo.add("/assets", value),
        Err(RepoError::UnsupportedResource(_))
    ));
    assert_eq!(repo.len(), 1);
}

#[test]
fn reference_without_backend_fails() {
    let mut repo = Repository::new();
    assert_eq!(
        repo.add("/copy", "/app/*"),
        Err(RepoError::NoBackend("/app/*".into()))
    );
}

#[rstest]
fn references_copy_from_another_repository(site: Repository) {
    let source = Arc::new(site);
    let mut repo = Repository::new().with_backend(source.clone());

    repo.add("/templates", "/app/views/*.twig").unwrap();
    repo.add("/admin", "/app/views/admin").unwrap();

    assert_eq!(
        names(&repo.list_directory("/templates").unwrap()),
        vec!["index.twig", "layout.twig"]
    );
    let users = repo.get("/admin/users.twig").unwrap();
    assert_eq!(users.repository(), Some(repo.id()));
    assert_eq!(users.path(), Some("/admin/users.twig"));

    // The source keeps its own attachments
    let original = source.get("/app/views/admin/users.twig").unwrap();
    assert_eq!(original.repository(), Some(source.id()));
    assert_eq!(original.path(), Some("/app/views/admin/users.twig"));
}

#[rstest]
fn snapshot_moves_between_repositories(site: Repository) {
    let mut other = Repository::new();
    other.add("/copy", site.snapshot("/app/views").unwrap()).unwrap();

    let copied: Vec<&str> = other.paths().collect();
    assert_eq!(
        copied,
        vec![
            "/",
            "/copy",
            "/copy/admin",
            "/copy/admin/users.twig",
            "/copy/index.twig",
            "/copy/layout.twig",
        ]
    );
    assert_eq!(site.get("/app/views").unwrap().path(), Some("/app/views"));
}

// ============================================================================
// Argument validation
// ============================================================================

#[rstest]
#[case::empty("")]
#[case::relative("app/views")]
fn invalid_paths_fail_every_operation(mut site: Repository, #[case] path: &str) {
    assert!(matches!(site.get(path), Err(RepoError::InvalidArgument(_))));
    assert!(matches!(site.find(path), Err(RepoError::InvalidArgument(_))));
    assert!(matches!(site.contains(path), Err(RepoError::InvalidArgument(_))));
    assert!(matches!(site.list_directory(path), Err(RepoError::InvalidArgument(_))));
    assert!(matches!(site.remove(path), Err(RepoError::InvalidArgument(_))));
    assert!(matches!(
        site.add(path, file("x", "")),
        Err(RepoError::InvalidArgument(_))
    ));
}

#[test]
fn braces_can_be_disabled() {
    let config = RepositoryConfig {
        brace_expansion: false,
        ..RepositoryConfig::default()
    };
    let mut repo = Repository::with_config(&config);
    repo.add("/tpl/{name}", FileResource::new("{name}", "")).unwrap();

    assert_eq!(repo.find("/tpl/{name}").unwrap().len(), 1);
    assert_eq!(repo.find("/tpl/*").unwrap().len(), 1);
}
